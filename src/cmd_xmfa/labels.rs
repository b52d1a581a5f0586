use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("labels")
        .about("XMFA sequence indices of FASTA records")
        .after_help(
            r###"
Numbers the records of FASTA file(s) the way XMFA headers refer to them: 1, 2, 3, ...
in file order, continuing across files.

Output columns: index, id, length

Examples:
1. Labels of two genome files:
   xmfa labels tests/xmfa/CbK.fa tests/xmfa/phages.fa

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input FASTA file(s), in XMFA sequence order"),
        )
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();
    let mut writer = xmfa::writer(args.get_one::<String>("outfile").unwrap())?;

    let labels = xmfa::resolve_labels(&infiles)?;
    for (index, entry) in &labels {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\n",
            index, entry.record_id, entry.length
        ))?;
    }

    Ok(())
}
