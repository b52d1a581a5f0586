use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("to-fas")
        .about("Convert XMFA files to block FA format")
        .after_help(
            r###"
This subcommand converts the LCBs of XMFA files into block FA format.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Headers are name(strand):start-end; without --fasta the XMFA sequence index is the name
* Each block is followed by an empty line

Examples:
1. Convert an XMFA file to block FA format:
   xmfa to-fas tests/xmfa/example.xmfa

2. Only aligned blocks, named after the FASTA records:
   xmfa to-fas tests/xmfa/example.xmfa --min 2 --fasta tests/xmfa/genomes.fa

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input XMFA file(s) to process"),
        )
        .arg(super::arg_fasta())
        .arg(
            Arg::new("min")
                .long("min")
                .short('m')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Minimal number of records in a block"),
        )
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opt_min = *args.get_one::<usize>("min").unwrap();
    let labels = super::opt_labels(args)?;

    let mut writer = xmfa::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    for infile in args.get_many::<String>("infiles").unwrap() {
        let reader = xmfa::reader(infile)?;

        for result in xmfa::XmfaReader::new(reader).with_sequence(true) {
            let mut block = result?;
            if block.is_empty() || block.len() < opt_min {
                continue;
            }
            if let Some(labels) = &labels {
                block.resolve_names(labels)?;
            }

            //----------------------------
            // Output
            //----------------------------
            for record in &block.records {
                writer.write_all(format!(">{}\n{}\n", record.range(), record.sequence).as_ref())?;
            }

            // end of a block
            writer.write_all("\n".as_ref())?;
        }
    }

    Ok(())
}
