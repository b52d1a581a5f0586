use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("to-json")
        .about("Convert LCBs of an XMFA file to JSON")
        .after_help(
            r###"
Writes the LCBs of an XMFA file as a JSON list of blocks, each block a list of records:
raw_id, source_index, start, end, strand (1/-1), sequence and comment.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Blocks with fewer than --min records are skipped; the default drops unaligned regions
* Aligned sequences are left empty unless --seq is given
* With --fasta, the i-th FASTA record names XMFA sequence i

Examples:
1. Aligned blocks:
   xmfa to-json tests/xmfa/example.xmfa

2. With sequences and names:
   xmfa to-json tests/xmfa/example.xmfa --seq --fasta tests/xmfa/CbK.fa tests/xmfa/phages.fa

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input XMFA file to process"),
        )
        .arg(super::arg_fasta())
        .arg(
            Arg::new("seq")
                .long("seq")
                .action(ArgAction::SetTrue)
                .help("Keep the aligned sequences"),
        )
        .arg(
            Arg::new("min")
                .long("min")
                .short('m')
                .num_args(1)
                .default_value("2")
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
    let infile = args.get_one::<String>("infile").unwrap();
    let is_seq = args.get_flag("seq");
    let opt_min = *args.get_one::<usize>("min").unwrap();
    let labels = super::opt_labels(args)?;

    let mut writer = xmfa::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    let reader = xmfa::reader(infile)?;
    let mut blocks = vec![];
    for result in xmfa::XmfaReader::new(reader).with_sequence(is_seq) {
        let mut block = result?;
        if block.len() < opt_min {
            continue;
        }
        if let Some(labels) = &labels {
            block.resolve_names(labels)?;
        }
        blocks.push(block);
    }
    tracing::info!("{} blocks with {} or more records", blocks.len(), opt_min);

    //----------------------------
    // Output
    //----------------------------
    serde_json::to_writer(&mut writer, &blocks)?;
    writer.write_all(b"\n")?;

    Ok(())
}
