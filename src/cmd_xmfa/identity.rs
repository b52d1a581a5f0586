use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("identity")
        .about("Percent identity between records of each LCB")
        .after_help(
            r###"
Calculates the percent identity of the records in each aligned block (2 or more records).

The first record of a block is the reference. Columns where the reference has a gap are
skipped, while gaps in the query count as mismatches.

Output columns: block, reference, query, identity
* block is the 1-based index of the block in the file, counting unaligned blocks

Examples:
1. Identity of each record against the first one:
   xmfa identity tests/xmfa/example.xmfa

2. All pairs, named after the FASTA records:
   xmfa identity tests/xmfa/example.xmfa --pairwise --fasta tests/xmfa/genomes.fa

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
            Arg::new("pairwise")
                .long("pairwise")
                .action(ArgAction::SetTrue)
                .help("Score all pairs of records, not only against the first one"),
        )
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let is_pairwise = args.get_flag("pairwise");
    let labels = super::opt_labels(args)?;

    let mut writer = xmfa::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    writer.write_all(b"block\treference\tquery\tidentity\n")?;

    let reader = xmfa::reader(infile)?;
    for (i, result) in xmfa::XmfaReader::new(reader)
        .with_sequence(true)
        .enumerate()
    {
        let mut block = result?;
        if !block.is_aligned() {
            continue;
        }
        if let Some(labels) = &labels {
            block.resolve_names(labels)?;
        }

        let scores: Vec<(usize, usize, f64)> = if is_pairwise {
            xmfa::pairwise_identity(&block)
        } else {
            xmfa::identity_to_reference(&block)
                .into_iter()
                .enumerate()
                .map(|(j, identity)| (0, j + 1, identity))
                .collect()
        };

        for (r, q, identity) in scores {
            writer.write_fmt(format_args!(
                "{}\t{}\t{}\t{:.2}\n",
                i + 1,
                block.records[r].range(),
                block.records[q].range(),
                identity
            ))?;
        }
    }

    Ok(())
}
