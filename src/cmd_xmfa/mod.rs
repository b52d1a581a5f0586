//! Subcommand modules for the `xmfa` binary.

pub mod identity;
pub mod labels;
pub mod process;
pub mod to_fas;
pub mod to_json;

use indexmap::IndexMap;
use xmfa::LabelEntry;

/// Labels of the `--fasta` files, if any were given
pub fn opt_labels(args: &clap::ArgMatches) -> anyhow::Result<Option<IndexMap<String, LabelEntry>>> {
    match args.get_many::<String>("fasta") {
        Some(files) => {
            let files: Vec<&String> = files.collect();
            Ok(Some(xmfa::resolve_labels(&files)?))
        }
        None => Ok(None),
    }
}

pub fn arg_fasta() -> clap::Arg {
    clap::Arg::new("fasta")
        .long("fasta")
        .short('f')
        .num_args(1..)
        .help("FASTA file(s) in XMFA sequence order, to name the records")
}

pub fn arg_outfile() -> clap::Arg {
    clap::Arg::new("outfile")
        .long("outfile")
        .short('o')
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}
