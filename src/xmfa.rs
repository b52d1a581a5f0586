extern crate clap;
use clap::*;
use tracing_subscriber::EnvFilter;

mod cmd_xmfa;

fn main() -> anyhow::Result<()> {
    let app = Command::new("xmfa")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`xmfa` - Locally Collinear Blocks of XMFA files")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print debug messages to stderr"),
        )
        .subcommand(cmd_xmfa::identity::make_subcommand())
        .subcommand(cmd_xmfa::labels::make_subcommand())
        .subcommand(cmd_xmfa::process::make_subcommand())
        .subcommand(cmd_xmfa::to_fas::make_subcommand())
        .subcommand(cmd_xmfa::to_json::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Blocks:
    * to-json  - LCBs as a JSON list
    * to-fas   - LCBs as block FA
    * identity - Percent identity within LCBs

* Sequences:
    * labels   - XMFA sequence indices of FASTA records

* Pipelines:
    * process  - regions.json, per-sequence GFF3 and sequence files

Set RUST_LOG to fine-tune logging, e.g. RUST_LOG=xmfa=debug

"###,
        );

    let matches = app.get_matches();

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if matches.get_flag("verbose") => EnvFilter::new("xmfa=debug,info"),
        Err(_) => EnvFilter::new("xmfa=warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("identity", sub_matches)) => cmd_xmfa::identity::execute(sub_matches),
        Some(("labels", sub_matches)) => cmd_xmfa::labels::execute(sub_matches),
        Some(("process", sub_matches)) => cmd_xmfa::process::execute(sub_matches),
        Some(("to-fas", sub_matches)) => cmd_xmfa::to_fas::execute(sub_matches),
        Some(("to-json", sub_matches)) => cmd_xmfa::to_json::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
