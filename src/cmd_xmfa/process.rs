use anyhow::Context;
use clap::*;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use xmfa::LabelEntry;

#[derive(Debug, Serialize)]
struct FastaOutput {
    length: usize,
    name: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct Manifest {
    fasta: Vec<FastaOutput>,
    gff3: Vec<String>,
    xmfa: String,
}

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("process")
        .about("Split an XMFA alignment and its annotations for viewing")
        .after_help(
            r###"
Writes into <outdir>:
* regions.json  - LCBs with 2 or more records, as in `xmfa to-json`
* <id>.gff      - GFF3 features of each sequence
* <id>.txt      - the raw sequence of each annotated sequence

A JSON manifest of the written files is printed to stdout:
{"fasta":[{"length","name","path"}],"gff3":[...],"xmfa":"<outdir>/regions.json"}

Notes:
* XMFA sequence i is the i-th record of the FASTA file
* The FASTA file can be 'stdin'
* --resolve replaces the sequence indices in regions.json with FASTA names

Examples:
1. Process a Mauve alignment:
   xmfa process tests/xmfa/genomes.gff tests/xmfa/genomes.fa tests/xmfa/example.xmfa out/

"###,
        )
        .arg(
            Arg::new("gff3")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Multi-GFF3 file"),
        )
        .arg(
            Arg::new("fasta")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Multi-FA file"),
        )
        .arg(
            Arg::new("xmfa")
                .required(true)
                .num_args(1)
                .index(3)
                .help("XMFA file"),
        )
        .arg(
            Arg::new("outdir")
                .required(true)
                .num_args(1)
                .index(4)
                .help("Output directory"),
        )
        .arg(
            Arg::new("resolve")
                .long("resolve")
                .action(ArgAction::SetTrue)
                .help("Name the records of regions.json after the FASTA records"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opt_gff3 = args.get_one::<String>("gff3").unwrap();
    let opt_fasta = args.get_one::<String>("fasta").unwrap();
    let opt_xmfa = args.get_one::<String>("xmfa").unwrap();
    let outdir = Path::new(args.get_one::<String>("outdir").unwrap());
    let is_resolve = args.get_flag("resolve");

    std::fs::create_dir_all(outdir)
        .with_context(|| format!("could not create {}", outdir.display()))?;

    //----------------------------
    // LCBs
    //----------------------------
    // stdin can only be read once
    let mut labels: IndexMap<String, LabelEntry> = IndexMap::new();
    let mut seq_of: IndexMap<String, Vec<u8>> = IndexMap::new();
    xmfa::libs::label::for_each_record(&[opt_fasta], |i, record| {
        let name = String::from_utf8(record.name().into())?;
        let seq = record.sequence().get(..).map(|s| s.to_vec()).unwrap_or_default();
        labels.insert(
            i.to_string(),
            LabelEntry {
                record_id: name.clone(),
                length: seq.len(),
            },
        );
        seq_of.insert(name, seq);
        Ok(())
    })?;

    let mut blocks = vec![];
    for result in xmfa::XmfaReader::new(xmfa::reader(opt_xmfa)?) {
        let mut block = result?;
        if !block.is_aligned() {
            continue;
        }
        if is_resolve {
            block.resolve_names(&labels)?;
        }
        blocks.push(block);
    }

    let regions = path_string(outdir, "regions.json");
    {
        let mut writer = xmfa::writer(&regions)?;
        serde_json::to_writer(&mut writer, &blocks)?;
        writer.flush()?;
    }
    tracing::info!("{} aligned blocks written to {}", blocks.len(), regions);

    //----------------------------
    // Sequences and features
    //----------------------------
    let mut manifest = Manifest {
        fasta: vec![],
        gff3: vec![],
        xmfa: regions,
    };

    let groups = xmfa::libs::gff::split_by_seqid(xmfa::reader(opt_gff3)?)?;
    for (seqid, lines) in &groups {
        let seq = seq_of.get(seqid);
        if seq.is_none() {
            tracing::warn!("{} of the GFF3 file is not in {}", seqid, opt_fasta);
        }

        let gff_file = path_string(outdir, &format!("{}.gff", seqid));
        {
            let mut writer = xmfa::writer(&gff_file)?;
            xmfa::libs::gff::write_gff(&mut writer, seqid, seq.map(|s| s.len()), lines)?;
            writer.flush()?;
        }
        manifest.gff3.push(gff_file);

        if let Some(seq) = seq {
            let fa_file = path_string(outdir, &format!("{}.txt", seqid));
            {
                let mut writer = xmfa::writer(&fa_file)?;
                writer.write_all(seq)?;
                writer.flush()?;
            }
            manifest.fasta.push(FastaOutput {
                length: seq.len(),
                name: seqid.to_string(),
                path: fa_file,
            });
        }
        tracing::info!("Features of {} written", seqid);
    }

    //----------------------------
    // Output
    //----------------------------
    let mut writer = xmfa::writer("stdout")?;
    serde_json::to_writer(&mut writer, &manifest)?;
    writer.write_all(b"\n")?;

    Ok(())
}

fn path_string(dir: &Path, file: &str) -> String {
    dir.join(file).to_string_lossy().to_string()
}
