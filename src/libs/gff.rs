//! GFF3 lines grouped by sequence id.
//!
//! Only the first column is looked at; attributes and coordinates are passed through untouched.

use indexmap::IndexMap;
use std::io::{BufRead, Write};

/// Groups feature lines by seqid in order of first appearance.
/// Comments and directives are dropped, and reading stops at `##FASTA`.
///
/// ```
/// let input = "##gff-version 3\nchr1\t.\tgene\t1\t9\t.\t+\t.\tID=g1\nchr2\t.\tgene\t2\t5\t.\t-\t.\tID=g2\n";
/// let groups = xmfa::libs::gff::split_by_seqid(input.as_bytes()).unwrap();
/// assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["chr1", "chr2"]);
/// ```
pub fn split_by_seqid<R: BufRead>(reader: R) -> anyhow::Result<IndexMap<String, Vec<String>>> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with("##FASTA") {
            break;
        }
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let seqid = match line.split_once('\t') {
            Some((seqid, _)) => seqid.to_string(),
            None => {
                tracing::warn!("Not a GFF3 feature line: {}", line);
                continue;
            }
        };
        groups.entry(seqid).or_default().push(line);
    }

    Ok(groups)
}

pub fn write_gff<W: Write>(
    writer: &mut W,
    seqid: &str,
    length: Option<usize>,
    lines: &[String],
) -> std::io::Result<()> {
    writeln!(writer, "##gff-version 3")?;
    if let Some(length) = length {
        writeln!(writer, "##sequence-region {} 1 {}", seqid, length)?;
    }
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
