use indexmap::IndexMap;
use serde::Serialize;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub record_id: String,
    pub length: usize,
}

/// Visits every FASTA record of `infiles` in order with its 1-based ordinal.
/// Numbering continues across files.
pub fn for_each_record<S, F>(infiles: &[S], mut f: F) -> anyhow::Result<()>
where
    S: AsRef<str>,
    F: FnMut(usize, &noodles_fasta::Record) -> anyhow::Result<()>,
{
    let mut i = 0;
    for infile in infiles {
        let reader = crate::reader(infile.as_ref())?;
        let mut fa_in = noodles_fasta::io::Reader::new(reader);

        for result in fa_in.records() {
            let record = result?;
            i += 1;
            f(i, &record)?;
        }
        tracing::debug!("{} records after {}", i, infile.as_ref());
    }

    Ok(())
}

/// Maps the XMFA sequence index ("1", "2", ...) to the FASTA record id and length
///
/// ```
/// let labels = xmfa::resolve_labels(&["tests/xmfa/CbK.fa", "tests/xmfa/phages.fa"]).unwrap();
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels["1"].record_id, "CbK_chr1");
/// assert_eq!(labels["3"].length, 12);
/// ```
pub fn resolve_labels<S: AsRef<str>>(
    infiles: &[S],
) -> anyhow::Result<IndexMap<String, LabelEntry>> {
    let mut labels = IndexMap::new();

    for_each_record(infiles, |i, record| {
        let record_id = String::from_utf8(record.name().into())?;
        labels.insert(
            i.to_string(),
            LabelEntry {
                record_id,
                length: record.sequence().len(),
            },
        );
        Ok(())
    })?;

    Ok(labels)
}

/// One scratch file per FASTA record, keyed like `resolve_labels`.
///
/// The files are removed when their `NamedTempFile` is dropped; call `keep()` on an entry
/// to let it outlive the map.
pub fn scratch_files<S: AsRef<str>>(
    infiles: &[S],
) -> anyhow::Result<IndexMap<String, NamedTempFile>> {
    let mut files = IndexMap::new();

    for_each_record(infiles, |i, _| {
        files.insert(i.to_string(), NamedTempFile::new()?);
        Ok(())
    })?;

    Ok(files)
}
