use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `input` for line reading. `stdin` reads standard input, `.gz` files are decompressed.
///
/// ```
/// use std::io::BufRead;
/// let reader = xmfa::reader("tests/xmfa/example.xmfa").unwrap();
/// let lines = reader.lines().collect::<Vec<_>>();
/// assert_eq!(lines.len(), 27);
///
/// assert!(xmfa::reader("tests/xmfa/not-here.xmfa").is_err());
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// `stdout` writes to standard output, anything else is created as a file.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use tempfile::tempdir;

    #[test]
    fn test_reader_gzip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blocks.xmfa.gz");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, "#FormatVersion Mauve1").unwrap();
            writeln!(encoder, "=").unwrap();
            encoder.finish().unwrap();
        }

        let lines: Vec<String> = reader(path.to_str().unwrap())
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["#FormatVersion Mauve1", "="]);
    }

    #[test]
    fn test_writer_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        {
            let mut w = writer(path.to_str().unwrap()).unwrap();
            w.write_all(b"1\tCbK_chr1\t30\n").unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1\tCbK_chr1\t30\n");
    }
}
