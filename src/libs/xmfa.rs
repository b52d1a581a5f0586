use crate::libs::error::XmfaError;
use crate::libs::label::LabelEntry;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// `+` is forward, every other token is taken as reverse
    pub fn from_token(token: &str) -> Self {
        if token == "+" {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }

    pub fn as_int(&self) -> i8 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl Serialize for Strand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_int())
    }
}

/// One aligned fragment of an LCB
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeqRecord {
    pub raw_id: String,
    pub source_index: usize,
    pub start: usize, // 1-based, inclusive
    pub end: usize,
    pub strand: Strand,
    pub sequence: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeqRecord {
    /// Range string in block FA style
    ///
    /// ```
    /// # use xmfa::parse_header;
    /// let mut record = parse_header("> 2:5-16 - Sc.fa", 1).unwrap();
    /// assert_eq!(record.range(), "2(-):5-16");
    ///
    /// record.name = Some("Sc_1".to_string());
    /// assert_eq!(record.range(), "Sc_1(-):5-16");
    /// ```
    pub fn range(&self) -> String {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self.source_index.to_string(),
        };
        format!(
            "{}({}):{}-{}",
            name,
            self.strand.as_char(),
            self.start,
            self.end
        )
    }
}

/// A Locally Collinear Block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Lcb {
    pub records: Vec<SeqRecord>,
}

impl Lcb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Blocks with fewer than 2 records are unaligned regions
    pub fn is_aligned(&self) -> bool {
        self.records.len() >= 2
    }

    /// Fills `name` of every record from the label map
    pub fn resolve_names(&mut self, labels: &IndexMap<String, LabelEntry>) -> Result<(), XmfaError> {
        for record in self.records.iter_mut() {
            let entry = labels
                .get(&record.source_index.to_string())
                .ok_or(XmfaError::UnresolvedIndex(record.source_index))?;
            record.name = Some(entry.record_id.clone());
        }
        Ok(())
    }
}

/// Parses a record header
///
/// ```text
/// 0 1           2 3      4 5
/// > 1:5986-6406 + CbK.fa # CbK_gp011
/// ```
///
/// ```
/// # use xmfa::{parse_header, Strand};
/// let record = parse_header("> 1:5986-6406 + CbK.fa # CbK_gp011", 1).unwrap();
/// assert_eq!(record.source_index, 1);
/// assert_eq!(record.start, 5986);
/// assert_eq!(record.end, 6406);
/// assert_eq!(record.strand, Strand::Forward);
/// assert_eq!(record.comment, "CbK_gp011");
/// assert_eq!(record.raw_id, "1:5986-6406_+_CbK.fa_#_CbK_gp011");
/// ```
pub fn parse_header(line: &str, line_no: usize) -> Result<SeqRecord, XmfaError> {
    let malformed = || XmfaError::MalformedHeader {
        line: line_no,
        header: line.to_string(),
    };

    // `>1:1-10` and `> 1:1-10` both put the locus first
    let body = line.trim().strip_prefix('>').ok_or_else(malformed)?;
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(malformed());
    }

    let (index, loc) = tokens[0].split_once(':').ok_or_else(malformed)?;
    let (start, end) = loc.split_once('-').ok_or_else(malformed)?;

    let source_index = index.parse::<usize>().map_err(|_| malformed())?;
    let start = start.parse::<usize>().map_err(|_| malformed())?;
    let end = end.parse::<usize>().map_err(|_| malformed())?;

    let comment = if tokens.len() > 4 {
        tokens[4..].join(" ")
    } else {
        String::new()
    };

    Ok(SeqRecord {
        raw_id: tokens.join("_"),
        source_index,
        start,
        end,
        strand: Strand::from_token(tokens[1]),
        sequence: String::new(),
        comment,
        name: None,
    })
}

enum State {
    AccumulatingBlock,
    AccumulatingRecord(SeqRecord),
}

/// Pulls one LCB per `=` line.
///
/// Records and blocks left open at the end of input are dropped.
///
/// ```
/// # use xmfa::XmfaReader;
/// let input = "\
/// #FormatVersion Mauve1
/// > 1:1-4 + a.fa
/// AC-GT
/// > 2:9-13 - b.fa
/// ACTGT
/// =
/// =
/// ";
/// let blocks = XmfaReader::new(input.as_bytes())
///     .with_sequence(true)
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].records[0].sequence, "AC-GT");
/// assert!(blocks[1].is_empty());
/// ```
pub struct XmfaReader<R> {
    reader: R,
    line_buf: String,
    line_no: usize,
    keep_sequence: bool,
    state: State,
    block: Lcb,
    done: bool,
}

impl<R: BufRead> XmfaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buf: String::new(),
            line_no: 0,
            keep_sequence: false,
            state: State::AccumulatingBlock,
            block: Lcb::new(),
            done: false,
        }
    }

    /// Whether alignment lines are copied into `SeqRecord::sequence`. Off by default.
    pub fn with_sequence(mut self, keep: bool) -> Self {
        self.keep_sequence = keep;
        self
    }

    fn read_line(&mut self) -> std::io::Result<usize> {
        self.line_buf.clear();
        self.line_no += 1;
        self.reader.read_line(&mut self.line_buf)
    }

    /// Moves the pending record, if any, into the block
    fn flush_record(&mut self) {
        if let State::AccumulatingRecord(record) =
            std::mem::replace(&mut self.state, State::AccumulatingBlock)
        {
            self.block.records.push(record);
        }
    }

    fn next_block(&mut self) -> Result<Option<Lcb>, XmfaError> {
        loop {
            if self.read_line()? == 0 {
                if !self.block.is_empty() || matches!(self.state, State::AccumulatingRecord(_)) {
                    tracing::debug!("Dropped an unterminated block at the end of input");
                }
                return Ok(None);
            }

            let line = self.line_buf.trim_end();
            if line.starts_with('#') {
                continue;
            }

            let line = line.trim_start();
            if line == "=" {
                self.flush_record();
                let block = std::mem::take(&mut self.block);
                tracing::debug!("Block of {} records ends at line {}", block.len(), self.line_no);
                return Ok(Some(block));
            } else if line.starts_with('>') {
                let record = parse_header(line, self.line_no)?;
                self.flush_record();
                self.state = State::AccumulatingRecord(record);
            } else if !line.is_empty() && self.keep_sequence {
                if let State::AccumulatingRecord(record) = &mut self.state {
                    record.sequence.push_str(line);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for XmfaReader<R> {
    type Item = Result<Lcb, XmfaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
#FormatVersion Mauve1
#Sequence1File\tCbK.fa
> 1:5986-6406 + CbK.fa # CbK_gp011 hypothetical protein
ACGT-
ACG
> 2:100-107 - Sd.fa
ACGTTACG
=
> 1:10-20 + CbK.fa
ACGTACGTACG
=
";

    fn parse_all(input: &str, keep: bool) -> Vec<Lcb> {
        XmfaReader::new(input.as_bytes())
            .with_sequence(keep)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_blocks() {
        let blocks = parse_all(INPUT, false);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[1].len(), 1);
        assert!(blocks[0].is_aligned());
        assert!(!blocks[1].is_aligned());

        let r = &blocks[0].records[0];
        assert_eq!(r.source_index, 1);
        assert_eq!(r.start, 5986);
        assert_eq!(r.end, 6406);
        assert_eq!(r.strand, Strand::Forward);
        assert_eq!(r.comment, "CbK_gp011 hypothetical protein");
        assert_eq!(r.raw_id, "1:5986-6406_+_CbK.fa_#_CbK_gp011_hypothetical_protein");
        assert_eq!(r.sequence, "");

        let r = &blocks[0].records[1];
        assert_eq!(r.strand, Strand::Reverse);
        assert_eq!(r.comment, "");
        assert_eq!(r.raw_id, "2:100-107_-_Sd.fa");
    }

    #[test]
    fn test_keep_sequence() {
        let blocks = parse_all(INPUT, true);
        assert_eq!(blocks[0].records[0].sequence, "ACGT-ACG");
        assert_eq!(blocks[0].records[1].sequence, "ACGTTACG");
        assert_eq!(blocks[1].records[0].sequence, "ACGTACGTACG");
    }

    #[test]
    fn test_block_count_matches_terminators() {
        let input = "=\n=\n> 1:1-2 + a.fa\nAC\n=\n\n=\n";
        let blocks = parse_all(input, false);
        assert_eq!(blocks.len(), input.lines().filter(|l| *l == "=").count());
        assert!(blocks[0].is_empty());
        assert!(blocks[1].is_empty());
        assert_eq!(blocks[2].len(), 1);
        assert!(blocks[3].is_empty());
    }

    #[test]
    fn test_unterminated_block_dropped() {
        let input = "> 1:1-2 + a.fa\nAC\n=\n> 2:1-2 + b.fa\nAC\n";
        let blocks = parse_all(input, false);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].records[0].source_index, 1);
    }

    #[test]
    fn test_glued_header() {
        let record = parse_header(">3:7-9 - c.fa", 1).unwrap();
        assert_eq!(record.source_index, 3);
        assert_eq!(record.start, 7);
        assert_eq!(record.end, 9);
        assert_eq!(record.strand, Strand::Reverse);
        assert_eq!(record.raw_id, "3:7-9_-_c.fa");
    }

    #[test]
    fn test_malformed_header() {
        for header in [
            "> 1-5986-6406 + a.fa",
            "> 1:5986 + a.fa",
            "> x:1-2 + a.fa",
            "> 1:1-10",
            ">",
        ] {
            match parse_header(header, 7) {
                Err(XmfaError::MalformedHeader { line, .. }) => assert_eq!(line, 7),
                other => panic!("{} parsed as {:?}", header, other),
            }
        }
    }

    #[test]
    fn test_error_stops_stream() {
        let input = "> 1:1-2 + a.fa\n=\n> bad + a.fa\n=\n> 1:1-2 + a.fa\n=\n";
        let results: Vec<_> = XmfaReader::new(input.as_bytes()).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(XmfaError::MalformedHeader { line, header }) => {
                assert_eq!(*line, 3);
                assert_eq!(header, "> bad + a.fa");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reparse_is_identical() {
        assert_eq!(parse_all(INPUT, true), parse_all(INPUT, true));
    }

    #[test]
    fn test_resolve_names() {
        let mut labels = IndexMap::new();
        labels.insert(
            "1".to_string(),
            LabelEntry {
                record_id: "CbK_chr1".to_string(),
                length: 30,
            },
        );

        let mut blocks = parse_all(INPUT, false);
        blocks[1].resolve_names(&labels).unwrap();
        assert_eq!(blocks[1].records[0].range(), "CbK_chr1(+):10-20");

        match blocks[0].resolve_names(&labels) {
            Err(XmfaError::UnresolvedIndex(2)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_serialize() {
        let blocks = parse_all(INPUT, false);
        let json = serde_json::to_string(&blocks[1]).unwrap();
        assert_eq!(
            json,
            r#"[{"raw_id":"1:10-20_+_CbK.fa","source_index":1,"start":10,"end":20,"strand":1,"sequence":"","comment":""}]"#
        );
    }
}
