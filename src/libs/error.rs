use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmfaError {
    /// A `>` line whose locus token can't be split into index, start and end
    #[error("Malformed XMFA header at line {line}: {header}")]
    MalformedHeader {
        /// The line number (1-based)
        line: usize,
        /// The offending header line
        header: String,
    },

    /// A source index with no entry in the label map
    #[error("Sequence index {0} not found in the FASTA file(s)")]
    UnresolvedIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
