pub mod libs;

pub use crate::libs::error::XmfaError;
pub use crate::libs::identity::{identity_to_reference, pairwise_identity, percent_identity};
pub use crate::libs::io::{reader, writer};
pub use crate::libs::label::{resolve_labels, scratch_files, LabelEntry};
pub use crate::libs::xmfa::{parse_header, Lcb, SeqRecord, Strand, XmfaReader};
