pub mod error;
pub mod gff;
pub mod identity;
pub mod io;
pub mod label;
pub mod xmfa;
