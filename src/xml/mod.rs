pub mod element;
pub mod error;
pub mod file;

pub use element::{Element, Ns, Tag};
pub use error::XmlError;
pub use file::{decompress, parse_document, read_all, read_file};
