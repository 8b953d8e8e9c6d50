use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("error reading file {}: {1}", .0.to_string_lossy())]
    IO(PathBuf, io::Error),

    #[error("error reading document: {0}")]
    Read(#[from] io::Error),

    #[error("invalid XML: {0}")]
    Syntax(String),

    #[error("document has no root element")]
    Empty,

    #[error("missing element {0}")]
    Missing(String),
}

pub(crate) fn syntax<E: std::fmt::Display>(e: E) -> XmlError {
    XmlError::Syntax(e.to_string())
}

#[cfg(test)]
mod test_xml_error {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        assert_eq!(
            XmlError::Missing("account/act:name".into()).to_string(),
            "missing element account/act:name"
        );
        assert_eq!(
            XmlError::IO(
                PathBuf::from("/tmp/book.gnucash"),
                io::Error::new(io::ErrorKind::NotFound, "not found")
            )
            .to_string(),
            "error reading file /tmp/book.gnucash: not found"
        );
    }
}
