use std::{io, path::PathBuf};

use thiserror::Error;

use crate::xml::XmlError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading {}: {source}", path.to_string_lossy())]
    Io { path: PathBuf, source: io::Error },

    #[error("error reading document: {0}")]
    Read(#[source] io::Error),

    #[error("not a valid GnuCash v2 XML file: {0}")]
    Format(String),

    #[error("unresolved {kind} reference {guid}")]
    UnresolvedReference { kind: &'static str, guid: String },

    #[error("unknown slot type {0}")]
    UnsupportedSlotType(String),

    #[error("missing element {0}")]
    MissingField(String),
}

impl LoadError {
    pub(crate) fn unresolved(kind: &'static str, guid: &str) -> Self {
        LoadError::UnresolvedReference {
            kind,
            guid: guid.to_string(),
        }
    }
}

impl From<XmlError> for LoadError {
    fn from(e: XmlError) -> Self {
        match e {
            XmlError::IO(path, source) => LoadError::Io { path, source },
            XmlError::Read(source) => LoadError::Read(source),
            XmlError::Missing(path) => LoadError::MissingField(path),
            e @ (XmlError::Syntax(_) | XmlError::Empty) => LoadError::Format(e.to_string()),
        }
    }
}

#[cfg(test)]
mod test_load_error {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_xml_error() {
        assert!(matches!(
            LoadError::from(XmlError::Empty),
            LoadError::Format(_)
        ));
        assert!(matches!(
            LoadError::from(XmlError::Missing("a/b".into())),
            LoadError::MissingField(p) if p == "a/b"
        ));
        assert_eq!(
            LoadError::unresolved("account", "abc").to_string(),
            "unresolved account reference abc"
        );
    }
}
