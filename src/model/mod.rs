use std::{io::Read, path::Path};

use tracing::debug;

use crate::xml;

pub use book::{Book, GuidRef, Walk};
pub use builder::build_book;
pub use error::LoadError;

pub mod book;
pub mod date;
pub mod entities;
pub mod error;
pub mod export;
pub mod numeric;
pub mod printing;
pub mod registry;
pub mod slots;

mod builder;
mod tags;

/// Loads a book from a file, gzip-compressed or plain.
pub fn from_path(path: &Path) -> Result<Book, LoadError> {
    debug!("loading {}", path.display());
    from_bytes(xml::read_file(path)?)
}

pub fn from_reader<R: Read>(r: R) -> Result<Book, LoadError> {
    from_bytes(xml::read_all(r)?)
}

pub fn from_bytes(bytes: Vec<u8>) -> Result<Book, LoadError> {
    let bytes = xml::decompress(bytes);
    let root = xml::parse_document(bytes.as_slice())?;
    build_book(&root)
}

#[cfg(test)]
mod test_load {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &[u8] = include_bytes!("../../testdata/minimal.gnucash");

    #[test]
    fn test_end_to_end() {
        let book = from_bytes(FIXTURE.to_vec()).unwrap();
        assert_eq!(book.guid(), "b0000000000000000000000000000001");
        assert_eq!(book.commodities().count(), 2);
        assert_eq!(book.accounts().count(), 2);
        assert_eq!(book.transactions().len(), 1);
        assert_eq!(book.customers().len(), 1);
        assert_eq!(book.taxtables().len(), 1);
        assert_eq!(book.invoices().len(), 1);
        assert_eq!(book.invoices()[0].entries.len(), 2);
    }

    #[test]
    fn test_gzip_and_plain_load_identically() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(FIXTURE).unwrap();
        let compressed = encoder.finish().unwrap();

        let plain = from_reader(FIXTURE).unwrap();
        let gzipped = from_reader(compressed.as_slice()).unwrap();
        assert_eq!(plain.ledger().to_string(), gzipped.ledger().to_string());
        assert_eq!(export::book(&plain), export::book(&gzipped));
    }

    #[test]
    fn test_from_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/minimal.gnucash");
        let book = from_path(&path).unwrap();
        assert_eq!(book.accounts().count(), 2);
        assert!(matches!(
            from_path(Path::new("testdata/does-not-exist.gnucash")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_garbage() {
        assert!(matches!(
            from_bytes(b"this is not xml <".to_vec()),
            Err(LoadError::Format(_))
        ));
        assert!(matches!(from_bytes(Vec::new()), Err(LoadError::Format(_))));
    }
}
