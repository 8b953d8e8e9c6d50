use std::{
    fs,
    io::{BufRead, Read},
    path::Path,
};

use flate2::bufread::GzDecoder;
use quick_xml::{
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
    NsReader,
};
use tracing::{debug, trace};

use super::{
    element::Element,
    error::{syntax, XmlError},
};

pub fn read_file(path: &Path) -> Result<Vec<u8>, XmlError> {
    fs::read(path).map_err(|e| XmlError::IO(path.to_path_buf(), e))
}

pub fn read_all<R: Read>(mut r: R) -> Result<Vec<u8>, XmlError> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Returns the gunzipped content of `bytes`, or `bytes` unchanged if they
/// cannot be decompressed.
pub fn decompress(bytes: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    match GzDecoder::new(bytes.as_slice()).read_to_end(&mut out) {
        Ok(_) if !out.is_empty() => {
            debug!(compressed = bytes.len(), size = out.len(), "decompressed gzip document");
            out
        }
        Ok(_) => bytes,
        Err(e) => {
            trace!("not gzip-compressed ({e}), reading as plain XML");
            bytes
        }
    }
}

/// Parses a complete document into an element tree.
pub fn parse_document<R: BufRead>(r: R) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_reader(r);
    reader.expand_empty_elements(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, Event::Start(e))) => stack.push(open(ns, &e)?),
            Ok((_, Event::End(e))) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::Syntax(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(XmlError::Syntax("more than one root element".into())),
                }
            }
            Ok((_, Event::Text(t))) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&t.unescape().map_err(syntax)?);
                }
            }
            Ok((_, Event::CData(t))) => {
                if let Some(element) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => (),
            Err(e) => return Err(syntax(e)),
        }
        buf.clear();
    }
    if let Some(open) = stack.last() {
        return Err(XmlError::Syntax(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or(XmlError::Empty)
}

fn open(ns: ResolveResult, e: &BytesStart) -> Result<Element, XmlError> {
    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(XmlError::Syntax(format!(
                "unknown namespace prefix {}",
                String::from_utf8_lossy(&prefix)
            )))
        }
    };
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for a in e.attributes() {
        let a = a.map_err(syntax)?;
        if a.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(a.key.local_name().as_ref()).into_owned();
        let value = a.unescape_value().map_err(syntax)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        namespace,
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}
