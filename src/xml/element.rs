use std::fmt::{self, Display};

use super::error::XmlError;

const GNUCASH_NS: &str = "http://www.gnucash.org/XML/";

/// The namespaces used by GnuCash documents. `Bare` stands for elements
/// without a namespace, such as the `gnc-v2` root, `price` and `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ns {
    Bare,
    Gnc,
    Book,
    Cmdty,
    Act,
    Trn,
    Split,
    Ts,
    Price,
    Cust,
    Addr,
    Vendor,
    Taxtable,
    Tte,
    Invoice,
    Owner,
    Entry,
    Slot,
}

impl Ns {
    pub fn prefix(self) -> Option<&'static str> {
        use Ns::*;
        match self {
            Bare => None,
            Gnc => Some("gnc"),
            Book => Some("book"),
            Cmdty => Some("cmdty"),
            Act => Some("act"),
            Trn => Some("trn"),
            Split => Some("split"),
            Ts => Some("ts"),
            Price => Some("price"),
            Cust => Some("cust"),
            Addr => Some("addr"),
            Vendor => Some("vendor"),
            Taxtable => Some("taxtable"),
            Tte => Some("tte"),
            Invoice => Some("invoice"),
            Owner => Some("owner"),
            Entry => Some("entry"),
            Slot => Some("slot"),
        }
    }

    pub const fn tag(self, local: &'static str) -> Tag {
        Tag { ns: self, local }
    }

    fn matches(self, uri: Option<&str>) -> bool {
        match (self.prefix(), uri) {
            (None, None) => true,
            (Some(prefix), Some(uri)) => uri.strip_prefix(GNUCASH_NS) == Some(prefix),
            _ => false,
        }
    }
}

/// A namespace-qualified element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub ns: Ns,
    pub local: &'static str,
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ns.prefix() {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

pub struct TagPath<'a>(pub &'a [Tag]);

impl Display for TagPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

/// An element of a parsed document, with its namespace resolved to a URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn is(&self, tag: Tag) -> bool {
        self.name == tag.local && tag.ns.matches(self.namespace.as_deref())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, tag: Tag) -> Option<&Element> {
        self.children.iter().find(|c| c.is(tag))
    }

    pub fn children_of(&self, tag: Tag) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter(move |c| c.is(tag))
    }

    /// Follows `path` through the first matching child at every step.
    pub fn find(&self, path: &[Tag]) -> Option<&Element> {
        path.iter().try_fold(self, |el, tag| el.child(*tag))
    }

    /// All elements reachable through `path`, in document order.
    pub fn find_all(&self, path: &[Tag]) -> Vec<&Element> {
        path.iter().fold(vec![self], |current, tag| {
            current
                .into_iter()
                .flat_map(|el| el.children_of(*tag))
                .collect()
        })
    }

    pub fn optional_text(&self, path: &[Tag]) -> Option<&str> {
        self.find(path).map(Element::text)
    }

    pub fn require(&self, path: &[Tag]) -> Result<&Element, XmlError> {
        self.find(path)
            .ok_or_else(|| XmlError::Missing(format!("{}/{}", self.name, TagPath(path))))
    }

    pub fn require_text(&self, path: &[Tag]) -> Result<&str, XmlError> {
        self.require(path).map(Element::text)
    }
}

#[cfg(test)]
mod test_element {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    const ACT_NAME: Tag = Ns::Act.tag("name");
    const ACT_COMMODITY: Tag = Ns::Act.tag("commodity");
    const CMDTY_ID: Tag = Ns::Cmdty.tag("id");
    const SLOT: Tag = Ns::Bare.tag("slot");

    fn doc() -> Element {
        parse_document(
            r#"<account xmlns:act="http://www.gnucash.org/XML/act"
                         xmlns:cmdty="http://www.gnucash.org/XML/cmdty">
                  <act:name>Bank</act:name>
                  <act:commodity><cmdty:id>EUR</cmdty:id></act:commodity>
                  <act:commodity><cmdty:id>USD</cmdty:id></act:commodity>
                  <slot type="frame"/>
                </account>"#
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(ACT_NAME.to_string(), "act:name");
        assert_eq!(SLOT.to_string(), "slot");
        assert_eq!(
            TagPath(&[ACT_COMMODITY, CMDTY_ID]).to_string(),
            "act:commodity/cmdty:id"
        );
    }

    #[test]
    fn test_find() {
        let d = doc();
        assert_eq!(d.optional_text(&[ACT_NAME]), Some("Bank"));
        assert_eq!(d.optional_text(&[ACT_COMMODITY, CMDTY_ID]), Some("EUR"));
        assert_eq!(
            d.find_all(&[ACT_COMMODITY, CMDTY_ID])
                .iter()
                .map(|e| e.text())
                .collect::<Vec<_>>(),
            vec!["EUR", "USD"]
        );
        assert_eq!(d.child(SLOT).and_then(|s| s.attribute("type")), Some("frame"));
    }

    #[test]
    fn test_namespace_must_match() {
        let d = doc();
        assert!(d.child(Ns::Trn.tag("name")).is_none());
        assert!(d.child(Ns::Bare.tag("name")).is_none());
        assert!(d.child(Ns::Act.tag("slot")).is_none());
    }

    #[test]
    fn test_require() {
        let d = doc();
        assert_eq!(d.require_text(&[ACT_NAME]).unwrap(), "Bank");
        assert_eq!(
            d.require(&[ACT_COMMODITY, Ns::Cmdty.tag("space")])
                .unwrap_err()
                .to_string(),
            "missing element account/act:commodity/cmdty:space"
        );
    }
}
