use std::fmt::{Display, Formatter};

use crate::qname::QName;
use crate::tree::Node;
use crate::uri::Uri;

/// An atomic value, as far as the QName and URI functions need them.
#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    String(String),
    UntypedAtomic(String),
    AnyUri(Uri),
    NCName(String),
    QName(QName),
    Boolean(bool),
    Integer(i64),
}

impl Atomic {
    /// The name of the atomic type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Atomic::String(_) => "xs:string",
            Atomic::UntypedAtomic(_) => "xs:untypedAtomic",
            Atomic::AnyUri(_) => "xs:anyURI",
            Atomic::NCName(_) => "xs:NCName",
            Atomic::QName(_) => "xs:QName",
            Atomic::Boolean(_) => "xs:boolean",
            Atomic::Integer(_) => "xs:integer",
        }
    }

    /// The string value if this atomic value can be passed where an
    /// `xs:string` is expected: strings and their subtypes, untyped atomic
    /// values, and `xs:anyURI` by promotion.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Atomic::String(s) | Atomic::UntypedAtomic(s) | Atomic::NCName(s) => Some(s),
            Atomic::AnyUri(uri) => Some(uri.as_str()),
            _ => None,
        }
    }
}

impl Display for Atomic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Atomic::String(s) | Atomic::UntypedAtomic(s) | Atomic::NCName(s) => write!(f, "{}", s),
            Atomic::AnyUri(uri) => write!(f, "{}", uri),
            Atomic::QName(qname) => write!(f, "{}", qname),
            Atomic::Boolean(b) => write!(f, "{}", b),
            Atomic::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// An item: an atomic value or a node in a [`Tree`](crate::Tree).
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Atomic(Atomic),
    Node(Node),
}

impl Item {
    pub fn string(s: impl Into<String>) -> Self {
        Item::Atomic(Atomic::String(s.into()))
    }
}

impl From<Atomic> for Item {
    fn from(atomic: Atomic) -> Self {
        Item::Atomic(atomic)
    }
}

impl From<QName> for Item {
    fn from(qname: QName) -> Self {
        Item::Atomic(Atomic::QName(qname))
    }
}

impl From<Uri> for Item {
    fn from(uri: Uri) -> Self {
        Item::Atomic(Atomic::AnyUri(uri))
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Item::Node(node)
    }
}

/// An evaluated sequence of items.
pub type Sequence = Vec<Item>;
