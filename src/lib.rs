#![forbid(unsafe_code)]

//! XQuery QName and URI functions over a namespace-aware XML tree.
//!
//! The [`Tree`] holds parsed or constructed XML; every element knows its
//! namespace declarations, and [`Tree::scope`] computes the in-scope
//! namespaces from the ancestor chain. The [`functions`] module implements
//! `fn:QName`, `fn:resolve-QName`, `fn:prefix-from-QName`,
//! `fn:local-name-from-QName`, `fn:namespace-uri-from-QName`,
//! `fn:namespace-uri-for-prefix`, `fn:in-scope-prefixes` and
//! `fn:resolve-uri` on top of it.
//!
//! ```rust
//! use xqname::{functions, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.parse(r#"<a xmlns:p="urn:p"/>"#).unwrap();
//! let a = tree.document_element(root).unwrap();
//!
//! let name = functions::resolve_qname(&tree, Some("p:x"), a).unwrap().unwrap();
//! assert_eq!(name.uri(), Some("urn:p"));
//! ```

mod access;
mod context;
mod creation;
mod encoding;
mod entity;
mod error;
pub mod functions;
mod idmap;
mod interned;
mod nameaccess;
mod parse;
mod qname;
mod scope;
mod tree;
mod uri;
mod xdm;
mod xmlvalue;

pub use context::{StaticContext, StaticContextBuilder};
pub use error::{Error, ErrorCode, QueryError, ERR_NAMESPACE};
pub use functions::{CallContext, FunctionBody, FunctionLibrary};
pub use interned::{NameId, NamespaceId, PrefixId};
pub use qname::{is_ncname, is_qname, split_qname, QName};
pub use scope::NamespaceScope;
pub use tree::{Node, Tree, XMLNS_NAMESPACE, XML_NAMESPACE};
pub use uri::Uri;
pub use xdm::{Atomic, Item, Sequence};
pub use xmlvalue::{
    Comment, Declarations, Element, ProcessingInstruction, Text, Value, ValueType,
};
