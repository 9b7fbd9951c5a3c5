use super::args::{element, optional, optional_qname, optional_string, required_string};
use super::CallContext;
use crate::error::{ErrorCode, QueryError};
use crate::qname::{split_qname, QName};
use crate::scope::NamespaceScope;
use crate::tree::{Node, Tree, XML_NAMESPACE};
use crate::uri::Uri;
use crate::xdm::{Atomic, Item, Sequence};

fn element_scope(tree: &Tree, node: Node) -> Result<NamespaceScope<'_>, QueryError> {
    tree.scope(node)
        .map_err(|_| QueryError::type_error("expected element(), got node()"))
}

/// `fn:QName($paramURI as xs:string?, $paramQName as xs:string) as xs:QName`
///
/// An empty URI (or `None`) means no namespace; see [`QName::parse`] for the
/// rules.
///
/// ```rust
/// let name = xqname::functions::qname(Some("http://example.org/"), "ex:foo").unwrap();
/// assert_eq!(name.prefix(), Some("ex"));
/// assert_eq!(name.local(), "foo");
/// assert_eq!(name.uri(), Some("http://example.org/"));
/// ```
pub fn qname(uri: Option<&str>, name: &str) -> Result<QName, QueryError> {
    QName::parse(uri.unwrap_or(""), name)
}

/// `fn:prefix-from-QName($arg as xs:QName?) as xs:NCName?`
pub fn prefix_from_qname(qname: Option<&QName>) -> Option<&str> {
    qname.and_then(|qname| qname.prefix())
}

/// `fn:local-name-from-QName($arg as xs:QName?) as xs:NCName?`
pub fn local_name_from_qname(qname: Option<&QName>) -> Option<&str> {
    qname.map(|qname| qname.local())
}

/// `fn:namespace-uri-from-QName($arg as xs:QName?) as xs:anyURI?`
///
/// A QName that is not in a namespace gives `None`.
pub fn namespace_uri_from_qname(qname: Option<&QName>) -> Option<Uri> {
    qname.and_then(|qname| qname.uri()).map(Uri::new)
}

/// `fn:namespace-uri-for-prefix($prefix as xs:string?, $element as element()) as xs:anyURI?`
///
/// The empty prefix (or `None`) looks up the default namespace. `xml` is
/// always bound. An unbound or undeclared prefix gives `None`.
pub fn namespace_uri_for_prefix(
    tree: &Tree,
    prefix: Option<&str>,
    element: Node,
) -> Result<Option<Uri>, QueryError> {
    let scope = element_scope(tree, element)?;
    let prefix = prefix.unwrap_or("");
    if prefix == "xml" {
        return Ok(Some(Uri::new(XML_NAMESPACE)));
    }
    Ok(scope.lookup(prefix).map(Uri::new))
}

/// `fn:in-scope-prefixes($element as element()) as xs:string*`
///
/// Every prefix bound to a non-empty namespace on the element, the empty
/// prefix if a default namespace is in scope, and `xml`. The order is the
/// scope order: nearest declaring element first.
///
/// ```rust
/// let mut tree = xqname::Tree::new();
/// let root = tree.parse(r#"<a xmlns:p="u" xmlns="d"/>"#).unwrap();
/// let a = tree.document_element(root).unwrap();
/// let prefixes = xqname::functions::in_scope_prefixes(&tree, a).unwrap();
/// assert_eq!(prefixes, vec!["p", "", "xml"]);
/// ```
pub fn in_scope_prefixes(tree: &Tree, element: Node) -> Result<Vec<String>, QueryError> {
    let scope = element_scope(tree, element)?;
    Ok(scope.prefixes().map(|prefix| prefix.to_string()).collect())
}

/// `fn:resolve-QName($qname as xs:string?, $element as element()) as xs:QName?`
///
/// The prefix of the lexical QName is resolved against the in-scope
/// namespaces of the element. An unprefixed name takes the default
/// namespace, if any. The prefix is kept on the result.
///
/// Fails with `FORG0001` if `lexical` is not a QName and with `FONS0004` if
/// its prefix is not bound.
pub fn resolve_qname(
    tree: &Tree,
    lexical: Option<&str>,
    element: Node,
) -> Result<Option<QName>, QueryError> {
    let scope = element_scope(tree, element)?;
    let Some(lexical) = lexical else {
        return Ok(None);
    };
    let (prefix, local) = split_qname(lexical).ok_or_else(|| {
        QueryError::new(
            ErrorCode::FORG0001,
            format!("invalid QName: '{}'", lexical),
        )
    })?;
    let uri = scope.lookup(prefix.unwrap_or(""));
    if let (Some(prefix), None) = (prefix, uri) {
        return Err(QueryError::new(
            ErrorCode::FONS0004,
            format!("no namespace declaration for prefix '{}'", prefix),
        ));
    }
    Ok(Some(QName::new_unchecked(prefix, local, uri)))
}

pub(super) fn qname_fn(
    _context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let uri = optional_string(&args[0])?;
    let name = required_string(&args[1])?;
    Ok(vec![qname(uri, name)?.into()])
}

pub(super) fn prefix_from_qname_fn(
    _context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let prefix = prefix_from_qname(optional_qname(&args[0])?);
    Ok(optional(prefix.map(|prefix| {
        Item::Atomic(Atomic::NCName(prefix.to_string()))
    })))
}

pub(super) fn local_name_from_qname_fn(
    _context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let local = local_name_from_qname(optional_qname(&args[0])?);
    Ok(optional(local.map(|local| {
        Item::Atomic(Atomic::NCName(local.to_string()))
    })))
}

pub(super) fn namespace_uri_from_qname_fn(
    _context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let uri = namespace_uri_from_qname(optional_qname(&args[0])?);
    Ok(optional(uri.map(Item::from)))
}

pub(super) fn namespace_uri_for_prefix_fn(
    context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let prefix = optional_string(&args[0])?;
    let node = element(context.tree, &args[1])?;
    let uri = namespace_uri_for_prefix(context.tree, prefix, node)?;
    Ok(optional(uri.map(Item::from)))
}

pub(super) fn in_scope_prefixes_fn(
    context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let node = element(context.tree, &args[0])?;
    Ok(in_scope_prefixes(context.tree, node)?
        .into_iter()
        .map(|prefix| Item::Atomic(Atomic::NCName(prefix)))
        .collect())
}

pub(super) fn resolve_qname_fn(
    context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let lexical = optional_string(&args[0])?;
    let node = element(context.tree, &args[1])?;
    let qname = resolve_qname(context.tree, lexical, node)?;
    Ok(optional(qname.map(Item::from)))
}
