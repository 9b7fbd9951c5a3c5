use ahash::HashSet;

use crate::error::Error;
use crate::interned::{NamespaceId, PrefixId};
use crate::tree::{Node, Tree};

/// The in-scope namespaces of an element.
///
/// This is the union of the namespace declarations on the element and its
/// ancestors, nearer declarations shadowing farther ones. A declaration to
/// the empty namespace is an undeclaration: the prefix is not in scope. The
/// `xml` prefix is always in scope.
///
/// The scope borrows the tree; it is a view computed on demand and holds no
/// data of its own beyond the resolved bindings.
#[derive(Debug, Clone)]
pub struct NamespaceScope<'a> {
    tree: &'a Tree,
    // nearest declaration per prefix, undeclarations included, nearest
    // element first
    bindings: Vec<(PrefixId, NamespaceId)>,
}

impl<'a> NamespaceScope<'a> {
    fn new(tree: &'a Tree, node: Node) -> Self {
        let mut seen = HashSet::default();
        let mut bindings = Vec::new();
        for ancestor in tree.ancestors(node) {
            if let Some(element) = tree.element(ancestor) {
                for (prefix_id, namespace_id) in element.declarations() {
                    if seen.insert(*prefix_id) {
                        bindings.push((*prefix_id, *namespace_id));
                    }
                }
            }
        }
        if !seen.contains(&tree.xml_prefix_id) {
            bindings.push((tree.xml_prefix_id, tree.xml_namespace_id));
        }
        Self { tree, bindings }
    }

    /// Look up the namespace bound to a prefix id.
    ///
    /// Returns `None` if the prefix is unbound or undeclared.
    pub fn lookup_id(&self, prefix_id: PrefixId) -> Option<NamespaceId> {
        self.bindings
            .iter()
            .find(|(p, _)| *p == prefix_id)
            .map(|(_, ns)| *ns)
            .filter(|ns| *ns != self.tree.no_namespace_id)
    }

    /// Look up the namespace URI bound to a prefix. The empty prefix looks
    /// up the default namespace.
    ///
    /// Returns `None` if the prefix is unbound or undeclared; never returns
    /// the empty string.
    pub fn lookup(&self, prefix: &str) -> Option<&'a str> {
        let prefix_id = self.tree.prefix(prefix)?;
        let tree = self.tree;
        self.lookup_id(prefix_id)
            .map(|namespace_id| tree.namespace_str(namespace_id))
    }

    /// The default namespace, if one is in scope.
    pub fn default_namespace(&self) -> Option<&'a str> {
        self.lookup("")
    }

    /// Iterate over the bound prefixes and their namespace URIs.
    ///
    /// Undeclared prefixes are skipped. Bindings come nearest element first,
    /// in declaration order within an element; the implicit `xml` binding
    /// comes last.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        let tree = self.tree;
        self.bindings
            .iter()
            .filter(move |(_, ns)| *ns != tree.no_namespace_id)
            .map(move |(p, ns)| (tree.prefix_str(*p), tree.namespace_str(*ns)))
    }

    /// Iterate over the bound prefixes. The empty prefix is included when a
    /// default namespace is in scope.
    pub fn prefixes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.iter().map(|(prefix, _)| prefix)
    }
}

/// ## Namespace scopes
impl Tree {
    /// The in-scope namespaces of an element.
    ///
    /// Returns [`Error::NotElement`] if the node is not an element.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    /// let root = tree.parse(r#"<a xmlns:p="urn:p"><b xmlns="urn:d"/></a>"#).unwrap();
    /// let a = tree.document_element(root).unwrap();
    /// let b = tree.first_child(a).unwrap();
    ///
    /// let scope = tree.scope(b).unwrap();
    /// assert_eq!(scope.lookup("p"), Some("urn:p"));
    /// assert_eq!(scope.default_namespace(), Some("urn:d"));
    /// assert_eq!(scope.prefixes().collect::<Vec<_>>(), vec!["", "p", "xml"]);
    /// ```
    pub fn scope(&self, node: Node) -> Result<NamespaceScope<'_>, Error> {
        if !self.is_element(node) {
            return Err(Error::NotElement(node));
        }
        Ok(NamespaceScope::new(self, node))
    }

    /// Find the namespace bound to a prefix at a node, without materializing
    /// the whole scope. Undeclarations resolve to `None`.
    pub(crate) fn namespace_for_prefix(&self, node: Node, prefix_id: PrefixId) -> Option<NamespaceId> {
        if prefix_id == self.xml_prefix_id {
            return Some(self.xml_namespace_id);
        }
        self.ancestors(node)
            .filter_map(|ancestor| self.element(ancestor))
            .find_map(|element| element.get_declaration(prefix_id))
            .filter(|namespace_id| *namespace_id != self.no_namespace_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearer_declaration_shadows() {
        let mut tree = Tree::new();
        let root = tree
            .parse(r#"<a xmlns:p="urn:outer"><b xmlns:p="urn:inner"/></a>"#)
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let b = tree.first_child(a).unwrap();
        assert_eq!(tree.scope(a).unwrap().lookup("p"), Some("urn:outer"));
        assert_eq!(tree.scope(b).unwrap().lookup("p"), Some("urn:inner"));
    }

    #[test]
    fn test_undeclaration_hides_binding() {
        let mut tree = Tree::new();
        let root = tree
            .parse(r#"<a xmlns="urn:d" xmlns:p="urn:p"><b xmlns="" xmlns:p=""/></a>"#)
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let b = tree.first_child(a).unwrap();
        let scope = tree.scope(b).unwrap();
        assert_eq!(scope.lookup("p"), None);
        assert_eq!(scope.default_namespace(), None);
        assert_eq!(scope.prefixes().collect::<Vec<_>>(), vec!["xml"]);
    }

    #[test]
    fn test_xml_always_bound() {
        let mut tree = Tree::new();
        let root = tree.parse("<a/>").unwrap();
        let a = tree.document_element(root).unwrap();
        let scope = tree.scope(a).unwrap();
        assert_eq!(
            scope.lookup("xml"),
            Some("http://www.w3.org/XML/1998/namespace")
        );
        assert_eq!(scope.lookup("nope"), None);
    }

    #[test]
    fn test_explicit_xml_declaration_not_duplicated() {
        let mut tree = Tree::new();
        let root = tree
            .parse(r#"<a xmlns:xml="http://www.w3.org/XML/1998/namespace"/>"#)
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let scope = tree.scope(a).unwrap();
        assert_eq!(scope.prefixes().filter(|p| *p == "xml").count(), 1);
    }

    #[test]
    fn test_scope_requires_element() {
        let mut tree = Tree::new();
        let root = tree.parse("<a>text</a>").unwrap();
        assert!(matches!(tree.scope(root), Err(Error::NotElement(_))));
    }

    #[test]
    fn test_namespace_for_prefix() {
        let mut tree = Tree::new();
        let root = tree
            .parse(r#"<a xmlns:p="urn:p"><b xmlns:p=""><c/></b></a>"#)
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let b = tree.first_child(a).unwrap();
        let c = tree.first_child(b).unwrap();
        let p = tree.prefix("p").unwrap();
        assert_eq!(tree.namespace_for_prefix(a, p), tree.namespace("urn:p"));
        assert_eq!(tree.namespace_for_prefix(c, p), None);
    }
}
