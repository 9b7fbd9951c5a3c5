use indextree::{Arena, NodeId};

use crate::interned::{NameLookup, NamespaceId, NamespaceLookup, PrefixId, PrefixLookup};
use crate::xmlvalue::Value;

/// The namespace URI permanently bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace URI reserved for namespace declaration attributes.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

pub(crate) type XmlArena = Arena<Value>;

/// A node in the XML tree.
/// This is a lightweight value and can be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// The `Tree` struct owns the XML data the query functions operate on: one
/// or more documents or fragments, plus the interned names, namespaces and
/// prefixes they use.
///
/// It is implemented in several sections: read access, creation, name
/// lookup, parsing and namespace scopes.
#[derive(Debug)]
pub struct Tree {
    pub(crate) arena: XmlArena,
    pub(crate) namespace_lookup: NamespaceLookup,
    pub(crate) prefix_lookup: PrefixLookup,
    pub(crate) name_lookup: NameLookup,
    pub(crate) no_namespace_id: NamespaceId,
    pub(crate) empty_prefix_id: PrefixId,
    pub(crate) xml_namespace_id: NamespaceId,
    pub(crate) xml_prefix_id: PrefixId,
    pub(crate) xmlns_prefix_id: PrefixId,
}

impl Tree {
    /// Create a new, empty `Tree`.
    pub fn new() -> Self {
        // the reserved entries take the ids of the NamespaceId and PrefixId
        // constants, in order
        Tree {
            arena: XmlArena::new(),
            namespace_lookup: NamespaceLookup::with_values([
                String::new(),
                XML_NAMESPACE.to_string(),
            ]),
            prefix_lookup: PrefixLookup::with_values([
                String::new(),
                "xml".to_string(),
                "xmlns".to_string(),
            ]),
            name_lookup: NameLookup::new(),
            no_namespace_id: NamespaceId::NONE,
            empty_prefix_id: PrefixId::EMPTY,
            xml_namespace_id: NamespaceId::XML,
            xml_prefix_id: PrefixId::XML,
            xmlns_prefix_id: PrefixId::XMLNS,
        }
    }

    #[inline]
    pub(crate) fn arena(&self) -> &XmlArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut XmlArena {
        &mut self.arena
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
