use crate::error::Error;
use crate::interned::{ExpandedName, NameId, NamespaceId, PrefixId};
use crate::tree::Tree;

/// ## Creation and lookup of names, namespaces and prefixes
impl Tree {
    /// Look up name without a namespace.
    pub fn name(&self, local: &str) -> Option<NameId> {
        self.name_ns(local, self.no_namespace_id)
    }

    /// Add name without a namespace.
    /// If the name already exists, return its id.
    pub fn add_name(&mut self, local: &str) -> Result<NameId, Error> {
        self.add_name_ns(local, self.no_namespace_id)
    }

    /// Look up name with a namespace.
    pub fn name_ns(&self, local: &str, namespace_id: NamespaceId) -> Option<NameId> {
        self.name_lookup
            .lookup(&ExpandedName::new(local, namespace_id))
    }

    /// Add name with a namespace.
    /// If the name already exists, return its id.
    ///
    /// Fails with [`Error::TooManyIds`] when the tree has run out of ids.
    pub fn add_name_ns(
        &mut self,
        local: &str,
        namespace_id: NamespaceId,
    ) -> Result<NameId, Error> {
        self.name_lookup
            .intern(ExpandedName::new(local, namespace_id))
    }

    /// Look up namespace.
    pub fn namespace(&self, uri: &str) -> Option<NamespaceId> {
        self.namespace_lookup.lookup(&uri.to_string())
    }

    /// Add namespace.
    /// If the namespace already exists, return its id.
    pub fn add_namespace(&mut self, uri: &str) -> Result<NamespaceId, Error> {
        self.namespace_lookup.intern(uri.to_string())
    }

    /// Look up prefix.
    pub fn prefix(&self, prefix: &str) -> Option<PrefixId> {
        self.prefix_lookup.lookup(&prefix.to_string())
    }

    /// Add prefix.
    /// If the prefix already exists, return its id.
    pub fn add_prefix(&mut self, prefix: &str) -> Result<PrefixId, Error> {
        self.prefix_lookup.intern(prefix.to_string())
    }

    /// The id of the empty namespace, meaning "no namespace".
    pub fn no_namespace(&self) -> NamespaceId {
        self.no_namespace_id
    }

    /// The id of the empty prefix, naming the default namespace.
    pub fn empty_prefix(&self) -> PrefixId {
        self.empty_prefix_id
    }

    /// The id of the `xml` prefix.
    pub fn xml_prefix(&self) -> PrefixId {
        self.xml_prefix_id
    }

    /// The id of the XML namespace.
    pub fn xml_namespace(&self) -> NamespaceId {
        self.xml_namespace_id
    }

    /// The URI of a namespace id.
    pub fn namespace_str(&self, namespace_id: NamespaceId) -> &str {
        self.namespace_lookup.get(namespace_id)
    }

    /// The text of a prefix id.
    pub fn prefix_str(&self, prefix_id: PrefixId) -> &str {
        self.prefix_lookup.get(prefix_id)
    }

    /// The local part of a name.
    pub fn local_name_str(&self, name_id: NameId) -> &str {
        &self.name_lookup.get(name_id).local
    }

    /// The namespace of a name.
    pub fn namespace_for_name(&self, name_id: NameId) -> NamespaceId {
        self.name_lookup.get(name_id).namespace_id
    }

    /// Local part and namespace URI of a name. The URI is empty for names
    /// not in a namespace.
    pub fn name_ns_str(&self, name_id: NameId) -> (&str, &str) {
        let name = self.name_lookup.get(name_id);
        (&name.local, self.namespace_str(name.namespace_id))
    }
}
