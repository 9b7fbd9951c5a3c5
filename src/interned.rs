use crate::idmap::{IdIndex, IdMap};

// Ids into the interning tables of a Tree. They are only meaningful for the
// tree that issued them.
macro_rules! interned_id {
    ($(#[$meta:meta])* $id:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
        pub struct $id(u32);

        impl IdIndex for $id {
            fn from_raw(raw: u32) -> $id {
                $id(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

interned_id!(
    /// An expanded name: local name plus namespace.
    NameId
);

interned_id!(
    /// A namespace URI.
    ///
    /// The empty URI has an id too: it stands for "no namespace" in names
    /// and for an undeclaration in namespace declarations.
    NamespaceId
);

interned_id!(
    /// A namespace prefix. The empty prefix names the default namespace.
    PrefixId
);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) struct ExpandedName {
    pub(crate) local: String,
    pub(crate) namespace_id: NamespaceId,
}

impl ExpandedName {
    pub(crate) fn new(local: &str, namespace_id: NamespaceId) -> Self {
        ExpandedName {
            local: local.to_string(),
            namespace_id,
        }
    }
}

impl NamespaceId {
    pub(crate) const NONE: NamespaceId = NamespaceId(0);
    pub(crate) const XML: NamespaceId = NamespaceId(1);
}

impl PrefixId {
    pub(crate) const EMPTY: PrefixId = PrefixId(0);
    pub(crate) const XML: PrefixId = PrefixId(1);
    pub(crate) const XMLNS: PrefixId = PrefixId(2);
}

pub(crate) type NameLookup = IdMap<NameId, ExpandedName>;
pub(crate) type NamespaceLookup = IdMap<NamespaceId, String>;
pub(crate) type PrefixLookup = IdMap<PrefixId, String>;
