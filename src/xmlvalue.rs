use crate::interned::{NameId, NamespaceId, PrefixId};

/// The kind of a node, without its content.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    Root,
    Element,
    Text,
    ProcessingInstruction,
    Comment,
}

/// What a node in a [`Tree`](crate::Tree) holds.
#[derive(Debug, Clone)]
pub enum Value {
    /// The document node. Its single element child is the document element.
    Root,
    /// An element with its name, attributes and namespace declarations.
    Element(Element),
    Text(Text),
    ProcessingInstruction(ProcessingInstruction),
    Comment(Comment),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Root => ValueType::Root,
            Value::Element(_) => ValueType::Element,
            Value::Text(_) => ValueType::Text,
            Value::Comment(_) => ValueType::Comment,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
        }
    }
}

/// Namespace declarations made on a single element, in declaration order.
///
/// A declaration to the empty namespace is an undeclaration: it hides any
/// binding of that prefix inherited from an ancestor.
pub type Declarations = Vec<(PrefixId, NamespaceId)>;

/// XML element value.
///
/// Example: `<foo/>` or `<p:foo xmlns:p="urn:p" bar="baz"/>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) name_id: NameId,
    pub(crate) declarations: Declarations,
    pub(crate) attributes: Vec<(NameId, String)>,
}

impl Element {
    pub(crate) fn new(name_id: NameId) -> Self {
        Element {
            name_id,
            declarations: Declarations::new(),
            attributes: Vec::new(),
        }
    }

    /// The name of the element.
    pub fn name(&self) -> NameId {
        self.name_id
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name_id: NameId) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name_id)
            .map(|(_, value)| value.as_str())
    }

    /// The attributes of the element, in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (NameId, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name_id, value)| (*name_id, value.as_str()))
    }

    pub(crate) fn set_attribute(&mut self, name_id: NameId, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name_id) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name_id, value)),
        }
    }

    /// Get the namespace declared for a prefix on this element.
    ///
    /// This does not look at ancestors; see [`Tree::scope`](crate::Tree::scope)
    /// for that.
    pub fn get_declaration(&self, prefix_id: PrefixId) -> Option<NamespaceId> {
        self.declarations
            .iter()
            .find(|(p, _)| *p == prefix_id)
            .map(|(_, ns)| *ns)
    }

    /// Namespace declarations made on this element only.
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    // a later declaration of the same prefix on the same element replaces
    // the earlier one
    pub(crate) fn declare(&mut self, prefix_id: PrefixId, namespace_id: NamespaceId) {
        match self.declarations.iter_mut().find(|(p, _)| *p == prefix_id) {
            Some((_, existing)) => *existing = namespace_id,
            None => self.declarations.push((prefix_id, namespace_id)),
        }
    }
}

/// XML text value.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) text: String,
}

impl Text {
    pub(crate) fn new(text: String) -> Self {
        Text { text }
    }

    /// Get the text value.
    pub fn get(&self) -> &str {
        &self.text
    }
}

/// XML comment.
///
/// Example: `<!-- foo -->`.
#[derive(Debug, Clone)]
pub struct Comment {
    pub(crate) text: String,
}

impl Comment {
    pub(crate) fn new(text: String) -> Self {
        Comment { text }
    }

    /// Get the comment text.
    pub fn get(&self) -> &str {
        &self.text
    }
}

/// XML processing instruction value.
///
/// Example: `<?foo?>` or `<?foo bar?>`.
#[derive(Debug, Clone)]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: Option<String>,
}

impl ProcessingInstruction {
    pub(crate) fn new(target: String, data: Option<String>) -> Self {
        ProcessingInstruction { target, data }
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get processing instruction data.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}
