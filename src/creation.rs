use crate::error::Error;
use crate::interned::{NameId, NamespaceId, PrefixId};
use crate::tree::{Node, Tree, XMLNS_NAMESPACE};
use crate::xmlvalue::{Comment, Element, ProcessingInstruction, Text, Value, ValueType};

/// ## Creation
///
/// New nodes are created unattached; [`Tree::append`] places them in a
/// document. The structure is kept well-formed: only the root and elements
/// take children, the root takes a single element, and adjacent text is
/// merged into one text node.
impl Tree {
    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena_mut().new_node(value))
    }

    /// Create a new document root holding the given document element.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    /// let doc = tree.add_name("doc").unwrap();
    /// let doc_el = tree.new_element(doc);
    /// let root = tree.new_root(doc_el).unwrap();
    /// assert_eq!(tree.document_element(root).unwrap(), doc_el);
    /// ```
    pub fn new_root(&mut self, document_element: Node) -> Result<Node, Error> {
        if !self.is_element(document_element) {
            return Err(Error::NotElement(document_element));
        }
        let root = self.new_node(Value::Root);
        self.append(root, document_element)?;
        Ok(root)
    }

    /// Create a new, unattached element node.
    pub fn new_element(&mut self, name_id: NameId) -> Node {
        self.new_node(Value::Element(Element::new(name_id)))
    }

    /// Create a new, unattached text node.
    pub fn new_text(&mut self, text: &str) -> Node {
        self.new_node(Value::Text(Text::new(text.to_string())))
    }

    /// Create a new, unattached comment node.
    pub fn new_comment(&mut self, comment: &str) -> Node {
        self.new_node(Value::Comment(Comment::new(comment.to_string())))
    }

    /// Create a new, unattached processing instruction node.
    pub fn new_processing_instruction(&mut self, target: &str, data: Option<&str>) -> Node {
        self.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.map(|s| s.to_string()),
        )))
    }

    /// Append a child to the end of the children of the given parent.
    ///
    /// Appending text right after a text node extends that text node instead.
    pub fn append(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        self.structure_check(parent, child)?;
        if let Some(text) = self.text_str(child).map(|s| s.to_string()) {
            if let Some(Value::Text(last)) = self
                .last_child(parent)
                .map(|last| self.value_mut(last))
            {
                last.text.push_str(&text);
                child.get().remove(self.arena_mut());
                return Ok(());
            }
        }
        parent
            .get()
            .checked_append(child.get(), self.arena_mut())
            .map_err(|_| Error::InvalidParent(parent))
    }

    /// Append an element with the given name, returning the new node.
    pub fn append_element(&mut self, parent: Node, name_id: NameId) -> Result<Node, Error> {
        let element = self.new_element(name_id);
        self.append(parent, element)?;
        Ok(element)
    }

    /// Append text to a parent node.
    pub fn append_text(&mut self, parent: Node, text: &str) -> Result<(), Error> {
        let text = self.new_text(text);
        self.append(parent, text)
    }

    fn structure_check(&self, parent: Node, child: Node) -> Result<(), Error> {
        if self.parent(child).is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        match (self.value_type(parent), self.value_type(child)) {
            (_, ValueType::Root) => Err(Error::InvalidParent(parent)),
            (ValueType::Root, ValueType::Element) => {
                if self.child_elements(parent).next().is_some() {
                    Err(Error::MultipleElementsAtTopLevel)
                } else {
                    Ok(())
                }
            }
            (ValueType::Root, ValueType::Text) => {
                let whitespace = self
                    .text_str(child)
                    .map(|t| t.chars().all(|c| c.is_ascii_whitespace()))
                    .unwrap_or(false);
                if whitespace {
                    Ok(())
                } else {
                    Err(Error::TextAtTopLevel)
                }
            }
            (ValueType::Root, _) | (ValueType::Element, _) => Ok(()),
            _ => Err(Error::InvalidParent(parent)),
        }
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, node: Node, name_id: NameId, value: &str) -> Result<(), Error> {
        let element = self.element_mut(node).ok_or(Error::NotElement(node))?;
        element.set_attribute(name_id, value.to_string());
        Ok(())
    }

    /// Declare a namespace prefix on an element.
    ///
    /// Declaring a prefix to the empty namespace undeclares it for the
    /// element and its descendants. The reserved bindings are enforced: `xml`
    /// only binds to the XML namespace, the XML namespace only to `xml`, and
    /// `xmlns` and its namespace cannot be declared at all.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    /// let root = tree.parse("<doc/>").unwrap();
    /// let doc = tree.document_element(root).unwrap();
    /// let p = tree.add_prefix("p").unwrap();
    /// let ns = tree.add_namespace("urn:p").unwrap();
    /// tree.declare_namespace(doc, p, ns).unwrap();
    /// assert_eq!(tree.element(doc).unwrap().get_declaration(p), Some(ns));
    /// ```
    pub fn declare_namespace(
        &mut self,
        node: Node,
        prefix_id: PrefixId,
        namespace_id: NamespaceId,
    ) -> Result<(), Error> {
        self.reserved_check(prefix_id, namespace_id)?;
        let element = self.element_mut(node).ok_or(Error::NotElement(node))?;
        element.declare(prefix_id, namespace_id);
        Ok(())
    }

    /// Undeclare a prefix on an element (`xmlns:p=""`, or `xmlns=""` for the
    /// empty prefix).
    pub fn undeclare_namespace(&mut self, node: Node, prefix_id: PrefixId) -> Result<(), Error> {
        let no_namespace = self.no_namespace_id;
        self.declare_namespace(node, prefix_id, no_namespace)
    }

    pub(crate) fn reserved_check(
        &self,
        prefix_id: PrefixId,
        namespace_id: NamespaceId,
    ) -> Result<(), Error> {
        let is_xml_prefix = prefix_id == self.xml_prefix_id;
        let is_xml_namespace = namespace_id == self.xml_namespace_id;
        let reserved = prefix_id == self.xmlns_prefix_id
            || is_xml_prefix != is_xml_namespace
            || self.namespace_str(namespace_id) == XMLNS_NAMESPACE;
        if reserved {
            return Err(Error::ReservedPrefix {
                prefix: self.prefix_str(prefix_id).to_string(),
                uri: self.namespace_str(namespace_id).to_string(),
            });
        }
        Ok(())
    }
}
