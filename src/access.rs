use crate::error::Error;
use crate::tree::{Node, Tree};
use crate::xmlvalue::{Element, Value, ValueType};

/// ## Read-only access
impl Tree {
    /// Access the value of a node.
    #[inline]
    pub fn value(&self, node: Node) -> &Value {
        self.arena()[node.get()].get()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena_mut()[node.get()].get_mut()
    }

    /// The type of a node's value.
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// Is this node an element?
    pub fn is_element(&self, node: Node) -> bool {
        matches!(self.value(node), Value::Element(_))
    }

    /// Access the element value of a node, if it is one.
    pub fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        match self.value_mut(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The text of a text node, if it is one.
    pub fn text_str(&self, node: Node) -> Option<&str> {
        match self.value(node) {
            Value::Text(text) => Some(text.get()),
            _ => None,
        }
    }

    /// Obtain the document element from the document root.
    /// Returns [`Error::NotRoot`] if this is not the document root.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    ///
    /// let root = tree.parse("<p>Example</p>").unwrap();
    ///
    /// let doc_el = tree.document_element(root).unwrap();
    ///
    /// let p_name = tree.name("p").unwrap();
    /// assert_eq!(tree.element(doc_el).unwrap().name(), p_name);
    /// ```
    pub fn document_element(&self, node: Node) -> Result<Node, Error> {
        if self.value_type(node) != ValueType::Root {
            return Err(Error::NotRoot(node));
        }
        self.children(node)
            .find(|child| self.is_element(*child))
            .ok_or(Error::NoElementAtTopLevel)
    }

    /// Get parent node.
    ///
    /// Returns [`None`] if this is the root node or if the node is unattached.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].parent().map(Node::new)
    }

    /// Get first child.
    pub fn first_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].first_child().map(Node::new)
    }

    /// Get last child.
    pub fn last_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].last_child().map(Node::new)
    }

    /// Get next sibling.
    pub fn next_sibling(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].next_sibling().map(Node::new)
    }

    /// Iterator over the child nodes of this node.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(self.arena()).map(Node::new)
    }

    /// Iterator over ancestor nodes, including this one.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    ///
    /// let root = tree.parse("<a><b><c/></b></a>").unwrap();
    /// let a = tree.document_element(root).unwrap();
    /// let b = tree.first_child(a).unwrap();
    /// let c = tree.first_child(b).unwrap();
    ///
    /// let ancestors = tree.ancestors(c).collect::<Vec<_>>();
    /// assert_eq!(ancestors, vec![c, b, a, root]);
    /// ```
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().ancestors(self.arena()).map(Node::new)
    }

    /// Iterator over the element children of this node.
    pub fn child_elements(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.children(node).filter(|child| self.is_element(*child))
    }
}
