use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::encoding::detect_encoding;
use crate::entity::parse_entities;
use crate::error::Error;
use crate::interned::{NamespaceId, PrefixId};
use crate::tree::{Node, Tree};
use crate::xmlvalue::Value;

// an element whose start tag has been read but not yet closed with `>` or `/>`
struct StartTag {
    prefix: String,
    local: String,
    attributes: Vec<(String, String, String)>,
}

impl StartTag {
    fn lexical(&self) -> String {
        lexical_name(&self.prefix, &self.local)
    }
}

fn lexical_name(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

struct TreeBuilder<'t> {
    tree: &'t mut Tree,
    root: Node,
    current: Node,
    start_tag: Option<StartTag>,
    open: Vec<String>,
}

impl<'t> TreeBuilder<'t> {
    fn new(tree: &'t mut Tree) -> Self {
        let root = tree.new_node(Value::Root);
        TreeBuilder {
            tree,
            root,
            current: root,
            start_tag: None,
            open: Vec::new(),
        }
    }

    fn element_start(&mut self, prefix: &str, local: &str) {
        self.start_tag = Some(StartTag {
            prefix: prefix.to_string(),
            local: local.to_string(),
            attributes: Vec::new(),
        });
    }

    fn attribute(&mut self, prefix: &str, local: &str, value: &str) -> Result<(), Error> {
        let value = parse_entities(value)?.into_owned();
        if let Some(start_tag) = &mut self.start_tag {
            start_tag
                .attributes
                .push((prefix.to_string(), local.to_string(), value));
        }
        Ok(())
    }

    // resolve a prefix while the element itself is not in the tree yet: its
    // own declarations first, then the ancestors
    fn resolve_prefix(
        &self,
        declarations: &[(PrefixId, NamespaceId)],
        prefix_id: PrefixId,
    ) -> Option<NamespaceId> {
        match declarations.iter().find(|(p, _)| *p == prefix_id) {
            Some((_, namespace_id)) if *namespace_id == self.tree.no_namespace_id => None,
            Some((_, namespace_id)) => Some(*namespace_id),
            None => self.tree.namespace_for_prefix(self.current, prefix_id),
        }
    }

    fn open_element(&mut self, empty: bool) -> Result<(), Error> {
        let Some(start_tag) = self.start_tag.take() else {
            return Ok(());
        };

        let mut declarations: Vec<(PrefixId, NamespaceId)> = Vec::new();
        let mut attributes = Vec::new();
        for (prefix, local, value) in start_tag.attributes.iter() {
            let declared_prefix = match (prefix.as_str(), local.as_str()) {
                ("", "xmlns") => Some(""),
                ("xmlns", local) => Some(local),
                _ => None,
            };
            match declared_prefix {
                Some(declared_prefix) => {
                    let prefix_id = self.tree.add_prefix(declared_prefix)?;
                    if declarations.iter().any(|(p, _)| *p == prefix_id) {
                        return Err(Error::DuplicateNamespaceDeclaration(
                            declared_prefix.to_string(),
                        ));
                    }
                    let namespace_id = self.tree.add_namespace(value)?;
                    self.tree.reserved_check(prefix_id, namespace_id)?;
                    declarations.push((prefix_id, namespace_id));
                }
                None => attributes.push((prefix, local, value)),
            }
        }

        let prefix_id = self.tree.add_prefix(&start_tag.prefix)?;
        let namespace_id = match self.resolve_prefix(&declarations, prefix_id) {
            Some(namespace_id) => namespace_id,
            None if start_tag.prefix.is_empty() => self.tree.no_namespace_id,
            None => return Err(Error::UnknownPrefix(start_tag.prefix.clone())),
        };
        let name_id = self.tree.add_name_ns(&start_tag.local, namespace_id)?;
        let element = self.tree.new_element(name_id);
        for (prefix_id, namespace_id) in declarations {
            self.tree.declare_namespace(element, prefix_id, namespace_id)?;
        }
        self.tree.append(self.current, element)?;

        // unprefixed attributes are never in a namespace; two attributes
        // may not share an expanded name even when their prefixes differ
        let mut seen = Vec::with_capacity(attributes.len());
        for (prefix, local, value) in attributes {
            let namespace_id = if prefix.is_empty() {
                self.tree.no_namespace_id
            } else {
                let prefix_id = self.tree.add_prefix(prefix)?;
                self.tree
                    .namespace_for_prefix(element, prefix_id)
                    .ok_or_else(|| Error::UnknownPrefix(prefix.clone()))?
            };
            let name_id = self.tree.add_name_ns(local, namespace_id)?;
            if seen.contains(&name_id) {
                return Err(Error::DuplicateAttribute(lexical_name(prefix, local)));
            }
            seen.push(name_id);
            self.tree.set_attribute(element, name_id, value)?;
        }

        if !empty {
            self.open.push(start_tag.lexical());
            self.current = element;
        }
        Ok(())
    }

    fn close_element(&mut self, prefix: &str, local: &str) -> Result<(), Error> {
        let found = lexical_name(prefix, local);
        let expected = self.open.pop().ok_or_else(|| Error::InvalidCloseTag {
            expected: String::new(),
            found: found.clone(),
        })?;
        if expected != found {
            return Err(Error::InvalidCloseTag { expected, found });
        }
        self.current = self.tree.parent(self.current).unwrap_or(self.root);
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        if self.current == self.root {
            if text.chars().all(|c| c.is_ascii_whitespace()) {
                return Ok(());
            }
            return Err(Error::TextAtTopLevel);
        }
        self.tree.append_text(self.current, text)
    }

    fn append(&mut self, node: Node) -> Result<(), Error> {
        self.tree.append(self.current, node)
    }

    fn finish(self) -> Result<Node, Error> {
        if let Some(unclosed) = self.open.last() {
            return Err(Error::UnclosedTag(unclosed.clone()));
        }
        self.tree.document_element(self.root)?;
        tracing::debug!(
            nodes = self.root.get().descendants(self.tree.arena()).count(),
            "parsed document"
        );
        Ok(self.root)
    }
}

/// ## Parsing
impl Tree {
    /// Parse a string containing XML into a document node.
    ///
    /// Namespace declarations, including undeclarations (`xmlns=""`,
    /// `xmlns:p=""`), are recorded on the elements that make them. Element and
    /// attribute names are resolved against the declarations in scope;
    /// an unknown prefix is an error.
    ///
    /// ```rust
    /// let mut tree = xqname::Tree::new();
    /// let root = tree.parse(r#"<p:a xmlns:p="urn:p"/>"#).unwrap();
    /// let a = tree.document_element(root).unwrap();
    /// let name = tree.element(a).unwrap().name();
    /// assert_eq!(tree.name_ns_str(name), ("a", "urn:p"));
    /// ```
    pub fn parse(&mut self, xml: &str) -> Result<Node, Error> {
        let mut builder = TreeBuilder::new(self);

        for token in Tokenizer::from(xml) {
            match token? {
                Token::ElementStart { prefix, local, .. } => {
                    builder.element_start(prefix.as_str(), local.as_str());
                }
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => {
                    builder.attribute(prefix.as_str(), local.as_str(), value.as_str())?;
                }
                Token::ElementEnd { end, .. } => match end {
                    ElementEnd::Open => builder.open_element(false)?,
                    ElementEnd::Empty => builder.open_element(true)?,
                    ElementEnd::Close(prefix, local) => {
                        builder.close_element(prefix.as_str(), local.as_str())?
                    }
                },
                Token::Text { text } => {
                    let text = parse_entities(text.as_str())?;
                    builder.text(&text)?;
                }
                Token::Cdata { text, .. } => {
                    builder.text(text.as_str())?;
                }
                Token::Comment { text, .. } => {
                    let comment = builder.tree.new_comment(text.as_str());
                    builder.append(comment)?;
                }
                Token::ProcessingInstruction {
                    target, content, ..
                } => {
                    let pi = builder
                        .tree
                        .new_processing_instruction(target.as_str(), content.map(|c| c.as_str()));
                    builder.append(pi)?;
                }
                Token::DtdStart { .. } | Token::EmptyDtd { .. } => {
                    return Err(Error::DtdUnsupported);
                }
                Token::Declaration { .. }
                | Token::EntityDeclaration { .. }
                | Token::DtdEnd { .. } => {}
            }
        }

        builder.finish()
    }

    /// Parse bytes containing XML into a document node.
    ///
    /// The encoding is detected from a byte order mark or the XML
    /// declaration and defaults to UTF-8.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<Node, Error> {
        let encoding = detect_encoding(bytes)?;
        let (xml, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(Error::UnknownEncoding);
        }
        self.parse(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_namespace() {
        let mut tree = Tree::new();
        let root = tree.parse(r#"<a xmlns="urn:d"><b/></a>"#).unwrap();
        let a = tree.document_element(root).unwrap();
        let b = tree.first_child(a).unwrap();
        let name = tree.element(b).unwrap().name();
        assert_eq!(tree.name_ns_str(name), ("b", "urn:d"));
    }

    #[test]
    fn test_parse_undeclared_default_namespace() {
        let mut tree = Tree::new();
        let root = tree.parse(r#"<a xmlns="urn:d"><b xmlns=""/></a>"#).unwrap();
        let a = tree.document_element(root).unwrap();
        let b = tree.first_child(a).unwrap();
        let name = tree.element(b).unwrap().name();
        assert_eq!(tree.name_ns_str(name), ("b", ""));
    }

    #[test]
    fn test_parse_prefixed_attribute() {
        let mut tree = Tree::new();
        let root = tree
            .parse(r#"<a xmlns:p="urn:p" p:x="1" y="2" xml:lang="en"/>"#)
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let p = tree.namespace("urn:p").unwrap();
        let x = tree.name_ns("x", p).unwrap();
        let y = tree.name("y").unwrap();
        let lang = tree.name_ns("lang", tree.xml_namespace()).unwrap();
        let element = tree.element(a).unwrap();
        assert_eq!(element.get_attribute(x), Some("1"));
        assert_eq!(element.get_attribute(y), Some("2"));
        assert_eq!(element.get_attribute(lang), Some("en"));
        assert_eq!(element.declarations().len(), 1);
    }

    #[test]
    fn test_parse_entities_in_text() {
        let mut tree = Tree::new();
        let root = tree.parse("<a>x &amp; y</a>").unwrap();
        let a = tree.document_element(root).unwrap();
        let text = tree.first_child(a).unwrap();
        assert_eq!(tree.text_str(text), Some("x & y"));
    }

    #[test]
    fn test_parse_bytes() {
        let mut tree = Tree::new();
        let root = tree
            .parse_bytes(b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a>\xe9</a>")
            .unwrap();
        let a = tree.document_element(root).unwrap();
        let text = tree.first_child(a).unwrap();
        assert_eq!(tree.text_str(text), Some("é"));
    }
}
