use xqname::{Error, Tree, Value, ValueType};

#[test]
fn test_parse_invalid_close_tag() {
    let mut tree = Tree::new();
    let err = tree.parse("<doc></a></doc>").unwrap_err();
    assert!(matches!(err, Error::InvalidCloseTag { .. }));
}

#[test]
fn test_parse_invalid_close_tag_prefix() {
    let mut tree = Tree::new();
    let err = tree
        .parse(r#"<doc xmlns:a="http://example.com"></a:doc></doc>"#)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCloseTag { .. }));
}

#[test]
fn test_unknown_element_prefix() {
    let mut tree = Tree::new();
    let err = tree.parse("<doc><a:p/></doc>").unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(prefix) if prefix == "a"));
}

#[test]
fn test_unknown_attribute_prefix() {
    let mut tree = Tree::new();
    let err = tree.parse(r#"<doc a:x="1"/>"#).unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(prefix) if prefix == "a"));
}

#[test]
fn test_undeclared_prefix_is_unknown() {
    let mut tree = Tree::new();
    let err = tree
        .parse(r#"<doc xmlns:a="urn:a"><x xmlns:a=""><a:p/></x></doc>"#)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(_)));
}

#[test]
fn test_reserved_prefixes() {
    let mut tree = Tree::new();
    assert!(matches!(
        tree.parse(r#"<doc xmlns:xml="urn:other"/>"#),
        Err(Error::ReservedPrefix { .. })
    ));
    assert!(matches!(
        tree.parse(r#"<doc xmlns:p="http://www.w3.org/XML/1998/namespace"/>"#),
        Err(Error::ReservedPrefix { .. })
    ));
    assert!(matches!(
        tree.parse(r#"<doc xmlns:xmlns="urn:other"/>"#),
        Err(Error::ReservedPrefix { .. })
    ));
    assert!(tree
        .parse(r#"<doc xmlns:xml="http://www.w3.org/XML/1998/namespace"/>"#)
        .is_ok());
}

#[test]
fn test_unclosed_tag() {
    let mut tree = Tree::new();
    let err = tree.parse("<doc><a>").unwrap_err();
    assert!(matches!(err, Error::UnclosedTag(name) if name == "a"));
}

#[test]
fn test_dtd_unsupported() {
    let mut tree = Tree::new();
    let err = tree.parse("<!DOCTYPE doc><doc/>").unwrap_err();
    assert!(matches!(err, Error::DtdUnsupported));
}

#[test]
fn test_text_at_top_level() {
    let mut tree = Tree::new();
    let root = tree.parse("<doc/>").unwrap();
    let text = tree.new_text("text");
    assert!(matches!(tree.append(root, text), Err(Error::TextAtTopLevel)));
    assert!(tree.append_text(root, "\n  ").is_ok());
}

#[test]
fn test_no_element() {
    let mut tree = Tree::new();
    let err = tree.parse("<!-- only a comment -->").unwrap_err();
    assert!(matches!(err, Error::NoElementAtTopLevel));
}

#[test]
fn test_invalid_entity() {
    let mut tree = Tree::new();
    let err = tree.parse("<doc>&nope;</doc>").unwrap_err();
    assert!(matches!(err, Error::InvalidEntity(_)));
}

#[test]
fn test_tokenizer_error() {
    let mut tree = Tree::new();
    let err = tree.parse("<doc").unwrap_err();
    assert!(matches!(err, Error::Parser(_)));
}

#[test]
fn test_node_types() {
    let mut tree = Tree::new();
    let root = tree
        .parse("<!--c--><?pi data?><doc>text<![CDATA[<raw>]]></doc>")
        .unwrap();
    let types = tree
        .children(root)
        .map(|node| tree.value_type(node))
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            ValueType::Comment,
            ValueType::ProcessingInstruction,
            ValueType::Element
        ]
    );
    let doc = tree.document_element(root).unwrap();
    // text and CDATA merge into a single text node
    let text = tree.first_child(doc).unwrap();
    assert_eq!(tree.text_str(text), Some("text<raw>"));
    assert!(tree.next_sibling(text).is_none());
    let pi = tree.children(root).nth(1).unwrap();
    let Value::ProcessingInstruction(pi) = tree.value(pi) else {
        panic!("expected a processing instruction");
    };
    assert_eq!(pi.target(), "pi");
    assert_eq!(pi.data(), Some("data"));
}

#[test]
fn test_several_documents_share_names() {
    let mut tree = Tree::new();
    let first = tree.parse(r#"<a xmlns="urn:d"/>"#).unwrap();
    let second = tree.parse(r#"<a xmlns="urn:d"/>"#).unwrap();
    let a1 = tree.document_element(first).unwrap();
    let a2 = tree.document_element(second).unwrap();
    assert_ne!(a1, a2);
    assert_eq!(
        tree.element(a1).unwrap().name(),
        tree.element(a2).unwrap().name()
    );
}

#[test]
fn test_parse_bytes_with_bom() {
    let mut tree = Tree::new();
    let root = tree.parse_bytes(b"\xef\xbb\xbf<doc>caf\xc3\xa9</doc>").unwrap();
    let doc = tree.document_element(root).unwrap();
    let text = tree.first_child(doc).unwrap();
    assert_eq!(tree.text_str(text), Some("café"));
}

#[test]
fn test_duplicate_attribute() {
    let mut tree = Tree::new();
    let err = tree.parse(r#"<a x="1" x="2"/>"#).unwrap_err();
    assert!(matches!(err, Error::DuplicateAttribute(name) if name == "x"));
}

#[test]
fn test_duplicate_attribute_by_expanded_name() {
    let mut tree = Tree::new();
    let err = tree
        .parse(r#"<a xmlns:p="urn:x" xmlns:q="urn:x" p:x="1" q:x="2"/>"#)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateAttribute(name) if name == "q:x"));
}

#[test]
fn test_same_local_name_in_different_namespaces() {
    let mut tree = Tree::new();
    assert!(tree
        .parse(r#"<a xmlns:p="urn:p" xmlns:q="urn:q" x="0" p:x="1" q:x="2"/>"#)
        .is_ok());
}

#[test]
fn test_duplicate_namespace_declaration() {
    let mut tree = Tree::new();
    let err = tree
        .parse(r#"<a xmlns:p="urn:1" xmlns:p="urn:2"/>"#)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateNamespaceDeclaration(prefix) if prefix == "p"));
    let err = tree.parse(r#"<a xmlns="urn:1" xmlns=""/>"#).unwrap_err();
    assert!(matches!(err, Error::DuplicateNamespaceDeclaration(prefix) if prefix.is_empty()));
}

#[test]
fn test_many_distinct_names_stay_distinct() {
    let mut tree = Tree::new();
    let count = 70_000;
    let mut xml = String::from("<r>");
    for i in 0..count {
        xml.push_str(&format!("<e{}/>", i));
    }
    xml.push_str("</r>");
    let root = tree.parse(&xml).unwrap();
    let r = tree.document_element(root).unwrap();
    let last = tree.last_child(r).unwrap();
    let name = tree.element(last).unwrap().name();
    assert_eq!(tree.name_ns_str(name), ("e69999", ""));
}

#[test]
fn test_many_namespaces_keep_declarations() {
    let mut tree = Tree::new();
    for i in 0..70_000 {
        tree.add_namespace(&format!("urn:n{}", i)).unwrap();
    }
    let root = tree.parse(r#"<a xmlns:p="urn:last"/>"#).unwrap();
    let a = tree.document_element(root).unwrap();
    let scope = tree.scope(a).unwrap();
    assert_eq!(scope.lookup("p"), Some("urn:last"));
    let p = tree.prefix("p").unwrap();
    let declared = tree.element(a).unwrap().get_declaration(p).unwrap();
    assert_ne!(declared, tree.no_namespace());
}
