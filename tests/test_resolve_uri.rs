use rstest::rstest;

use xqname::functions::resolve_uri;
use xqname::{ErrorCode, StaticContext, StaticContextBuilder};

#[rstest]
#[case("b/c", "http://h/a/", "http://h/a/b/c")]
#[case("../x", "http://h/a/b/", "http://h/a/x")]
#[case("", "http://h/a/b?q#f", "http://h/a/b?q")]
#[case("#top", "http://h/a/b", "http://h/a/b#top")]
#[case("../../../up", "http://h/a/", "http://h/up")]
#[case("x.xml", "file:///home/user/", "file:///home/user/x.xml")]
fn test_resolve(#[case] relative: &str, #[case] base: &str, #[case] expected: &str) {
    let resolved = resolve_uri(&StaticContext::default(), Some(relative), Some(base))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), expected);
}

#[test]
fn test_relative_base() {
    let err = resolve_uri(&StaticContext::default(), Some("b"), Some("rel/base")).unwrap_err();
    assert_eq!(err.code, ErrorCode::FORG0002);
}

#[rstest]
#[case("http://h/%zz", "http://h/")]
#[case("a b", "http://h/")]
#[case("a", "http://h/ x")]
#[case("a", "1http://h/")]
fn test_invalid(#[case] relative: &str, #[case] base: &str) {
    let err = resolve_uri(&StaticContext::default(), Some(relative), Some(base)).unwrap_err();
    assert_eq!(err.code, ErrorCode::FORG0002);
}

#[rstest]
#[case("urn:isbn:0451450523")]
#[case("http://Example.ORG/./a/../b")]
#[case("mailto:someone@example.org")]
fn test_absolute_relative_unchanged(#[case] relative: &str) {
    let resolved = resolve_uri(&StaticContext::default(), Some(relative), Some("http://h/"))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), relative);
}

#[test]
fn test_empty_relative() {
    assert_eq!(
        resolve_uri(&StaticContext::default(), None, Some("http://h/")).unwrap(),
        None
    );
}

#[test]
fn test_static_base() {
    let context = StaticContextBuilder::new()
        .with_base_uri("http://example.com/docs/index.html")
        .build();
    let resolved = resolve_uri(&context, Some("chapter1.xml"), None)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), "http://example.com/docs/chapter1.xml");
}

#[test]
fn test_explicit_base_overrides_static_base() {
    let context = StaticContextBuilder::new()
        .with_base_uri("http://example.com/docs/")
        .build();
    let resolved = resolve_uri(&context, Some("x"), Some("http://other/"))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), "http://other/x");
}

#[test]
fn test_invalid_static_base() {
    let context = StaticContextBuilder::new().with_base_uri("relative/").build();
    let err = resolve_uri(&context, Some("x"), None).unwrap_err();
    assert_eq!(err.code, ErrorCode::FORG0002);
}

#[test]
fn test_no_static_base() {
    let err = resolve_uri(&StaticContext::default(), Some("x"), None).unwrap_err();
    assert_eq!(err.code, ErrorCode::FONS0005);
}

#[test]
fn test_opaque_base() {
    let err = resolve_uri(&StaticContext::default(), Some("x"), Some("urn:isbn:1")).unwrap_err();
    assert_eq!(err.code, ErrorCode::FORG0009);
}

const RFC_BASE: &str = "http://a/b/c/d;p?q";

// RFC 3986 section 5.4.1
#[rstest]
#[case("g:h", "g:h")]
#[case("g", "http://a/b/c/g")]
#[case("./g", "http://a/b/c/g")]
#[case("g/", "http://a/b/c/g/")]
#[case("/g", "http://a/g")]
#[case("//g", "http://g")]
#[case("?y", "http://a/b/c/d;p?y")]
#[case("g?y", "http://a/b/c/g?y")]
#[case("#s", "http://a/b/c/d;p?q#s")]
#[case("g#s", "http://a/b/c/g#s")]
#[case("g?y#s", "http://a/b/c/g?y#s")]
#[case(";x", "http://a/b/c/;x")]
#[case("g;x", "http://a/b/c/g;x")]
#[case("g;x?y#s", "http://a/b/c/g;x?y#s")]
#[case("", "http://a/b/c/d;p?q")]
#[case(".", "http://a/b/c/")]
#[case("./", "http://a/b/c/")]
#[case("..", "http://a/b/")]
#[case("../", "http://a/b/")]
#[case("../g", "http://a/b/g")]
#[case("../..", "http://a/")]
#[case("../../", "http://a/")]
#[case("../../g", "http://a/g")]
fn test_rfc_normal_examples(#[case] relative: &str, #[case] expected: &str) {
    let resolved = resolve_uri(&StaticContext::default(), Some(relative), Some(RFC_BASE))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), expected);
}

// RFC 3986 section 5.4.2, strict parser
#[rstest]
#[case("../../../g", "http://a/g")]
#[case("../../../../g", "http://a/g")]
#[case("/./g", "http://a/g")]
#[case("/../g", "http://a/g")]
#[case("g.", "http://a/b/c/g.")]
#[case(".g", "http://a/b/c/.g")]
#[case("g..", "http://a/b/c/g..")]
#[case("..g", "http://a/b/c/..g")]
#[case("./../g", "http://a/b/g")]
#[case("./g/.", "http://a/b/c/g/")]
#[case("g/./h", "http://a/b/c/g/h")]
#[case("g/../h", "http://a/b/c/h")]
#[case("g;x=1/./y", "http://a/b/c/g;x=1/y")]
#[case("g;x=1/../y", "http://a/b/c/y")]
#[case("g?y/./x", "http://a/b/c/g?y/./x")]
#[case("g?y/../x", "http://a/b/c/g?y/../x")]
#[case("g#s/./x", "http://a/b/c/g#s/./x")]
#[case("g#s/../x", "http://a/b/c/g#s/../x")]
#[case("http:g", "http:g")]
fn test_rfc_abnormal_examples(#[case] relative: &str, #[case] expected: &str) {
    let resolved = resolve_uri(&StaticContext::default(), Some(relative), Some(RFC_BASE))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), expected);
}

#[rstest]
#[case("b", "http:/a/", "http:/a/b")]
#[case("café", "http://h/", "http://h/café")]
#[case("", "http://h", "http://h")]
#[case("x", "HTTP://EX.org:80/a/", "HTTP://EX.org:80/a/x")]
fn test_resolve_keeps_base_text(#[case] relative: &str, #[case] base: &str, #[case] expected: &str) {
    let resolved = resolve_uri(&StaticContext::default(), Some(relative), Some(base))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.as_str(), expected);
}
