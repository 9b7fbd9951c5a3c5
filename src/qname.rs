use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::error::{ErrorCode, QueryError};
use crate::tree::XML_NAMESPACE;

// NameStartChar minus ':' (XML 1.0 fifth edition)
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// Is `s` an `NCName`, an XML name without a colon?
pub fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// Is `s` a lexical QName, `NCName (':' NCName)?`
///
/// ```rust
/// use xqname::is_qname;
///
/// assert!(is_qname("foo"));
/// assert!(is_qname("ex:foo"));
/// assert!(!is_qname(":foo"));
/// assert!(!is_qname("a:b:c"));
/// ```
pub fn is_qname(s: &str) -> bool {
    match s.split_once(':') {
        Some((prefix, local)) => is_ncname(prefix) && is_ncname(local),
        None => is_ncname(s),
    }
}

/// Split a lexical QName into its optional prefix and its local part.
///
/// Returns `None` if `s` is not a lexical QName.
pub fn split_qname(s: &str) -> Option<(Option<&str>, &str)> {
    if !is_qname(s) {
        return None;
    }
    Some(match s.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, s),
    })
}

/// An expanded QName value, `xs:QName`.
///
/// Two QNames are equal when their local part and namespace URI are equal;
/// the prefix is a presentation hint only. A QName with a prefix always has
/// a non-empty namespace URI.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawQName")
)]
pub struct QName {
    prefix: Option<String>,
    local: String,
    uri: Option<String>,
}

// deserialized fields, checked by QName::parse before they become a QName
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawQName {
    prefix: Option<String>,
    local: String,
    uri: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawQName> for QName {
    type Error = QueryError;

    fn try_from(raw: RawQName) -> Result<Self, QueryError> {
        if !is_ncname(&raw.local) {
            return Err(QueryError::new(
                ErrorCode::FORG0001,
                format!("invalid NCName: '{}'", raw.local),
            ));
        }
        let lexical = match raw.prefix {
            Some(prefix) => format!("{}:{}", prefix, raw.local),
            None => raw.local,
        };
        QName::parse(raw.uri.as_deref().unwrap_or(""), &lexical)
    }
}

impl QName {
    // callers guarantee the invariants
    pub(crate) fn new_unchecked(prefix: Option<&str>, local: &str, uri: Option<&str>) -> Self {
        QName {
            prefix: prefix.map(|s| s.to_string()),
            local: local.to_string(),
            uri: uri.filter(|u| !u.is_empty()).map(|s| s.to_string()),
        }
    }

    /// Construct a QName from a namespace URI and a lexical QName.
    ///
    /// An unprefixed name in the XML namespace is given the `xml` prefix.
    /// Fails with `FORG0001` if the lexical form is not a QName, if a prefix
    /// is given without a namespace URI, or if the `xml` prefix and the XML
    /// namespace are not used together.
    ///
    /// ```rust
    /// use xqname::QName;
    ///
    /// let lang = QName::parse("http://www.w3.org/XML/1998/namespace", "lang").unwrap();
    /// assert_eq!(lang.prefix(), Some("xml"));
    /// assert_eq!(lang.to_string(), "xml:lang");
    /// ```
    pub fn parse(uri: &str, name: &str) -> Result<Self, QueryError> {
        let lexical = if !name.contains(':') && uri == XML_NAMESPACE {
            format!("xml:{}", name)
        } else {
            name.to_string()
        };
        let (prefix, local) = split_qname(&lexical).ok_or_else(|| {
            QueryError::new(
                ErrorCode::FORG0001,
                format!("invalid QName value: '{}'", name),
            )
        })?;
        if prefix.is_some() && uri.is_empty() {
            return Err(QueryError::new(
                ErrorCode::FORG0001,
                format!("invalid URI value: prefixed name '{}' requires a namespace", name),
            ));
        }
        if (prefix == Some("xml")) != (uri == XML_NAMESPACE) {
            return Err(QueryError::new(
                ErrorCode::FORG0001,
                format!("invalid QName value: '{}' in namespace '{}'", lexical, uri),
            ));
        }
        Ok(Self::new_unchecked(prefix, local, Some(uri)))
    }

    /// A QName without a namespace.
    ///
    /// Fails with `FORG0001` if `local` is not an NCName.
    pub fn local_only(local: &str) -> Result<Self, QueryError> {
        if !is_ncname(local) {
            return Err(QueryError::new(
                ErrorCode::FORG0001,
                format!("invalid NCName: '{}'", local),
            ));
        }
        Ok(Self::new_unchecked(None, local, None))
    }

    /// The local part.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The namespace URI. `None` means the name is not in a namespace.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The `Q{uri}local` form of the name.
    pub fn expanded(&self) -> String {
        format!("Q{{{}}}{}", self.uri.as_deref().unwrap_or(""), self.local)
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.local == other.local && self.uri == other.uri
    }
}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local.hash(state);
        self.uri.hash(state);
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}
