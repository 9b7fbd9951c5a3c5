use std::fmt::{Display, Formatter};

use url::Url;

use crate::error::{ErrorCode, QueryError};

/// A URI reference, `xs:anyURI`.
///
/// The text is kept as given. On construction it is classified against the
/// RFC 3986 `URI-reference` grammar: it is *valid* if it matches, and
/// *absolute* if it also has a scheme. Non-ASCII characters are accepted as
/// in IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Uri {
    text: String,
    valid: bool,
    absolute: bool,
}

impl Uri {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (valid, absolute) = match classify(&text) {
            Some(absolute) => (true, absolute),
            None => (false, false),
        };
        Uri {
            text,
            valid,
            absolute,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Valid and has a scheme.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Resolve `reference` against this URI as base, following RFC 3986
    /// section 5.2: merge paths, remove dot segments and recompose the
    /// components. The text of both URIs is kept as written; nothing is
    /// case-folded or percent-encoded.
    ///
    /// An absolute reference is returned unchanged. The base must be a valid
    /// absolute URI (`FORG0002`) with a hierarchical path, so an opaque base
    /// such as `urn:isbn:1` fails with `FORG0009`.
    ///
    /// ```rust
    /// use xqname::Uri;
    ///
    /// let base = Uri::new("http://h/a/b");
    /// let resolved = base.resolve(&Uri::new("../c?q#f")).unwrap();
    /// assert_eq!(resolved.as_str(), "http://h/c?q#f");
    /// ```
    pub fn resolve(&self, reference: &Uri) -> Result<Uri, QueryError> {
        let r = match Components::split(&reference.text) {
            Some(r) if reference.valid => r,
            _ => {
                return Err(QueryError::new(
                    ErrorCode::FORG0002,
                    format!("invalid URI: '{}'", reference),
                ))
            }
        };
        if reference.is_absolute() {
            return Ok(reference.clone());
        }
        let base = match Components::split(&self.text) {
            Some(base) if self.valid => base,
            _ => {
                return Err(QueryError::new(
                    ErrorCode::FORG0002,
                    format!("invalid base URI: '{}'", self),
                ))
            }
        };
        let Some(scheme) = base.scheme else {
            return Err(QueryError::new(
                ErrorCode::FORG0002,
                format!("base URI is not absolute: '{}'", self),
            ));
        };
        if base.authority.is_some() {
            Url::parse(&self.text).map_err(|e| {
                QueryError::new(
                    ErrorCode::FORG0002,
                    format!("invalid base URI: '{}': {}", self, e),
                )
            })?;
        } else if !base.path.starts_with('/') {
            return Err(QueryError::new(
                ErrorCode::FORG0009,
                format!(
                    "cannot resolve '{}' against non-hierarchical base '{}'",
                    reference, self
                ),
            ));
        }

        let (authority, path, query) = match r.authority {
            Some(authority) => (Some(authority), remove_dot_segments(r.path), r.query),
            None if r.path.is_empty() => (
                base.authority,
                base.path.to_string(),
                r.query.or(base.query),
            ),
            None if r.path.starts_with('/') => {
                (base.authority, remove_dot_segments(r.path), r.query)
            }
            None => (
                base.authority,
                remove_dot_segments(&merge(&base, r.path)),
                r.query,
            ),
        };
        let target = Components {
            scheme: Some(scheme),
            authority,
            path: &path,
            query,
            fragment: r.fragment,
        };
        let resolved = Uri::new(target.recompose());
        tracing::trace!(base = %self, reference = %reference, %resolved, "resolved URI");
        Ok(resolved)
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<String> for Uri {
    fn from(text: String) -> Self {
        Uri::new(text)
    }
}

impl From<&str> for Uri {
    fn from(text: &str) -> Self {
        Uri::new(text)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.text
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

// characters allowed in path, query and fragment besides percent escapes
fn is_pchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '/' | '?') || is_ucschar(c)
}

fn is_ucschar(c: char) -> bool {
    !c.is_ascii() && !c.is_control()
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

// every '%' must start a two digit hex escape, every other char must pass
fn valid_chars(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let escape = (chars.next(), chars.next());
            match escape {
                (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => {}
                _ => return false,
            }
        } else if !allowed(c) {
            return false;
        }
    }
    true
}

fn valid_authority(authority: &str) -> bool {
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            if !valid_chars(userinfo, |c| {
                is_unreserved(c) || is_sub_delim(c) || c == ':' || is_ucschar(c)
            }) {
                return false;
            }
            host_port
        }
        None => authority,
    };
    let (host, port) = if let Some(rest) = host_port.strip_prefix('[') {
        let Some((literal, after)) = rest.split_once(']') else {
            return false;
        };
        if literal.is_empty()
            || !literal
                .chars()
                .all(|c| c.is_ascii_hexdigit() || matches!(c, ':' | '.') || is_unreserved(c))
        {
            return false;
        }
        match after {
            "" => ("", None),
            _ => match after.strip_prefix(':') {
                Some(port) => ("", Some(port)),
                None => return false,
            },
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };
    if let Some(port) = port {
        if !port.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    valid_chars(host, |c| is_unreserved(c) || is_sub_delim(c) || is_ucschar(c))
}

// The five components of a URI reference, split as in RFC 3986 appendix B.
// `None` marks an absent component, which differs from an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Components<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> Components<'a> {
    /// `None` if the text before the first `:` is not a scheme. A relative
    /// reference cannot have `:` in its first segment.
    fn split(text: &'a str) -> Option<Self> {
        let (scheme, rest) = match text.find(&[':', '/', '?', '#'][..]) {
            Some(index) if text[index..].starts_with(':') => {
                let scheme = &text[..index];
                if !is_scheme(scheme) {
                    return None;
                }
                (Some(scheme), &text[index + 1..])
            }
            _ => (None, text),
        };
        let (before_fragment, fragment) = match rest.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment)),
            None => (rest, None),
        };
        let (hier, query) = match before_fragment.split_once('?') {
            Some((hier, query)) => (hier, Some(query)),
            None => (before_fragment, None),
        };
        let (authority, path) = match hier.strip_prefix("//") {
            Some(authority_path) => {
                let end = authority_path.find('/').unwrap_or(authority_path.len());
                (Some(&authority_path[..end]), &authority_path[end..])
            }
            None => (None, hier),
        };
        Some(Components {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    fn is_valid(&self) -> bool {
        self.authority.map_or(true, valid_authority)
            && valid_chars(self.path, |c| is_pchar(c) && c != '?')
            && self.query.map_or(true, |q| valid_chars(q, is_pchar))
            && self.fragment.map_or(true, |f| valid_chars(f, is_pchar))
    }

    // RFC 3986 section 5.3
    fn recompose(&self) -> String {
        let mut text = String::new();
        if let Some(scheme) = self.scheme {
            text.push_str(scheme);
            text.push(':');
        }
        if let Some(authority) = self.authority {
            text.push_str("//");
            text.push_str(authority);
        }
        text.push_str(self.path);
        if let Some(query) = self.query {
            text.push('?');
            text.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            text.push('#');
            text.push_str(fragment);
        }
        text
    }
}

/// Classify a URI reference. `None` if it is not a valid reference, else
/// whether it is absolute.
fn classify(text: &str) -> Option<bool> {
    let components = Components::split(text)?;
    components
        .is_valid()
        .then_some(components.scheme.is_some())
}

// RFC 3986 section 5.2.3
fn merge(base: &Components<'_>, path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{}", path);
    }
    match base.path.rfind('/') {
        Some(index) => format!("{}{}", &base.path[..=index], path),
        None => path.to_string(),
    }
}

// RFC 3986 section 5.2.4
fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            // move the first segment, with its leading '/', to the output
            let start = usize::from(input.starts_with('/'));
            let end = input[start..]
                .find('/')
                .map_or(input.len(), |index| index + start);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

// drop the last segment and its preceding '/'
fn pop_segment(output: &mut String) {
    match output.rfind('/') {
        Some(index) => output.truncate(index),
        None => output.clear(),
    }
}
