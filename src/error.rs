use std::fmt::{Display, Formatter};

use crate::qname::QName;
use crate::tree::Node;

/// Namespace of the standard XQuery/XPath error codes.
pub const ERR_NAMESPACE: &str = "http://www.w3.org/2005/xqt-errors";

/// Errors raised while building or parsing a [`Tree`](crate::Tree).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node is not an element.
    #[error("not an element: {0:?}")]
    NotElement(Node),
    /// The node is not a document root.
    #[error("not a document root: {0:?}")]
    NotRoot(Node),
    /// Only elements and the document root can have children.
    #[error("cannot add children to {0:?}")]
    InvalidParent(Node),
    /// The node is already attached somewhere else in the tree.
    #[error("node is already attached: {0:?}")]
    AlreadyAttached(Node),
    /// A prefix used in an element or attribute name is not declared.
    #[error("unknown prefix: {0}")]
    UnknownPrefix(String),
    /// `xml` bound elsewhere, `xmlns` declared, or the XML namespace bound to
    /// another prefix.
    #[error("prefix '{prefix}' cannot be bound to '{uri}'")]
    ReservedPrefix { prefix: String, uri: String },
    /// The same attribute appears twice on an element, by lexical or by
    /// expanded name.
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),
    /// The same prefix is declared twice on an element.
    #[error("duplicate namespace declaration for prefix '{0}'")]
    DuplicateNamespaceDeclaration(String),
    /// Close tag does not match the open tag.
    #[error("close tag '{found}' does not match open tag '{expected}'")]
    InvalidCloseTag { expected: String, found: String },
    /// Input ended before all elements were closed.
    #[error("unclosed element: {0}")]
    UnclosedTag(String),
    /// `&` without terminating `;`.
    #[error("unclosed entity: {0}")]
    UnclosedEntity(String),
    /// Entity that is neither predefined nor a character reference.
    #[error("invalid entity: {0}")]
    InvalidEntity(String),
    /// DTDs are not processed.
    #[error("DTD is not supported")]
    DtdUnsupported,
    /// The document has no document element.
    #[error("no element at top level")]
    NoElementAtTopLevel,
    /// The document has more than one document element.
    #[error("multiple elements at top level")]
    MultipleElementsAtTopLevel,
    /// Non-whitespace text outside the document element.
    #[error("text at top level")]
    TextAtTopLevel,
    /// Every id for names, namespaces or prefixes in this tree is taken.
    #[error("too many distinct names, namespaces or prefixes")]
    TooManyIds,
    /// The byte input is in an encoding we cannot decode.
    #[error("unknown encoding")]
    UnknownEncoding,
    /// Tokenizer error.
    #[error(transparent)]
    Parser(#[from] xmlparser::Error),
}

/// XQuery/XPath error codes raised by the function library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid value for cast or constructor.
    FORG0001,
    /// Invalid argument to `fn:resolve-uri`.
    FORG0002,
    /// Error in resolving a relative URI against a base URI.
    FORG0009,
    /// No namespace found for prefix.
    FONS0004,
    /// Base URI not defined in the static context.
    FONS0005,
    /// Type error: wrong item type or cardinality.
    XPTY0004,
    /// Unknown function name or arity.
    XPST0017,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FORG0001 => "FORG0001",
            ErrorCode::FORG0002 => "FORG0002",
            ErrorCode::FORG0009 => "FORG0009",
            ErrorCode::FONS0004 => "FONS0004",
            ErrorCode::FONS0005 => "FONS0005",
            ErrorCode::XPTY0004 => "XPTY0004",
            ErrorCode::XPST0017 => "XPST0017",
        }
    }

    /// The code as an `err:` QName, so a query can match on it.
    pub fn qname(&self) -> QName {
        QName::new_unchecked(Some("err"), self.as_str(), Some(ERR_NAMESPACE))
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "err:{}", self.as_str())
    }
}

/// A typed error raised by one of the query functions.
///
/// Errors are final for the enclosing evaluation. `function` names the
/// function that raised it, when the error passed through the
/// [`FunctionLibrary`](crate::FunctionLibrary).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}{}", function_suffix(.function))]
pub struct QueryError {
    pub code: ErrorCode,
    pub message: String,
    pub function: Option<&'static str>,
}

fn function_suffix(function: &Option<&'static str>) -> String {
    match function {
        Some(name) => format!(" (in fn:{})", name),
        None => String::new(),
    }
}

impl QueryError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            function: None,
        }
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::XPTY0004, message)
    }

    /// Attach the name of the function the error surfaced in. An already
    /// attached name is kept.
    pub fn in_function(mut self, name: &'static str) -> Self {
        self.function.get_or_insert(name);
        self
    }
}
