use crate::uri::Uri;

/// Static context: the evaluation settings fixed before a query runs.
///
/// The base URI is taken as given; it is only validated when a function
/// actually resolves against it.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    base_uri: Option<Uri>,
}

impl StaticContext {
    /// The static base URI, if one is configured.
    pub fn base_uri(&self) -> Option<&Uri> {
        self.base_uri.as_ref()
    }
}

/// Builder for [`StaticContext`].
///
/// ```rust
/// use xqname::StaticContextBuilder;
///
/// let context = StaticContextBuilder::new()
///     .with_base_uri("http://example.com/base/")
///     .build();
/// assert_eq!(context.base_uri().unwrap().as_str(), "http://example.com/base/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticContextBuilder {
    base_uri: Option<Uri>,
}

impl StaticContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<Uri>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn build(self) -> StaticContext {
        StaticContext {
            base_uri: self.base_uri,
        }
    }
}
