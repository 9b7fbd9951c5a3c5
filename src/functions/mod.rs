//! The QName and URI functions.
//!
//! Every function has a typed entry point taking Rust values, for callers
//! that already know their argument types, and a sequence-level body
//! registered in the [`FunctionLibrary`], for an evaluator that hands over
//! evaluated argument sequences.

mod args;
mod qnames;
mod uris;

use ahash::HashMap;

use crate::context::StaticContext;
use crate::error::{ErrorCode, QueryError};
use crate::tree::Tree;
use crate::xdm::Sequence;

pub use qnames::{
    in_scope_prefixes, local_name_from_qname, namespace_uri_for_prefix,
    namespace_uri_from_qname, prefix_from_qname, qname, resolve_qname,
};
pub use uris::resolve_uri;

/// What a function body gets to see besides its arguments.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    pub tree: &'a Tree,
    pub static_context: &'a StaticContext,
}

impl<'a> CallContext<'a> {
    pub fn new(tree: &'a Tree, static_context: &'a StaticContext) -> Self {
        Self {
            tree,
            static_context,
        }
    }
}

/// A function body working on evaluated argument sequences.
pub type FunctionBody = fn(&CallContext<'_>, &[Sequence]) -> Result<Sequence, QueryError>;

#[derive(Clone, Copy)]
struct FunctionDef {
    name: &'static str,
    min_arity: usize,
    max_arity: usize,
    body: FunctionBody,
}

/// Registry of the QName and URI functions, keyed by local name.
///
/// Names may be given with or without the `fn:` prefix.
///
/// ```rust
/// use xqname::{CallContext, FunctionLibrary, Item, StaticContext, Tree};
///
/// let tree = Tree::new();
/// let static_context = StaticContext::default();
/// let context = CallContext::new(&tree, &static_context);
/// let library = FunctionLibrary::new();
///
/// let result = library
///     .call(&context, "fn:QName", &[vec![Item::string("urn:x")], vec![Item::string("x:a")]])
///     .unwrap();
/// let local = library.call(&context, "local-name-from-QName", &[result]).unwrap();
/// assert_eq!(local.len(), 1);
/// ```
#[derive(Clone)]
pub struct FunctionLibrary {
    functions: HashMap<&'static str, FunctionDef>,
}

impl std::fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.functions.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("FunctionLibrary")
            .field("functions", &names)
            .finish()
    }
}

impl FunctionLibrary {
    pub fn new() -> Self {
        let mut library = FunctionLibrary {
            functions: HashMap::default(),
        };
        library.register("QName", 2, 2, qnames::qname_fn);
        library.register("prefix-from-QName", 1, 1, qnames::prefix_from_qname_fn);
        library.register("local-name-from-QName", 1, 1, qnames::local_name_from_qname_fn);
        library.register(
            "namespace-uri-from-QName",
            1,
            1,
            qnames::namespace_uri_from_qname_fn,
        );
        library.register(
            "namespace-uri-for-prefix",
            2,
            2,
            qnames::namespace_uri_for_prefix_fn,
        );
        library.register("in-scope-prefixes", 1, 1, qnames::in_scope_prefixes_fn);
        library.register("resolve-QName", 2, 2, qnames::resolve_qname_fn);
        library.register("resolve-uri", 1, 2, uris::resolve_uri_fn);
        library
    }

    fn register(&mut self, name: &'static str, min_arity: usize, max_arity: usize, body: FunctionBody) {
        self.functions.insert(
            name,
            FunctionDef {
                name,
                min_arity,
                max_arity,
                body,
            },
        );
    }

    fn lookup(&self, name: &str, arity: usize) -> Option<&FunctionDef> {
        let local = name.strip_prefix("fn:").unwrap_or(name);
        self.functions
            .get(local)
            .filter(|def| (def.min_arity..=def.max_arity).contains(&arity))
    }

    /// Is there a function with this name and arity?
    pub fn contains(&self, name: &str, arity: usize) -> bool {
        self.lookup(name, arity).is_some()
    }

    /// Call a function with evaluated arguments.
    ///
    /// Fails with `XPST0017` if no function has this name and arity. Errors
    /// raised by the function carry its name.
    pub fn call(
        &self,
        context: &CallContext<'_>,
        name: &str,
        args: &[Sequence],
    ) -> Result<Sequence, QueryError> {
        let def = self.lookup(name, args.len()).ok_or_else(|| {
            QueryError::new(
                ErrorCode::XPST0017,
                format!("unknown function: {}#{}", name, args.len()),
            )
        })?;
        tracing::trace!(function = def.name, arity = args.len(), "calling function");
        (def.body)(context, args).map_err(|e| e.in_function(def.name))
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}
