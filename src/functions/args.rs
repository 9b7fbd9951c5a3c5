use crate::error::QueryError;
use crate::qname::QName;
use crate::tree::{Node, Tree};
use crate::xdm::{Atomic, Item, Sequence};

// Argument conversion for the sequence-level function bodies. Arguments
// arrive evaluated and atomized where the signature asks for atomic values;
// all that is left is checking cardinality and item type.

fn describe(item: &Item) -> String {
    match item {
        Item::Atomic(atomic) => atomic.type_name().to_string(),
        Item::Node(_) => "node()".to_string(),
    }
}

/// Zero or one item.
pub(super) fn optional_item<'a>(
    arg: &'a [Item],
    expected: &str,
) -> Result<Option<&'a Item>, QueryError> {
    match arg {
        [] => Ok(None),
        [item] => Ok(Some(item)),
        _ => Err(QueryError::type_error(format!(
            "expected {}?, got a sequence of {} items",
            expected,
            arg.len()
        ))),
    }
}

/// `xs:string?`
pub(super) fn optional_string(arg: &[Item]) -> Result<Option<&str>, QueryError> {
    let Some(item) = optional_item(arg, "xs:string")? else {
        return Ok(None);
    };
    match item {
        Item::Atomic(atomic) => atomic.as_string().map(Some).ok_or_else(|| {
            QueryError::type_error(format!("expected xs:string, got {}", describe(item)))
        }),
        Item::Node(_) => Err(QueryError::type_error(format!(
            "expected xs:string, got {}",
            describe(item)
        ))),
    }
}

/// `xs:string`
pub(super) fn required_string(arg: &[Item]) -> Result<&str, QueryError> {
    optional_string(arg)?
        .ok_or_else(|| QueryError::type_error("expected xs:string, got empty sequence"))
}

/// `xs:QName?`
pub(super) fn optional_qname(arg: &[Item]) -> Result<Option<&QName>, QueryError> {
    match optional_item(arg, "xs:QName")? {
        None => Ok(None),
        Some(Item::Atomic(Atomic::QName(qname))) => Ok(Some(qname)),
        Some(item) => Err(QueryError::type_error(format!(
            "expected xs:QName, got {}",
            describe(item)
        ))),
    }
}

/// `element()`
pub(super) fn element(tree: &Tree, arg: &[Item]) -> Result<Node, QueryError> {
    match optional_item(arg, "element()")? {
        Some(Item::Node(node)) if tree.is_element(*node) => Ok(*node),
        Some(item) => Err(QueryError::type_error(format!(
            "expected element(), got {}",
            describe(item)
        ))),
        None => Err(QueryError::type_error(
            "expected element(), got empty sequence",
        )),
    }
}

pub(super) fn optional(item: Option<Item>) -> Sequence {
    item.into_iter().collect()
}
