use super::args::{optional, optional_string, required_string};
use super::CallContext;
use crate::context::StaticContext;
use crate::error::{ErrorCode, QueryError};
use crate::uri::Uri;
use crate::xdm::{Item, Sequence};

/// `fn:resolve-uri($relative as xs:string?, $base as xs:string) as xs:anyURI?`
///
/// With `base` as `None` the static base URI is used. An absolute
/// `relative` is returned as is, without consulting any base.
///
/// Fails with `FORG0002` for an invalid URI, `FONS0005` when a base is
/// needed but none is configured and `FORG0009` when the base cannot be
/// resolved against.
pub fn resolve_uri(
    context: &StaticContext,
    relative: Option<&str>,
    base: Option<&str>,
) -> Result<Option<Uri>, QueryError> {
    let Some(relative) = relative else {
        return Ok(None);
    };
    let relative = Uri::new(relative);
    if !relative.is_valid() {
        return Err(QueryError::new(
            ErrorCode::FORG0002,
            format!("invalid URI: '{}'", relative),
        ));
    }
    if relative.is_absolute() {
        return Ok(Some(relative));
    }
    let resolved = match base {
        Some(base) => Uri::new(base).resolve(&relative)?,
        None => context
            .base_uri()
            .ok_or_else(|| {
                QueryError::new(
                    ErrorCode::FONS0005,
                    "base URI is not defined in the static context",
                )
            })?
            .resolve(&relative)?,
    };
    Ok(Some(resolved))
}

pub(super) fn resolve_uri_fn(
    context: &CallContext<'_>,
    args: &[Sequence],
) -> Result<Sequence, QueryError> {
    let relative = optional_string(&args[0])?;
    let base = match args.get(1) {
        Some(arg) => Some(required_string(arg)?),
        None => None,
    };
    let resolved = resolve_uri(context.static_context, relative, base)?;
    Ok(optional(resolved.map(Item::from)))
}
