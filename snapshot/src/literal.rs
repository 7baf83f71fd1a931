//! Literal encoding of values whose type is registered in a [`Context`]
//!
//! Scalars and strings become source literals, lists become initializer expressions, and custom
//! objects are expanded by a nested snapshot of the descriptor the context (or the recursion set)
//! registers for them. Nested objects go through the caller's session, so cycle detection and
//! deduplication hold across containers.

use std::rc::Rc;

use tracing::{trace, warn};

use crate::codegen::{Expr, Literal, format_source};
use crate::context::Context;
use crate::error::Result;
use crate::model::{LiveObject, TargetType, TypeRef, Value};
use crate::snapshot::{self, GenerationSession, RecursionTypes};

/// Render `value` as a standalone literal expression
///
/// # Errors
///
/// Returns [`Error::NotLiteralizable`](crate::Error::NotLiteralizable) when an object inside the
/// value has no registered type in `ctx`, and propagates any failure of a nested snapshot.
pub fn load(value: &Value, ctx: &Context) -> Result<String> {
    let mut session = GenerationSession::default();
    session.retain(value);
    let expr = encode(
        value,
        None,
        ctx,
        &Rc::new(RecursionTypes::default()),
        &mut session,
    )?;
    Ok(format_source(&expr.to_source(ctx)?, ctx.options()))
}

pub(crate) fn encode(
    value: &Value,
    declared: Option<&TypeRef>,
    ctx: &Context,
    recursion: &Rc<RecursionTypes>,
    session: &mut GenerationSession,
) -> Result<Expr> {
    if let Some(expr) = value.identity().and_then(|id| session.lookup(id)) {
        if expr.is_return() {
            warn!(
                value = %value.describe(),
                "Canned method body used in value position, only its returned expression is kept"
            );
        }
        return Ok(expr.clone());
    }

    match value {
        Value::List(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items.iter() {
                session.retain(item);
                elements.push(encode(item, None, ctx, recursion, session)?);
            }
            let expr = Expr::ListInit(elements);
            if let Some(id) = value.identity() {
                session.record(id, expr.clone());
            }
            Ok(expr)
        }
        Value::Object(object) => {
            let Some(target) = target_for(object.as_ref(), declared, ctx, recursion) else {
                return Err(snapshot::not_literalizable(value).attach(format!(
                    "No registered type can be extended by runtime type {}",
                    object.runtime_type().name
                )));
            };
            trace!(object = %object.describe(), target = %target.name(), "Expanding object literal");
            snapshot::expand(object, target, recursion, ctx, session)
        }
        scalar => Literal::from_value(scalar)
            .map(Expr::Literal)
            .ok_or_else(|| snapshot::not_literalizable(scalar)),
    }
}

/// Descriptor to snapshot `object` with: the declared type's registration when it fits,
/// otherwise the first registered type assignable from the runtime type
fn target_for(
    object: &dyn LiveObject,
    declared: Option<&TypeRef>,
    ctx: &Context,
    recursion: &RecursionTypes,
) -> Option<Rc<TargetType>> {
    let runtime = object.runtime_type();
    let by_declared = declared
        .and_then(TypeRef::erased_name)
        .and_then(|name| ctx.snapshot_type(&name).or_else(|| recursion.get_by_name(&name)))
        .filter(|target| target.is_assignable_from(&runtime));

    by_declared
        .or_else(|| recursion.find_for(&runtime))
        .or_else(|| ctx.snapshot_type_for(&runtime))
}
