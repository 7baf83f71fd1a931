//! Per-value decision between canned substitution, literal encoding and recursive expansion

use std::rc::Rc;

use error_stack::Report;
use tracing::trace;

use super::recursion::RecursionTypes;
use super::session::GenerationSession;
use crate::codegen::Expr;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::{TargetType, TypeRef, Value};

/// How one accessor return value is turned into source
#[derive(Debug, Clone)]
pub enum Classification {
    /// `null`, whatever the declared type
    Null,
    /// Identity already has an expression, canned or generated earlier in this invocation
    Canned(Expr),
    /// Handed to the literal encoder
    Literal,
    /// Expanded by a nested snapshot of the given target
    Recurse(Rc<TargetType>),
}

/// `NotLiteralizable` for `value`
pub fn not_literalizable(value: &Value) -> Report<Error> {
    Report::new(Error::NotLiteralizable {
        value:     value.describe(),
        type_name: value.type_name(),
        identity:  value.identity(),
    })
}

/// Classify `value`, returned by an accessor declared to return `declared`
///
/// Only reads the session; recording the resulting expression is up to the caller.
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] when the value would be expanded while it is already in
/// progress, and [`Error::NotLiteralizable`] when no rule applies to it.
pub fn classify(
    value: &Value,
    declared: &TypeRef,
    ctx: &Context,
    recursion: &RecursionTypes,
    session: &GenerationSession,
) -> Result<Classification> {
    if value.is_null() {
        return Ok(Classification::Null);
    }

    let identity = value.identity();
    if let Some(expr) = identity.and_then(|id| session.lookup(id)) {
        trace!(value = %value.describe(), "Reusing recorded expression");
        return Ok(Classification::Canned(expr.clone()));
    }

    if ctx.is_literalizable(declared) {
        return Ok(Classification::Literal);
    }

    if let Some(target) = recursion.get(declared) {
        if let Some(id) = identity.filter(|id| session.cycles().is_in_progress(*id)) {
            return Err(session.cycles().cycle_error(id));
        }
        return Ok(Classification::Recurse(target));
    }

    Err(not_literalizable(value)
        .attach(format!("Declared type {declared} is neither literalizable nor a recursion type")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::{AccessorError, LiveObject, ObjectId, Primitive, RuntimeType};
    use crate::snapshot::CannedRepresentations;

    struct Pet;

    impl LiveObject for Pet {
        fn runtime_type(&self) -> RuntimeType { RuntimeType::new("com.example.Pet") }

        fn invoke(&self, accessor: &str) -> std::result::Result<Value, AccessorError> {
            Err(AccessorError::UnknownAccessor {
                type_name: "com.example.Pet".into(),
                accessor:  accessor.to_string(),
            })
        }
    }

    fn pet_type() -> TypeRef { TypeRef::named("com.example.Pet") }

    fn recursion() -> RecursionTypes { RecursionTypes::new([TargetType::interface("com.example.Pet")]) }

    #[test]
    fn test_null_short_circuits() {
        let session = GenerationSession::default();
        let classification = classify(
            &Value::Null,
            &TypeRef::named("com.example.Unknown"),
            &Context::create(),
            &RecursionTypes::default(),
            &session,
        )
        .unwrap();
        assert!(matches!(classification, Classification::Null));
    }

    #[test]
    fn test_canned_identity_wins_over_everything_else() {
        let pet = Rc::new(Pet);
        let canned = CannedRepresentations::new().with(&pet, Expr::return_variable("rex"));
        let session = GenerationSession::new(&canned);

        let classification = classify(
            &Value::object(&pet),
            &pet_type(),
            &Context::create().with_literalizable([TargetType::interface("com.example.Pet")]),
            &recursion(),
            &session,
        )
        .unwrap();
        assert!(matches!(classification, Classification::Canned(expr) if expr.is_return()));
    }

    #[test]
    fn test_literalizable_declared_type_comes_before_recursion() {
        let session = GenerationSession::default();
        let ctx = Context::create();

        let int = classify(
            &Value::Int(4),
            &TypeRef::Primitive(Primitive::Int),
            &ctx,
            &recursion(),
            &session,
        )
        .unwrap();
        assert!(matches!(int, Classification::Literal));

        let pets = classify(
            &Value::list([]),
            &TypeRef::generic("java.util.List", [pet_type()]),
            &ctx,
            &recursion(),
            &session,
        )
        .unwrap();
        assert!(matches!(pets, Classification::Literal));
    }

    #[test]
    fn test_recursion_type_and_cycle_guard() {
        let pet = Rc::new(Pet);
        let mut session = GenerationSession::default();
        let ctx = Context::create();

        let classification =
            classify(&Value::object(&pet), &pet_type(), &ctx, &recursion(), &session).unwrap();
        assert!(
            matches!(classification, Classification::Recurse(target) if target.name().as_str() == "com.example.Pet")
        );

        session.enter(ObjectId::of(&pet), || "rex".to_string()).unwrap();
        let report =
            classify(&Value::object(&pet), &pet_type(), &ctx, &recursion(), &session).unwrap_err();
        assert!(report.current_context().is_cycle());
    }

    #[test]
    fn test_unknown_declared_type_is_not_literalizable() {
        let pet = Rc::new(Pet);
        let report = classify(
            &Value::object(&pet),
            &pet_type(),
            &Context::create(),
            &RecursionTypes::default(),
            &GenerationSession::default(),
        )
        .unwrap_err();

        let Error::NotLiteralizable {
            type_name,
            identity,
            ..
        } = report.current_context()
        else {
            panic!("expected NotLiteralizable");
        };
        assert_eq!(type_name.as_str(), "com.example.Pet");
        assert_eq!(*identity, Some(ObjectId::of(&pet)));
    }
}
