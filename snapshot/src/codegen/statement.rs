//! Deferred code generation

use std::fmt;

use crate::context::Context;
use crate::error::Result;
use crate::model::TypeRef;

/// A piece of code that can be materialized into source text
///
/// Implementations may defer all work until `generate` is called and may cache what they
/// produce; calling `generate` again must yield the same text.
pub trait Statement: fmt::Debug {
    /// Source text of the statement
    ///
    /// # Errors
    ///
    /// Returns the failure that prevented the statement from being generated.
    fn generate(&self, ctx: &Context) -> Result<String>;

    /// Static type the generated expression evaluates to
    fn described_type(&self) -> TypeRef;
}
