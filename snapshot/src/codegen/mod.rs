//! Minimal expression builder and pretty printer for generated source

mod expr;
mod pretty;
mod statement;

pub use expr::{AnonymousClass, Expr, Literal, MethodOverride};
pub use pretty::format_source;
pub use statement::Statement;
