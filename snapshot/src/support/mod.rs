//! Ambient support shared by the library and its binary

mod tracing;

pub use self::tracing::{DynamicFilter, TracingLevel};
