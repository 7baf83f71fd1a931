//! The accessor contract a live object exposes to the snapshot engine

use std::fmt;

use thiserror::Error;

use super::target_type::TargetType;
use super::type_name::TypeName;
use super::value::{ObjectId, Value};

/// Failure raised by an accessor while it is being invoked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessorError {
    /// The object exposes no accessor under that name
    #[error("{type_name} has no accessor named {accessor}")]
    UnknownAccessor {
        /// Runtime type of the object
        type_name: TypeName,
        /// Requested accessor name
        accessor:  String,
    },

    /// The accessor ran and reported a failure
    #[error("Accessor {accessor} failed: {reason}")]
    Failed {
        /// Accessor name
        accessor: String,
        /// What went wrong
        reason:   String,
    },
}

impl AccessorError {
    /// Create a `Failed` error for `accessor`
    #[must_use]
    pub fn failed(accessor: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Failed {
            accessor: accessor.into(),
            reason:   reason.to_string(),
        }
    }
}

/// Runtime type of a live object: its own name plus every type it can be assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeType {
    /// Concrete type name
    pub name:       TypeName,
    /// Interfaces and superclasses, in no particular order
    pub supertypes: Vec<TypeName>,
}

impl RuntimeType {
    /// A runtime type with no supertypes
    #[must_use]
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name:       name.into(),
            supertypes: Vec::new(),
        }
    }

    /// Add a supertype
    #[must_use]
    pub fn implements(mut self, supertype: impl Into<TypeName>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Whether a value of this type can be assigned to `other`, comparing erased names
    #[must_use]
    pub fn is_subtype_of(&self, other: &TypeName) -> bool {
        let other = other.erased();
        self.name.erased() == other || self.supertypes.iter().any(|s| s.erased() == other)
    }
}

/// An object whose zero-argument accessors can be invoked by name
///
/// Implemented by `#[derive(LiveObject)]` for plain structs, or by hand for objects whose
/// accessors compute their values.
pub trait LiveObject: 'static {
    /// Concrete type of this object
    fn runtime_type(&self) -> RuntimeType;

    /// Invoke the zero-argument accessor `accessor`
    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError>;

    /// Textual form used in diagnostics
    fn describe(&self) -> String {
        format!(
            "{}@{}",
            self.runtime_type().name,
            ObjectId::of_ref(self)
        )
    }
}

/// A type with a statically known schema
pub trait Described {
    /// Fully-qualified name of the type
    fn type_name() -> TypeName;

    /// Schema used when the type is a snapshot target
    fn describe_type() -> TargetType;
}
