//! Error kinds and the `Result` alias used across the crate

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::model::{ObjectId, TypeName, TypeRef};

/// Result type for the `object_snapshot` library
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Summary of one object implicated in a reference cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Identity of the object
    pub id:          ObjectId,
    /// Textual form of the object, as produced by `LiveObject::describe`
    pub description: String,
}

impl fmt::Display for ObjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.id)
    }
}

fn join_objects(objects: &[ObjectSummary]) -> String {
    objects.iter().map(ToString::to_string).join(", ")
}

/// Error kinds reported by snapshot generation
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied argument or type description is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Expansion re-entered an object that was still being expanded
    #[error("Object graph contains a reference cycle through: {}", join_objects(.objects))]
    CycleDetected {
        /// Every object on the in-progress chain, outermost first
        objects: Vec<ObjectSummary>,
    },

    /// A value has no literal form and no snapshot expansion applies to it
    #[error("Value {value} (of type {type_name}) cannot be expressed as a literal")]
    NotLiteralizable {
        /// Textual form of the value
        value:     String,
        /// Runtime type of the value
        type_name: TypeName,
        /// Identity of the value when it is an object
        identity:  Option<ObjectId>,
    },

    /// An accessor or nested expansion failed while generating
    #[error("Snapshot generation failed: {0}")]
    GenerationFailure(String),
}

impl Error {
    /// Create an "Invalid X" error
    #[must_use]
    pub fn invalid(what: &str, details: impl fmt::Display) -> Self {
        Self::InvalidArgument(format!("Invalid {what}: {details}"))
    }

    /// Create a "Failed to X" error
    #[must_use]
    pub fn failed_to(action: &str, details: impl fmt::Display) -> Self {
        Self::GenerationFailure(format!("Failed to {action}: {details}"))
    }

    /// Identities of every object taking part in a detected cycle
    #[must_use]
    pub fn cycle_members(&self) -> Option<Vec<ObjectId>> {
        match self {
            Self::CycleDetected { objects } => Some(objects.iter().map(|o| o.id).collect()),
            _ => None,
        }
    }

    /// Whether this is a `CycleDetected` error
    #[must_use]
    pub const fn is_cycle(&self) -> bool { matches!(self, Self::CycleDetected { .. }) }

    /// Whether this is a `NotLiteralizable` error
    #[must_use]
    pub const fn is_not_literalizable(&self) -> bool {
        matches!(self, Self::NotLiteralizable { .. })
    }
}

/// Where a snapshotted return value came from
///
/// Attached to `NotLiteralizable` reports so the caller learns which accessor produced the value
/// that could not be turned into source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorOrigin {
    /// Type that declares the accessor
    pub declaring_type: TypeName,
    /// Accessor method name
    pub accessor:       String,
    /// Declared return type of the accessor
    pub return_type:    TypeRef,
}

impl fmt::Display for AccessorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This value came from method {}.{}, which has return type {}",
            self.declaring_type, self.accessor, self.return_type
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_every_object() {
        let error = Error::CycleDetected {
            objects: vec![
                ObjectSummary {
                    id:          ObjectId::from_raw(1),
                    description: "kid".to_string(),
                },
                ObjectSummary {
                    id:          ObjectId::from_raw(2),
                    description: "mom".to_string(),
                },
            ],
        };

        let message = error.to_string();
        assert!(message.contains("kid"));
        assert!(message.contains("mom"));
        assert_eq!(
            error.cycle_members(),
            Some(vec![ObjectId::from_raw(1), ObjectId::from_raw(2)])
        );
    }

    #[test]
    fn test_accessor_origin_display() {
        let origin = AccessorOrigin {
            declaring_type: TypeName::new("com.example.Person"),
            accessor:       "getPet".to_string(),
            return_type:    TypeRef::named("com.example.Pet"),
        };

        assert_eq!(
            origin.to_string(),
            "This value came from method com.example.Person.getPet, which has return type com.example.Pet"
        );
    }
}
