//! Accessor schema resolution
//!
//! Turns the method list of a target type into the ordered accessor list a snapshot overrides.
//! The order is part of the output format: overrides are emitted by ascending name, compared
//! byte-wise, so identical types always produce identical source.

use error_stack::Report;
use itertools::Itertools;
use tracing::trace;

use crate::constants::{EQUALS_METHOD, HASH_CODE_METHOD};
use crate::error::{Error, Result};
use crate::model::{MethodDescriptor, TargetType};

fn is_excluded(method: &MethodDescriptor) -> bool {
    method.name == EQUALS_METHOD || method.name == HASH_CODE_METHOD
}

/// Zero-argument accessors of `target`, sorted by name
///
/// `equals` and `hashCode` are dropped whatever their signature. Any other method taking
/// parameters makes the whole type unusable as a snapshot target.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the first other method that takes parameters.
pub fn resolve(target: &TargetType) -> Result<Vec<MethodDescriptor>> {
    let candidates: Vec<&MethodDescriptor> = target
        .methods()
        .iter()
        .filter(|method| !is_excluded(method))
        .collect();

    if let Some(offending) = candidates.iter().find(|m| !m.is_zero_argument()) {
        return Err(Report::new(Error::invalid(
            "snapshot target",
            format!(
                "cannot snapshot {} because public method {}({}) takes parameters",
                target.name(),
                offending.name,
                offending.params.iter().join(", ")
            ),
        ))
        .attach("Only equals() and hashCode() may declare parameters"));
    }

    let accessors: Vec<MethodDescriptor> = candidates
        .into_iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .cloned()
        .collect();

    trace!(
        target = %target.name(),
        accessors = %accessors.iter().map(|m| m.name.as_str()).join(", "),
        "Resolved accessor schema"
    );
    Ok(accessors)
}
