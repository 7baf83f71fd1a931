//! Reference cycle detection over the chain of objects being expanded

use error_stack::Report;
use tracing::debug;

use crate::error::{Error, ObjectSummary, Result};
use crate::model::ObjectId;

/// Identities whose snapshot is currently being generated
///
/// At any instant the stack holds exactly the objects whose node is on the active call stack, in
/// the order they were entered.
#[derive(Debug, Default)]
pub struct CycleDetector {
    in_progress: Vec<ObjectSummary>,
}

impl CycleDetector {
    /// Mark `id` in progress, failing if it already is
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] naming every object in progress when `id` is one of them.
    pub fn enter(&mut self, id: ObjectId, describe: impl FnOnce() -> String) -> Result<()> {
        if self.is_in_progress(id) {
            return Err(self.cycle_error(id));
        }
        self.in_progress.push(ObjectSummary {
            id,
            description: describe(),
        });
        Ok(())
    }

    /// Unmark `id`; called on success and failure alike
    pub fn leave(&mut self, id: ObjectId) {
        if let Some(position) = self.in_progress.iter().rposition(|o| o.id == id) {
            self.in_progress.remove(position);
        }
    }

    /// Whether `id` is on the active chain
    #[must_use]
    pub fn is_in_progress(&self, id: ObjectId) -> bool {
        self.in_progress.iter().any(|o| o.id == id)
    }

    /// Number of objects in progress
    #[must_use]
    pub fn depth(&self) -> usize { self.in_progress.len() }

    /// `CycleDetected` naming every object currently in progress
    pub fn cycle_error(&self, reentered: ObjectId) -> Report<Error> {
        debug!(object = %reentered, depth = self.depth(), "Reference cycle detected");
        Report::new(Error::CycleDetected {
            objects: self.in_progress.clone(),
        })
        .attach(
            "Supplying a canned representation for one of these objects breaks the cycle",
        )
    }
}
