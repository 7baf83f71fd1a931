//! Per-invocation identity state

use tracing::trace;

use super::canned::CannedRepresentations;
use super::cycle::CycleDetector;
use super::memo::Memoizer;
use crate::codegen::Expr;
use crate::error::Result;
use crate::model::{ObjectId, Value};

/// Identity state of one top-level snapshot invocation
///
/// Created fresh for every top-level generation and threaded by `&mut` through every recursive
/// call; never shared between invocations.
#[derive(Debug, Default)]
pub struct GenerationSession {
    cycles:   CycleDetector,
    memo:     Memoizer,
    /// Every value looked at, so no identity is recycled before the session ends
    retained: Vec<Value>,
}

impl GenerationSession {
    /// Session whose memo starts out holding every canned representation
    #[must_use]
    pub fn new(canned: &CannedRepresentations) -> Self {
        let mut session = Self::default();
        for (id, key, expr) in canned.iter() {
            session.memo.put(id, expr.clone());
            session.retained.push(key.clone());
        }
        trace!(canned = canned.len(), "Opened generation session");
        session
    }

    /// Mark `id` in progress
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`](crate::Error::CycleDetected) when `id` is already in
    /// progress.
    pub fn enter(&mut self, id: ObjectId, describe: impl FnOnce() -> String) -> Result<()> {
        self.cycles.enter(id, describe)
    }

    /// Unmark `id`
    pub fn leave(&mut self, id: ObjectId) { self.cycles.leave(id); }

    /// The active chain of objects being expanded
    #[must_use]
    pub const fn cycles(&self) -> &CycleDetector { &self.cycles }

    /// Canned or previously generated expression for `id`
    #[must_use]
    pub fn lookup(&self, id: ObjectId) -> Option<&Expr> { self.memo.get(id) }

    /// Remember `expr` for `id`; an earlier entry is kept
    pub fn record(&mut self, id: ObjectId, expr: Expr) {
        if self.memo.put(id, expr) {
            trace!(object = %id, "Recorded snapshot expression");
        }
    }

    /// Keep `value` alive until the session ends
    pub fn retain(&mut self, value: &Value) {
        if value.identity().is_some() {
            self.retained.push(value.clone());
        }
    }

    /// Number of identities with a recorded expression
    #[must_use]
    pub fn memoized(&self) -> usize { self.memo.len() }
}
