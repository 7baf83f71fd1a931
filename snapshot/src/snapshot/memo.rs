//! Identity-keyed memo of generated expressions

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::codegen::Expr;
use crate::model::ObjectId;

/// Expressions already produced during one invocation, by identity
///
/// The first expression recorded for an identity wins; every later occurrence of that identity
/// reuses it verbatim.
#[derive(Debug, Default)]
pub struct Memoizer {
    entries: HashMap<ObjectId, Expr>,
}

impl Memoizer {
    /// Expression recorded for `id`
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Expr> { self.entries.get(&id) }

    /// Record `expr` for `id` unless one is already known; returns whether it was stored
    pub fn put(&mut self, id: ObjectId, expr: Expr) -> bool {
        match self.entries.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(expr);
                true
            }
        }
    }

    /// Number of recorded identities
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
