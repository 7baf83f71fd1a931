//! Caller-supplied substitutions keyed by identity

use std::collections::HashMap;
use std::rc::Rc;

use error_stack::Report;

use crate::codegen::Expr;
use crate::error::{Error, Result};
use crate::model::{LiveObject, ObjectId, Value};

/// Caller-supplied expressions used verbatim in place of generating a snapshot
///
/// Entries are matched by reference identity, never by value. Each key is kept alive by the table
/// so its identity cannot be reused by another allocation.
#[derive(Debug, Clone, Default)]
pub struct CannedRepresentations {
    entries: HashMap<ObjectId, (Value, Expr)>,
}

impl CannedRepresentations {
    /// An empty table
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Use `expr` wherever `object` is returned by an accessor
    pub fn insert<T: LiveObject>(&mut self, object: &Rc<T>, expr: Expr) {
        let key = Value::object(object);
        self.entries.insert(ObjectId::of(object), (key, expr));
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with<T: LiveObject>(mut self, object: &Rc<T>, expr: Expr) -> Self {
        self.insert(object, expr);
        self
    }

    /// Key an entry by an arbitrary value; only lists and objects carry an identity
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `key` is a value without reference identity.
    pub fn insert_value(&mut self, key: &Value, expr: Expr) -> Result<()> {
        let id = key.identity().ok_or_else(|| {
            Report::new(Error::invalid(
                "canned representation key",
                format!("{} has no reference identity", key.describe()),
            ))
        })?;
        self.entries.insert(id, (key.clone(), expr));
        Ok(())
    }

    /// Canned expression for `id`
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Expr> { self.entries.get(&id).map(|(_, e)| e) }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ObjectId, &Value, &Expr)> {
        self.entries.iter().map(|(id, (key, expr))| (*id, key, expr))
    }
}
