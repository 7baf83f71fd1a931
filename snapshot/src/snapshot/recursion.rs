//! The set of types expanded recursively

use std::rc::Rc;

use crate::model::{RuntimeType, TargetType, TypeName, TypeRef};

/// Types whose values are expanded by this same snapshot mechanism
///
/// Passed unchanged through every recursive call of one invocation.
#[derive(Debug, Clone, Default)]
pub struct RecursionTypes {
    types: Vec<Rc<TargetType>>,
}

impl RecursionTypes {
    /// Later duplicates of an already present type name are ignored
    #[must_use]
    pub fn new(types: impl IntoIterator<Item = TargetType>) -> Self {
        let mut set = Self::default();
        for target in types {
            if set.get_by_name(target.name()).is_none() {
                set.types.push(Rc::new(target));
            }
        }
        set
    }

    /// Recursion type registered for the erased declared type
    #[must_use]
    pub fn get(&self, declared: &TypeRef) -> Option<Rc<TargetType>> {
        declared
            .erased_name()
            .and_then(|name| self.get_by_name(&name))
    }

    /// Recursion type registered under `name`
    #[must_use]
    pub fn get_by_name(&self, name: &TypeName) -> Option<Rc<TargetType>> {
        let name = name.erased();
        self.types.iter().find(|t| t.name() == &name).cloned()
    }

    /// First recursion type a value of `runtime` type can be assigned to
    #[must_use]
    pub fn find_for(&self, runtime: &RuntimeType) -> Option<Rc<TargetType>> {
        self.types
            .iter()
            .find(|t| t.is_assignable_from(runtime))
            .cloned()
    }

    /// Registered types in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<TargetType>> { self.types.iter() }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize { self.types.len() }

    /// Whether no type is registered
    #[must_use]
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}
