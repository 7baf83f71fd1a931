//! Scoped registry of literalizable types
//!
//! A `Context` is an immutable chain of scopes. Each scope adds literalizable types on top of its
//! parent; opening a child scope never changes what the parent (or a sibling) can see.

mod options;

use std::rc::Rc;

pub use options::FormatOptions;
use tracing::trace;

use crate::constants::BUILTIN_LITERALIZABLE_TYPES;
use crate::model::{RuntimeType, TargetType, TypeName, TypeRef};

#[derive(Debug)]
struct Scope {
    parent:         Option<Rc<Scope>>,
    /// Types the literal encoder handles by value shape
    value_types:    Vec<TypeName>,
    /// Types the literal encoder expands with a snapshot
    snapshot_types: Vec<Rc<TargetType>>,
    options:        Rc<FormatOptions>,
}

impl Scope {
    fn ancestors(self: &Rc<Self>) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self.as_ref()), |scope| scope.parent.as_deref())
    }
}

/// Ambient code generation context
#[derive(Debug, Clone)]
pub struct Context {
    scope: Rc<Scope>,
}

impl Default for Context {
    fn default() -> Self { Self::create() }
}

impl Context {
    /// Root context knowing only the built-in value types
    #[must_use]
    pub fn create() -> Self { Self::with_options(FormatOptions::default()) }

    /// Root context with explicit formatting options
    #[must_use]
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            scope: Rc::new(Scope {
                parent:         None,
                value_types:    BUILTIN_LITERALIZABLE_TYPES
                    .iter()
                    .copied()
                    .map(TypeName::new)
                    .collect(),
                snapshot_types: Vec::new(),
                options:        Rc::new(options),
            }),
        }
    }

    /// Child scope in which values of `types` are literalized by snapshotting them
    #[must_use]
    pub fn with_literalizable(&self, types: impl IntoIterator<Item = TargetType>) -> Self {
        self.child(Vec::new(), types.into_iter().map(Rc::new).collect())
    }

    /// Child scope in which values of the named types are literalized by value shape
    #[must_use]
    pub fn with_literalizable_values(&self, names: impl IntoIterator<Item = TypeName>) -> Self {
        self.child(names.into_iter().collect(), Vec::new())
    }

    /// Child scope sharing already-registered descriptors
    #[must_use]
    pub(crate) fn with_snapshot_types(&self, types: impl IntoIterator<Item = Rc<TargetType>>) -> Self {
        self.child(Vec::new(), types.into_iter().collect())
    }

    fn child(&self, value_types: Vec<TypeName>, snapshot_types: Vec<Rc<TargetType>>) -> Self {
        trace!(
            depth = self.depth() + 1,
            value_types = value_types.len(),
            snapshot_types = snapshot_types.len(),
            "Opening context scope"
        );
        Self {
            scope: Rc::new(Scope {
                parent: Some(Rc::clone(&self.scope)),
                value_types,
                snapshot_types,
                options: Rc::clone(&self.scope.options),
            }),
        }
    }

    /// Formatting options shared by every scope of this chain
    #[must_use]
    pub fn options(&self) -> &FormatOptions { &self.scope.options }

    /// Number of scopes above the root
    #[must_use]
    pub fn depth(&self) -> usize { self.scope.ancestors().count() - 1 }

    /// Whether a value declared as `declared` can be handed to the literal encoder
    #[must_use]
    pub fn is_literalizable(&self, declared: &TypeRef) -> bool {
        match declared {
            TypeRef::Void => false,
            TypeRef::Primitive(_) => true,
            TypeRef::Named { .. } => declared.erased_name().is_some_and(|name| {
                self.is_literalizable_value_type(&name) || self.snapshot_type(&name).is_some()
            }),
        }
    }

    /// Whether `name` is literalized by value shape in this scope or an ancestor
    #[must_use]
    pub fn is_literalizable_value_type(&self, name: &TypeName) -> bool {
        let name = name.erased();
        self.scope
            .ancestors()
            .any(|scope| scope.value_types.contains(&name))
    }

    /// Registered snapshot descriptor for `name`, innermost scope first
    #[must_use]
    pub fn snapshot_type(&self, name: &TypeName) -> Option<Rc<TargetType>> {
        let name = name.erased();
        self.scope.ancestors().find_map(|scope| {
            scope
                .snapshot_types
                .iter()
                .find(|target| target.name() == &name)
                .cloned()
        })
    }

    /// First registered snapshot descriptor the runtime type can be assigned to
    #[must_use]
    pub fn snapshot_type_for(&self, runtime: &RuntimeType) -> Option<Rc<TargetType>> {
        self.scope.ancestors().find_map(|scope| {
            scope
                .snapshot_types
                .iter()
                .find(|target| target.is_assignable_from(runtime))
                .cloned()
        })
    }
}
