//! Static accessor schema of a snapshot target
//!
//! A `TargetType` stands in for runtime reflection: it lists every public method of a type the
//! way a generated descriptor or an explicit registration supplies it.

use error_stack::Report;

use super::live_object::RuntimeType;
use super::type_name::{TypeName, TypeRef};
use crate::error::{Error, Result};

/// A public method declared on (or inherited by) a target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name
    pub name:           String,
    /// Parameter types, empty for accessors
    pub params:         Vec<TypeRef>,
    /// Declared return type
    pub return_type:    TypeRef,
    /// Type whose declaration introduced the method
    pub declaring_type: TypeName,
}

impl MethodDescriptor {
    /// Whether the method takes no parameters
    #[must_use]
    pub const fn is_zero_argument(&self) -> bool { self.params.is_empty() }

    /// `declaring.type.name()` form used in diagnostics
    #[must_use]
    pub fn qualified_name(&self) -> String { format!("{}.{}()", self.declaring_type, self.name) }
}

/// Whether the target is implemented or extended by the generated anonymous class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Implemented by the anonymous class
    Interface,
    /// Extended by the anonymous class
    Class {
        /// Final classes cannot be extended
        is_final:                      bool,
        /// The anonymous class calls the no-argument constructor
        has_public_no_arg_constructor: bool,
    },
}

/// The type a snapshot must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    name:    TypeName,
    kind:    TargetKind,
    methods: Vec<MethodDescriptor>,
}

impl TargetType {
    /// An interface with no methods yet
    #[must_use]
    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self {
            name:    name.into(),
            kind:    TargetKind::Interface,
            methods: Vec::new(),
        }
    }

    /// A non-final class with a public no-argument constructor
    #[must_use]
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self {
            name:    name.into(),
            kind:    TargetKind::Class {
                is_final:                      false,
                has_public_no_arg_constructor: true,
            },
            methods: Vec::new(),
        }
    }

    /// Mark a class final, no effect on interfaces
    #[must_use]
    pub fn final_class(mut self) -> Self {
        if let TargetKind::Class { is_final, .. } = &mut self.kind {
            *is_final = true;
        }
        self
    }

    /// Mark a class as lacking a public no-argument constructor
    #[must_use]
    pub fn without_no_arg_constructor(mut self) -> Self {
        if let TargetKind::Class {
            has_public_no_arg_constructor,
            ..
        } = &mut self.kind
        {
            *has_public_no_arg_constructor = false;
        }
        self
    }

    /// Declare a zero-argument accessor
    #[must_use]
    pub fn accessor(self, name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        self.method(name, Vec::new(), return_type)
    }

    /// Declare a method with an arbitrary parameter list
    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<String>,
        params: Vec<TypeRef>,
        return_type: impl Into<TypeRef>,
    ) -> Self {
        let declaring_type = self.name.clone();
        self.methods.push(MethodDescriptor {
            name: name.into(),
            params,
            return_type: return_type.into(),
            declaring_type,
        });
        self
    }

    /// Inherit every method of `parent`, keeping the parent as declaring type
    ///
    /// A method already declared here with the same name and parameters overrides the inherited
    /// one.
    #[must_use]
    pub fn extends(mut self, parent: &Self) -> Self {
        for inherited in &parent.methods {
            let overridden = self
                .methods
                .iter()
                .any(|own| own.name == inherited.name && own.params == inherited.params);
            if !overridden {
                self.methods.push(inherited.clone());
            }
        }
        self
    }

    /// Fully-qualified name of the target
    #[must_use]
    pub const fn name(&self) -> &TypeName { &self.name }

    /// Interface or class, with the class flags
    #[must_use]
    pub const fn kind(&self) -> TargetKind { self.kind }

    /// Every public method, in declaration order
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] { &self.methods }

    /// The target as a declared type
    #[must_use]
    pub fn as_type_ref(&self) -> TypeRef { TypeRef::named(self.name.clone()) }

    /// Whether a value of `runtime` type satisfies this target
    #[must_use]
    pub fn is_assignable_from(&self, runtime: &RuntimeType) -> bool {
        runtime.is_subtype_of(&self.name)
    }

    /// Reject targets an anonymous class cannot extend
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for final classes and for classes without a public
    /// no-argument constructor.
    pub fn ensure_extendable(&self) -> Result<()> {
        match self.kind {
            TargetKind::Interface => Ok(()),
            TargetKind::Class { is_final: true, .. } => Err(Report::new(Error::invalid(
                "type to extend",
                format!("{} is final", self.name),
            ))),
            TargetKind::Class {
                has_public_no_arg_constructor: false,
                ..
            } => Err(Report::new(Error::invalid(
                "type to extend",
                format!("{} has no public no-argument constructor", self.name),
            ))),
            TargetKind::Class { .. } => Ok(()),
        }
    }
}
