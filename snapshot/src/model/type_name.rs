//! Type names and type references used throughout the object model
//!
//! `TypeName` is a newtype over a fully-qualified name (e.g. `com.example.model.Person`);
//! `TypeRef` is what an accessor declares as its return type.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::constants::JAVA_LANG_PREFIX;

/// A newtype wrapper for fully-qualified type names used as map keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Wrap a fully-qualified name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    /// Get the underlying string reference
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Strip generic parameters: `java.util.List<com.example.Person>` becomes `java.util.List`
    #[must_use]
    pub fn erased(&self) -> Self {
        self.0
            .split('<')
            .next()
            .map_or_else(|| self.clone(), |base| Self(base.trim().to_string()))
    }

    /// Get the short name (last segment after `.`)
    #[must_use]
    pub fn short_name(&self) -> &str {
        let erased = self.0.split('<').next().unwrap_or(&self.0);
        erased.rsplit('.').next().unwrap_or(erased)
    }

    /// Name as it should appear in generated source
    ///
    /// Top-level `java.lang` types are implicitly imported, so `java.lang.String` renders as
    /// `String`. Everything else stays fully qualified.
    #[must_use]
    pub fn to_source(&self) -> String {
        let erased = self.erased();
        match erased.0.strip_prefix(JAVA_LANG_PREFIX) {
            Some(rest) if !rest.contains('.') => rest.to_string(),
            _ => erased.0,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self { Self(s) }
}

/// Primitive types that can be returned by an accessor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `char`
    Char,
}

/// The declared type of an accessor's return value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// No return value
    Void,
    /// A primitive return type
    Primitive(Primitive),
    /// A class or interface, possibly generic
    Named {
        /// Erased or fully-qualified name
        name: TypeName,
        /// Generic arguments, empty for raw types
        args: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// A non-generic named type
    #[must_use]
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A named type with generic arguments
    #[must_use]
    pub fn generic(name: impl Into<TypeName>, args: impl IntoIterator<Item = Self>) -> Self {
        Self::Named {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// `java.lang.String`
    #[must_use]
    pub fn string() -> Self { Self::named(crate::constants::STRING_TYPE) }

    /// Whether this is `void`
    #[must_use]
    pub const fn is_void(&self) -> bool { matches!(self, Self::Void) }

    /// The erased type name, `None` for `void` and primitives
    #[must_use]
    pub fn erased_name(&self) -> Option<TypeName> {
        match self {
            Self::Named { name, .. } => Some(name.erased()),
            Self::Void | Self::Primitive(_) => None,
        }
    }

    /// Erased form as written in a method declaration
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Primitive(primitive) => primitive.to_string(),
            Self::Named { name, .. } => name.to_source(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Named { name, args } if args.is_empty() => write!(f, "{name}"),
            Self::Named { name, args } => write!(f, "{name}<{}>", args.iter().join(", ")),
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(primitive: Primitive) -> Self { Self::Primitive(primitive) }
}
