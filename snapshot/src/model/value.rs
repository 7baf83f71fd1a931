//! Values returned by accessors and the identity they carry

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use super::live_object::{Described, LiveObject};
use super::type_name::{Primitive, TypeName, TypeRef};
use crate::constants::{ARRAY_LIST_TYPE, LIST_TYPE, OBJECT_TYPE, STRING_TYPE};

/// Reference identity of a heap value, taken from its allocation address
///
/// Two `ObjectId`s are equal exactly when they were taken from the same allocation. Addresses are
/// only stable while the allocation is alive, which is why a generation session retains every
/// value it has looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the value behind a reference
    #[must_use]
    pub fn of_ref<T: ?Sized>(value: &T) -> Self {
        Self(std::ptr::from_ref(value).cast::<()>() as usize)
    }

    /// Identity of the allocation an `Rc` points to
    #[must_use]
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self { Self(Rc::as_ptr(rc).cast::<()>() as usize) }

    /// Identity from a raw address, for diagnostics and tests
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self { Self(raw) }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:x}", self.0) }
}

/// A value produced by invoking an accessor
#[derive(Clone)]
pub enum Value {
    /// `null`
    Null,
    /// `boolean` or `Boolean`
    Bool(bool),
    /// `byte` or `Byte`
    Byte(i8),
    /// `short` or `Short`
    Short(i16),
    /// `int` or `Integer`
    Int(i32),
    /// `long` or `Long`
    Long(i64),
    /// `float` or `Float`
    Float(f32),
    /// `double` or `Double`
    Double(f64),
    /// `char` or `Character`
    Char(char),
    /// `String`
    Str(String),
    /// A list, identified by its allocation
    List(Rc<Vec<Value>>),
    /// A live object, identified by its allocation
    Object(Rc<dyn LiveObject>),
}

impl Value {
    /// Wrap a shared live object, keeping its identity
    #[must_use]
    pub fn object<T: LiveObject>(object: &Rc<T>) -> Self {
        let object: Rc<dyn LiveObject> = object.clone();
        Self::Object(object)
    }

    /// A freshly allocated list
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::List(Rc::new(items.into_iter().collect()))
    }

    /// A string value
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self { Self::Str(s.into()) }

    /// Whether this is `null`
    #[must_use]
    pub const fn is_null(&self) -> bool { matches!(self, Self::Null) }

    /// Reference identity, `None` for values compared by value
    #[must_use]
    pub fn identity(&self) -> Option<ObjectId> {
        match self {
            Self::List(items) => Some(ObjectId::of(items)),
            Self::Object(object) => Some(ObjectId::of(object)),
            _ => None,
        }
    }

    /// Runtime type name of the value
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        match self {
            Self::Null => TypeName::new("null"),
            Self::Bool(_) => TypeName::new("java.lang.Boolean"),
            Self::Byte(_) => TypeName::new("java.lang.Byte"),
            Self::Short(_) => TypeName::new("java.lang.Short"),
            Self::Int(_) => TypeName::new("java.lang.Integer"),
            Self::Long(_) => TypeName::new("java.lang.Long"),
            Self::Float(_) => TypeName::new("java.lang.Float"),
            Self::Double(_) => TypeName::new("java.lang.Double"),
            Self::Char(_) => TypeName::new("java.lang.Character"),
            Self::Str(_) => TypeName::new(STRING_TYPE),
            Self::List(_) => TypeName::new(ARRAY_LIST_TYPE),
            Self::Object(object) => object.runtime_type().name,
        }
    }

    /// Textual form used in diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Byte(n) => n.to_string(),
            Self::Short(n) => n.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Long(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Double(n) => n.to_string(),
            Self::Char(c) => format!("'{c}'"),
            Self::Str(s) => format!("{s:?}"),
            Self::List(items) => format!("[{}]", items.iter().map(Self::describe).join(", ")),
            Self::Object(object) => object.describe(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => f
                .debug_tuple("List")
                .field(&ObjectId::of(items))
                .field(&items.len())
                .finish(),
            Self::Object(object) => f.debug_tuple("Object").field(&object.describe()).finish(),
            other => write!(f, "{}", other.describe()),
        }
    }
}

/// Conversion of a struct field into an accessor return value
///
/// `declared_type` is the return type a generated accessor declares for the field.
pub trait ToValue {
    /// Current value of the field
    fn to_value(&self) -> Value;

    /// Return type of the accessor generated for the field
    fn declared_type() -> TypeRef
    where
        Self: Sized;
}

macro_rules! primitive_to_value {
    ($($ty:ty => $variant:ident, $primitive:ident;)*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value { Value::$variant(*self) }

                fn declared_type() -> TypeRef { TypeRef::Primitive(Primitive::$primitive) }
            }
        )*
    };
}

primitive_to_value! {
    bool => Bool, Boolean;
    i8 => Byte, Byte;
    i16 => Short, Short;
    i32 => Int, Int;
    i64 => Long, Long;
    f32 => Float, Float;
    f64 => Double, Double;
    char => Char, Char;
}

impl ToValue for String {
    fn to_value(&self) -> Value { Value::Str(self.clone()) }

    fn declared_type() -> TypeRef { TypeRef::named(STRING_TYPE) }
}

impl ToValue for &'static str {
    fn to_value(&self) -> Value { Value::Str((*self).to_string()) }

    fn declared_type() -> TypeRef { TypeRef::named(STRING_TYPE) }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value { self.as_ref().map_or(Value::Null, ToValue::to_value) }

    fn declared_type() -> TypeRef { T::declared_type() }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value { Value::list(self.iter().map(ToValue::to_value)) }

    fn declared_type() -> TypeRef { TypeRef::generic(LIST_TYPE, [T::declared_type()]) }
}

impl<T: LiveObject + Described> ToValue for Rc<T> {
    fn to_value(&self) -> Value { Value::object(self) }

    fn declared_type() -> TypeRef { TypeRef::named(T::type_name()) }
}

impl<T: ToValue> ToValue for RefCell<T> {
    fn to_value(&self) -> Value { self.borrow().to_value() }

    fn declared_type() -> TypeRef { T::declared_type() }
}

impl ToValue for Value {
    fn to_value(&self) -> Value { self.clone() }

    fn declared_type() -> TypeRef { TypeRef::named(OBJECT_TYPE) }
}
