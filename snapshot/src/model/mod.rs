//! Object model standing in for runtime reflection
//!
//! Live objects expose named zero-argument accessors through [`LiveObject`]; target types
//! describe those accessors statically through [`TargetType`].

mod live_object;
mod target_type;
mod type_name;
mod value;

pub use live_object::{AccessorError, Described, LiveObject, RuntimeType};
pub use target_type::{MethodDescriptor, TargetKind, TargetType};
pub use type_name::{Primitive, TypeName, TypeRef};
pub use value::{ObjectId, ToValue, Value};
