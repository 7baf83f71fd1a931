//! # object_snapshot
//!
//! Freezes the observable state of a live object graph into source code that rebuilds it.
//!
//! A snapshot of an object is an anonymous subclass of a target type whose zero-argument
//! accessors return the values the live object returned when the snapshot was taken. Nested
//! objects of registered recursion types are expanded the same way, shared references are
//! generated once, reference cycles are reported instead of recursing forever, and callers can
//! substitute their own expressions for particular objects.
//!
//! # Usage
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use object_snapshot::{Context, Described, LiveObject, Value, make_snapshot_as_subclass};
//!
//! #[derive(LiveObject)]
//! #[live_object(type_name = "com.example.Person")]
//! struct Person {
//!     #[accessor]
//!     name:   String,
//!     #[accessor(name = "getMother")]
//!     mother: RefCell<Option<Rc<Person>>>,
//! }
//!
//! let mom = Rc::new(Person { name: "mom".into(), mother: RefCell::new(None) });
//! let kid = Rc::new(Person { name: "kid".into(), mother: RefCell::new(Some(mom)) });
//!
//! let snapshot = make_snapshot_as_subclass(
//!     &Value::object(&kid),
//!     &Person::describe_type(),
//!     None,
//!     &[Person::describe_type()],
//! )?;
//! println!("{}", snapshot.render(&Context::create())?);
//! # Ok::<(), error_stack::Report<object_snapshot::Error>>(())
//! ```
//!
//! # Logging
//!
//! The engine emits `tracing` events at `debug` and `trace` level. Binaries can install a stderr
//! subscriber with [`TracingLevel::init_tracing`], which reads its level from the
//! `OBJECT_SNAPSHOT_LOG` environment variable.

// Lets the derive's `::object_snapshot` paths resolve inside this crate
extern crate self as object_snapshot;

pub mod codegen;
pub mod constants;
pub mod context;
pub mod error;
pub mod literal;
pub mod model;
pub mod snapshot;
mod support;

pub use codegen::{Expr, Statement};
pub use context::{Context, FormatOptions};
pub use error::{AccessorOrigin, Error, Result};
pub use model::{
    AccessorError, Described, LiveObject, ObjectId, Primitive, RuntimeType, TargetType, ToValue,
    TypeName, TypeRef, Value,
};
pub use object_snapshot_macros::LiveObject;
pub use snapshot::{CannedRepresentations, Snapshot, make_snapshot_as_subclass};
pub use support::{DynamicFilter, TracingLevel};
