//! Procedural macros for object_snapshot

mod attributes;
mod live_object;

use proc_macro::TokenStream;

/// Derives `LiveObject` and `Described` for a struct whose fields back its accessors.
///
/// # Example
///
/// ```ignore
/// #[derive(LiveObject)]
/// #[live_object(type_name = "com.example.Person", implements("com.example.Named"))]
/// pub struct Person {
///     #[accessor]
///     name: String,
///
///     #[accessor(name = "getMother")]
///     mother: RefCell<Option<Rc<Person>>>,
///
///     #[accessor]
///     adult: bool,
///
///     cache: Vec<u8>, // not an accessor
/// }
/// ```
///
/// This will generate:
/// - `LiveObject::runtime_type()` naming `com.example.Person` and every `implements` type
/// - `LiveObject::invoke()` dispatching `getName`, `getMother` and `isAdult` to the fields
/// - `Described::describe_type()` listing those accessors with their declared return types
///
/// Field attributes:
/// - `name = "..."` overrides the accessor name (default `get` + UpperCamelCase field name, `is`
///   for `bool` fields)
/// - `returns = "..."` overrides the declared return type (default taken from `ToValue`)
///
/// Struct flags: `interface` describes the type as an interface, `final_class` as a final class.
#[proc_macro_derive(LiveObject, attributes(live_object, accessor))]
pub fn derive_live_object(input: TokenStream) -> TokenStream {
    live_object::derive_live_object_impl(input)
}
