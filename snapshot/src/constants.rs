//! Constants for accessor resolution, literal encoding and formatting

// ============================================================================
// ACCESSOR CONSTANTS
// ============================================================================

/// Equality method, never snapshotted regardless of its signature
pub const EQUALS_METHOD: &str = "equals";

/// Hash method, never snapshotted regardless of its signature
pub const HASH_CODE_METHOD: &str = "hashCode";

// ============================================================================
// TYPE NAME CONSTANTS
// ============================================================================

/// Package whose top-level types are referenced by short name in generated source
pub const JAVA_LANG_PREFIX: &str = "java.lang.";

/// String type name
pub const STRING_TYPE: &str = "java.lang.String";
/// Root of the class hierarchy
pub const OBJECT_TYPE: &str = "java.lang.Object";
/// List interface name
pub const LIST_TYPE: &str = "java.util.List";

/// Concrete list type instantiated by list literals
pub const ARRAY_LIST_TYPE: &str = "java.util.ArrayList";

/// Types the literal encoder understands without any registration
pub const BUILTIN_LITERALIZABLE_TYPES: &[&str] = &[
    STRING_TYPE,
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Character",
    "java.lang.CharSequence",
    "java.util.Collection",
    LIST_TYPE,
    ARRAY_LIST_TYPE,
];

// ============================================================================
// FORMATTING CONSTANTS
// ============================================================================

/// Spaces per nesting level when none is configured
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Environment variable holding the tracing level for the demo binary
pub const LOG_LEVEL_ENV_VAR: &str = "OBJECT_SNAPSHOT_LOG";
