//! Expression tree for generated source
//!
//! Expressions render to unindented source; indentation is applied once by
//! [`format_source`](super::format_source) when a whole snapshot is materialized.

use std::fmt::Write as _;
use std::rc::Rc;

use super::statement::Statement;
use crate::constants::ARRAY_LIST_TYPE;
use crate::context::Context;
use crate::error::Result;
use crate::model::{TypeName, TypeRef, Value};

/// A source-level literal
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Cast `byte` literal
    Byte(i8),
    /// Cast `short` literal
    Short(i16),
    /// `int` literal
    Int(i32),
    /// `long` literal with an `L` suffix
    Long(i64),
    /// `float` literal with an `f` suffix
    Float(f32),
    /// `double` literal
    Double(f64),
    /// Quoted, escaped `char`
    Char(char),
    /// Quoted, escaped string
    Str(String),
}

impl Literal {
    /// Literal for a value compared by value, `None` for lists and objects
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Byte(n) => Self::Byte(*n),
            Value::Short(n) => Self::Short(*n),
            Value::Int(n) => Self::Int(*n),
            Value::Long(n) => Self::Long(*n),
            Value::Float(n) => Self::Float(*n),
            Value::Double(n) => Self::Double(*n),
            Value::Char(c) => Self::Char(*c),
            Value::Str(s) => Self::Str(s.clone()),
            Value::List(_) | Value::Object(_) => return None,
        })
    }

    /// Source text of the literal
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Byte(n) => format!("(byte) {n}"),
            Self::Short(n) => format!("(short) {n}"),
            Self::Int(n) => n.to_string(),
            Self::Long(n) => format!("{n}L"),
            Self::Float(n) => non_finite("Float", n.is_nan(), n.is_infinite(), *n > 0.0)
                // `{:?}` always keeps a fractional part or an exponent
                .unwrap_or_else(|| format!("{n:?}f")),
            Self::Double(n) => non_finite("Double", n.is_nan(), n.is_infinite(), *n > 0.0)
                .unwrap_or_else(|| format!("{n:?}")),
            Self::Char(c) => format!("'{}'", escape(&c.to_string(), '\'')),
            Self::Str(s) => format!("\"{}\"", escape(s, '"')),
        }
    }
}

fn non_finite(boxed: &str, nan: bool, infinite: bool, positive: bool) -> Option<String> {
    if nan {
        Some(format!("{boxed}.NaN"))
    } else if infinite {
        let sign = if positive { "POSITIVE" } else { "NEGATIVE" };
        Some(format!("{boxed}.{sign}_INFINITY"))
    } else {
        None
    }
}

fn escape(s: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// One method override of an anonymous class
#[derive(Debug, Clone)]
pub struct MethodOverride {
    /// Overridden method name
    pub name:        String,
    /// Declared return type
    pub return_type: TypeRef,
    /// `None` renders an empty body
    pub body:        Option<Expr>,
}

/// `new T() { ... }` with one override per accessor
#[derive(Debug, Clone)]
pub struct AnonymousClass {
    extends: TypeRef,
    methods: Vec<MethodOverride>,
}

impl AnonymousClass {
    /// An anonymous class of `extends` with no overrides yet
    #[must_use]
    pub const fn extending(extends: TypeRef) -> Self {
        Self {
            extends,
            methods: Vec::new(),
        }
    }

    /// Override with an empty body
    pub fn override_empty(&mut self, name: impl Into<String>, return_type: TypeRef) {
        self.methods.push(MethodOverride {
            name: name.into(),
            return_type,
            body: None,
        });
    }

    /// Override whose body returns `body`
    pub fn override_returning(&mut self, name: impl Into<String>, return_type: TypeRef, body: Expr) {
        self.methods.push(MethodOverride {
            name: name.into(),
            return_type,
            body: Some(body),
        });
    }

    /// Type the class implements or extends
    #[must_use]
    pub const fn extends(&self) -> &TypeRef { &self.extends }

    /// Overrides in the order they were added
    #[must_use]
    pub fn methods(&self) -> &[MethodOverride] { &self.methods }

    /// Unindented source of the class instantiation
    ///
    /// # Errors
    ///
    /// Propagates the failure of any deferred statement embedded in the expression.
    pub fn to_source(&self, ctx: &Context) -> Result<String> {
        let mut source = format!("new {}() {{\n", self.extends.to_source());
        for method in &self.methods {
            let _ = writeln!(
                source,
                "public {} {}() {{",
                method.return_type.to_source(),
                method.name
            );
            if let Some(body) = &method.body {
                let _ = writeln!(source, "{}", body.to_method_body(ctx)?);
            }
            source.push_str("}\n");
        }
        source.push('}');
        Ok(source)
    }
}

/// Expression assembled by the snapshot engine
#[derive(Debug, Clone)]
pub enum Expr {
    /// A literal value
    Literal(Literal),
    /// Reference to a variable in scope at the generation site
    Variable(String),
    /// Source text used verbatim
    Raw(String),
    /// Instantiation of an anonymous class
    NewAnonymous(AnonymousClass),
    /// `new java.util.ArrayList() {{ add(..); }}`
    ListInit(Vec<Expr>),
    /// A whole `return` statement
    Return(Box<Expr>),
    /// Deferred statement, generated on demand
    Statement(Rc<dyn Statement>),
}

impl Expr {
    /// The `null` literal
    #[must_use]
    pub const fn null() -> Self { Self::Literal(Literal::Null) }

    /// Reference to a variable
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self { Self::Variable(name.into()) }

    /// `return <variable>;`, the usual shape of a canned representation
    #[must_use]
    pub fn return_variable(name: impl Into<String>) -> Self {
        Self::Return(Box::new(Self::variable(name)))
    }

    /// Wrap in a `return` unless already wrapped
    #[must_use]
    pub fn returned(self) -> Self {
        match self {
            already @ Self::Return(_) => already,
            value => Self::Return(Box::new(value)),
        }
    }

    /// Whether this is a whole `return` statement
    #[must_use]
    pub const fn is_return(&self) -> bool { matches!(self, Self::Return(_)) }

    /// The value being expressed, looking through a `return`
    #[must_use]
    pub fn value(&self) -> &Self {
        match self {
            Self::Return(inner) => inner.value(),
            other => other,
        }
    }

    /// Unindented source of the expression
    ///
    /// # Errors
    ///
    /// Propagates the failure of any deferred statement embedded in the expression.
    pub fn to_source(&self, ctx: &Context) -> Result<String> {
        match self {
            Self::Literal(literal) => Ok(literal.to_source()),
            Self::Variable(name) | Self::Raw(name) => Ok(name.clone()),
            Self::NewAnonymous(class) => class.to_source(ctx),
            Self::ListInit(elements) => {
                let adds: Vec<String> = elements
                    .iter()
                    .map(|element| {
                        element
                            .value()
                            .to_source(ctx)
                            .map(|source| format!("add({source});"))
                    })
                    .collect::<Result<_>>()?;
                let mut source = format!("new {}() {{\n{{\n", TypeName::new(ARRAY_LIST_TYPE));
                for add in adds {
                    source.push_str(&add);
                    source.push('\n');
                }
                source.push_str("}\n}");
                Ok(source)
            }
            Self::Return(inner) => Ok(format!("return {};", inner.value().to_source(ctx)?)),
            Self::Statement(statement) => statement.generate(ctx),
        }
    }

    /// Source of a method body returning this expression
    ///
    /// # Errors
    ///
    /// Propagates the failure of any deferred statement embedded in the expression.
    pub fn to_method_body(&self, ctx: &Context) -> Result<String> {
        match self {
            Self::Return(_) => self.to_source(ctx),
            value => Ok(format!("return {};", value.to_source(ctx)?)),
        }
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self { Self::Literal(literal) }
}
