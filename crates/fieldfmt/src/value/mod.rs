//! Argument values.
//!
//! The interpreter is generic over its argument type; it only needs to know
//! whether a value is error-like (see [`Argument`]). [`Value`] is the
//! concrete argument type understood by the standard renderer.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// What the interpreter needs to know about an argument.
pub trait Argument {
    /// Whether the value is an error.
    ///
    /// Error-like arguments left over after all directives are still
    /// reported to the value callback.
    fn is_error(&self) -> bool;
}

impl<T: Argument + ?Sized> Argument for &T {
    fn is_error(&self) -> bool {
        (**self).is_error()
    }
}

/// Shared, type-erased error value.
pub type ErrorValue = Arc<dyn StdError + Send + Sync + 'static>;

/// A formattable argument.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Error(ErrorValue),
    /// An address, rendered by `%p`.
    Pointer(usize),
    List(Vec<Value>),
}

impl Value {
    /// Wrap an error.
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Value::Error(Arc::new(err))
    }

    /// Type name used by `%T` and inline markers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "<nil>",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float64",
            Value::Str(_) => "string",
            Value::Bytes(_) => "[]byte",
            Value::Error(_) => "error",
            Value::Pointer(_) => "pointer",
            Value::List(_) => "[]value",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl Argument for Value {
    fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

/// Errors compare by message; floats compare by bit pattern so `NaN`
/// equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => {
                Arc::ptr_eq(a, b) || a.to_string() == b.to_string()
            }
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// The `%v` rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::render::StdRenderer.write_value(self, &mut out);
        f.write_str(&out)
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

impl_from!(Int: i8, i16, i32, i64);
impl_from!(Uint: u8, u16, u32, u64);
impl_from!(Float: f32, f64);
impl_from!(Str: String, &str);
impl_from!(Bool: bool);
impl_from!(Bytes: Vec<u8>, &[u8]);
impl_from!(List: Vec<Value>);

/// A `char` is its code point, so `%c`, `%q` and `%U` apply to it.
impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Int(i64::from(u32::from(c)))
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        // isize is at most 64 bits on every supported target.
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Uint(u64::try_from(v).unwrap_or(u64::MAX))
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Value {
    fn from(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Value::Error(Arc::from(err))
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use fieldfmt::{values, Value};
///
/// let args = values![1, "two", 3.0];
/// assert_eq!(args[1], Value::Str("two".into()));
/// ```
#[macro_export]
macro_rules! values {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}
