mod compare;


use crate::types::{Float32, Float64, SimId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use compare::strict_cmp;

///
/// Value
///
/// Closed tagged union over everything a backend can emit as a row cell.
/// Condition evaluation switches on the tag; there is no duck-typed or
/// cross-variant comparison.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Blob(#[serde(with = "serde_bytes")] Vec<u8>),
    Bool(bool),
    Float32(Float32),
    Float64(Float64),
    Int(i64),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    SimId(SimId),
    Text(String),
}

impl Value {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Blob(_) => "Blob",
            Self::Bool(_) => "Bool",
            Self::Float32(_) => "Float32",
            Self::Float64(_) => "Float64",
            Self::Int(_) => "Int",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::SimId(_) => "SimId",
            Self::Text(_) => "Text",
        }
    }

    //
    // Typed accessors. Each returns `None` on a variant mismatch; callers
    // that know the declared column type can chain these directly.
    //

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric read-out: ints and both float widths widen to f64.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        match self {
            Self::Float64(x) => Some(x.get()),
            Self::Float32(x) => Some(f64::from(x.get())),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_sim_id(&self) -> Option<SimId> {
        match self {
            Self::SimId(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Fallible f64 constructor; `None` for NaN and infinities.
    #[must_use]
    pub fn float64(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float64)
    }

    /// Fallible f32 constructor; `None` for NaN and infinities.
    #[must_use]
    pub fn float32(v: f32) -> Option<Self> {
        Float32::try_new(v).map(Self::Float32)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float32(x) => write!(f, "{x}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::SimId(id) => write!(f, "{id}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<Float32> for Value {
    fn from(x: Float32) -> Self {
        Self::Float32(x)
    }
}

impl From<Float64> for Value {
    fn from(x: Float64) -> Self {
        Self::Float64(x)
    }
}

impl From<SimId> for Value {
    fn from(id: SimId) -> Self {
        Self::SimId(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Blob(bytes)
    }
}
