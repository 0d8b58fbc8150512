use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// DbType
///
/// Declared column type code.
///
/// IMPORTANT:
/// Code values are stable behavior: they appear in snapshots and in every
/// `schema()` result, and must remain fixed.
///

#[repr(u16)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DbType {
    Bool = 0,
    Int = 1,
    Float32 = 2,
    Float64 = 3,
    Text = 4,
    VlText = 5,
    Blob = 6,
    SimId = 7,
    IntList = 8,
    Float64List = 9,
    TextList = 10,
    IntFloat64Map = 11,
    TextFloat64Map = 12,
}

///
/// TypeFamily
///
/// Comparison-compatibility classes. A condition operand must fall in the
/// same family as the column it filters; `Numeric` additionally widens Int
/// literals onto float columns.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeFamily {
    Bool,
    Numeric,
    Text,
    Id,
    Blob,
    Container,
}

impl DbType {
    /// Stable integer code for this declared type.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Bool),
            1 => Some(Self::Int),
            2 => Some(Self::Float32),
            3 => Some(Self::Float64),
            4 => Some(Self::Text),
            5 => Some(Self::VlText),
            6 => Some(Self::Blob),
            7 => Some(Self::SimId),
            8 => Some(Self::IntList),
            9 => Some(Self::Float64List),
            10 => Some(Self::TextList),
            11 => Some(Self::IntFloat64Map),
            12 => Some(Self::TextFloat64Map),
            _ => None,
        }
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Text => "Text",
            Self::VlText => "VlText",
            Self::Blob => "Blob",
            Self::SimId => "SimId",
            Self::IntList => "IntList",
            Self::Float64List => "Float64List",
            Self::TextList => "TextList",
            Self::IntFloat64Map => "IntFloat64Map",
            Self::TextFloat64Map => "TextFloat64Map",
        }
    }

    #[must_use]
    pub const fn family(self) -> TypeFamily {
        match self {
            Self::Bool => TypeFamily::Bool,
            Self::Int | Self::Float32 | Self::Float64 => TypeFamily::Numeric,
            Self::Text | Self::VlText => TypeFamily::Text,
            Self::SimId => TypeFamily::Id,
            Self::Blob => TypeFamily::Blob,
            Self::IntList
            | Self::Float64List
            | Self::TextList
            | Self::IntFloat64Map
            | Self::TextFloat64Map => TypeFamily::Container,
        }
    }

    /// Whether ordering conditions (`<`, `<=`, `>`, `>=`) are defined for
    /// columns of this type. Blobs and containers are equality-only or not
    /// filterable at all.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        matches!(
            self.family(),
            TypeFamily::Bool | TypeFamily::Numeric | TypeFamily::Text | TypeFamily::Id
        )
    }

    /// Whether a stored cell of this declared type may hold `value`.
    #[must_use]
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Int => matches!(value, Value::Int(_)),
            Self::Float32 => matches!(value, Value::Float32(_)),
            Self::Float64 => matches!(value, Value::Float64(_)),
            Self::Text | Self::VlText => matches!(value, Value::Text(_)),
            Self::Blob => matches!(value, Value::Blob(_)),
            Self::SimId => matches!(value, Value::SimId(_)),
            Self::IntList => matches!(value, Value::List(items)
                if items.iter().all(|item| matches!(item, Value::Int(_)))),
            Self::Float64List => matches!(value, Value::List(items)
                if items.iter().all(|item| matches!(item, Value::Float64(_)))),
            Self::TextList => matches!(value, Value::List(items)
                if items.iter().all(|item| matches!(item, Value::Text(_)))),
            Self::IntFloat64Map => matches!(value, Value::Map(entries)
                if entries
                    .iter()
                    .all(|(k, v)| matches!((k, v), (Value::Int(_), Value::Float64(_))))),
            Self::TextFloat64Map => matches!(value, Value::Map(entries)
                if entries
                    .iter()
                    .all(|(k, v)| matches!((k, v), (Value::Text(_), Value::Float64(_))))),
        }
    }
}
