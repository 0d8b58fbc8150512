use crate::value::Value;
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// ParseOpError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown comparison operator '{symbol}'")]
pub struct ParseOpError {
    pub symbol: String,
}

///
/// CompareOp
///
/// The six comparison kinds a condition may carry.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub const ALL: [Self; 6] = [Self::Eq, Self::Ne, Self::Lt, Self::Le, Self::Gt, Self::Ge];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Whether this operator requires an ordered column type; `==`/`!=` only
    /// need equality.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    /// Decide the operator against a concrete comparison outcome.
    #[must_use]
    pub const fn admits(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => matches!(ordering, Ordering::Equal),
            Self::Ne => !matches!(ordering, Ordering::Equal),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Le => !matches!(ordering, Ordering::Greater),
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Ge => !matches!(ordering, Ordering::Less),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = ParseOpError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            _ => Err(ParseOpError {
                symbol: symbol.to_string(),
            }),
        }
    }
}

///
/// Condition
///
/// One immutable filter predicate: column, comparison operator, operand.
/// Rows survive a query only if every condition admits them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    column: String,
    op: CompareOp,
    value: Value,
}

impl Condition {
    #[must_use]
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Le, value)
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Ge, value)
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

/// Literal 3-tuple form: `("Kind", "==", "Region")`.
impl<C, V> TryFrom<(C, &str, V)> for Condition
where
    C: Into<String>,
    V: Into<Value>,
{
    type Error = ParseOpError;

    fn try_from((column, symbol, value): (C, &str, V)) -> Result<Self, Self::Error> {
        Ok(Self::new(column, symbol.parse()?, value))
    }
}
