use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Shape
///
/// Dimensionality descriptor for one column. Always at least one entry;
/// `UNBOUNDED` (-1) marks a dimension with no fixed size. A scalar column is
/// `[-1]`, a fixed-width array column is `[n]`, nested containers carry one
/// entry per level.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Shape(Vec<i32>);

impl Shape {
    pub const UNBOUNDED: i32 = -1;

    #[must_use]
    pub fn scalar() -> Self {
        Self(vec![Self::UNBOUNDED])
    }

    #[must_use]
    pub fn fixed(size: i32) -> Self {
        debug_assert!(size > 0, "fixed shape must have a positive size");
        Self(vec![size])
    }

    /// Multi-level shape; empty input collapses to the scalar shape.
    #[must_use]
    pub fn nested(dims: Vec<i32>) -> Self {
        if dims.is_empty() {
            Self::scalar()
        } else {
            Self(dims)
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.0.len() == 1 && self.0[0] == Self::UNBOUNDED
    }

    #[must_use]
    pub fn dims(&self) -> &[i32] {
        &self.0
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::scalar()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}
