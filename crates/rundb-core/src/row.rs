use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Row
///
/// One row tuple as emitted by a backend. Length and per-position variants
/// must match the table's schema; the engine treats violations as backend
/// corruption.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Row(#[into_iterator(owned, ref)] Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
