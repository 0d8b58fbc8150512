use crate::{error::Error, row::Row, schema::{ColumnSchema, TableSchema}, value::Value};
use std::ops::Index;

///
/// QueryResult
///
/// Columnar result set: one value sequence per column, all the same length.
/// Column order mirrors the table schema; row order mirrors backend emission
/// order among survivors.
///

#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    schema: TableSchema,
    columns: Vec<Vec<Value>>,
    rows: usize,
}

impl QueryResult {
    #[must_use]
    pub fn new(schema: TableSchema) -> Self {
        let columns = vec![Vec::new(); schema.len()];
        Self {
            schema,
            columns,
            rows: 0,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of surviving rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        let column = self.schema.column(name)?;
        Some(&self.columns[column.index() as usize])
    }

    /// Single-cell read-out by row position and column name.
    #[must_use]
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)?.get(row)
    }

    /// Iterate columns in schema order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnSchema, &[Value])> {
        self.schema
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Append one surviving row; arity was checked by the engine.
    pub(crate) fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len());

        for (slot, value) in self.columns.iter_mut().zip(row) {
            slot.push(value);
        }
        self.rows += 1;
    }

    /// Concatenate a same-table result produced by another backend.
    ///
    /// Callers must have established schema equality (fingerprint match)
    /// first; mismatched shapes surface as a backend invariant failure.
    pub fn append(&mut self, other: Self) -> Result<(), Error> {
        if other.schema.fingerprint() != self.schema.fingerprint() {
            return Err(Error::backend(format!(
                "cannot concatenate results with diverging schemas for table '{}'",
                self.schema.table()
            )));
        }

        for (slot, mut values) in self.columns.iter_mut().zip(other.columns) {
            slot.append(&mut values);
        }
        self.rows += other.rows;

        Ok(())
    }
}

/// Panicking column access, mirroring map-style indexing: `result["Kind"]`.
impl Index<&str> for QueryResult {
    type Output = [Value];

    fn index(&self, name: &str) -> &Self::Output {
        self.column(name)
            .unwrap_or_else(|| panic!("no column '{name}' in table '{}'", self.schema.table()))
    }
}
