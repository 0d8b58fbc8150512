mod dbtype;
mod shape;


use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

pub use dbtype::{DbType, TypeFamily};
pub use shape::Shape;

///
/// SchemaError
///
/// Invariant violations raised while assembling a table schema. These are
/// construction-time failures only; a built `TableSchema` is immutable.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("duplicate column '{col}' in table '{table}'")]
    DuplicateColumn { table: String, col: String },

    #[error("table '{table}' has no columns")]
    Empty { table: String },

    #[error("column '{col}' has index {index}, expected {expected} (table '{table}')")]
    NonContiguousIndex {
        table: String,
        col: String,
        index: u32,
        expected: u32,
    },

    #[error("column '{col}' declares table '{declared}', expected '{table}'")]
    TableMismatch {
        table: String,
        col: String,
        declared: String,
    },
}

///
/// ColumnSchema
///
/// Metadata for one column of one table: declared type code, ordinal
/// position within the row tuple, and shape. Read-only once built.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnSchema {
    table: String,
    col: String,
    dbtype: DbType,
    index: u32,
    shape: Shape,
}

impl ColumnSchema {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        col: impl Into<String>,
        dbtype: DbType,
        index: u32,
        shape: Shape,
    ) -> Self {
        Self {
            table: table.into(),
            col: col.into(),
            dbtype,
            index,
            shape,
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn col(&self) -> &str {
        &self.col
    }

    #[must_use]
    pub const fn dbtype(&self) -> DbType {
        self.dbtype
    }

    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }
}

///
/// TableSchema
///
/// The ordered column sequence of one table. `index` values form a
/// contiguous 0-based run matching row-tuple order; construction rejects
/// anything else.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableSchema {
    table: String,
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Validating constructor over pre-indexed columns.
    pub fn from_columns(
        table: impl Into<String>,
        columns: Vec<ColumnSchema>,
    ) -> Result<Self, SchemaError> {
        let table = table.into();

        if columns.is_empty() {
            return Err(SchemaError::Empty { table });
        }

        for (position, column) in columns.iter().enumerate() {
            if column.table != table {
                return Err(SchemaError::TableMismatch {
                    table,
                    col: column.col.clone(),
                    declared: column.table.clone(),
                });
            }

            #[allow(clippy::cast_possible_truncation)]
            let expected = position as u32;
            if column.index != expected {
                return Err(SchemaError::NonContiguousIndex {
                    table,
                    col: column.col.clone(),
                    index: column.index,
                    expected,
                });
            }

            if columns[..position].iter().any(|c| c.col == column.col) {
                return Err(SchemaError::DuplicateColumn {
                    table,
                    col: column.col.clone(),
                });
            }
        }

        Ok(Self { table, columns })
    }

    #[must_use]
    pub fn builder(table: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.col == name)
    }

    /// Name → declared type map, in name order.
    #[must_use]
    pub fn column_types(&self) -> BTreeMap<String, DbType> {
        self.columns
            .iter()
            .map(|column| (column.col.clone(), column.dbtype))
            .collect()
    }

    /// Structural digest over (table, column names, codes, shapes).
    ///
    /// Two backends serve the same table iff their fingerprints match; the
    /// federation layer compares digests instead of walking columns.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.table.as_bytes());
        hasher.update([0u8]);

        for column in &self.columns {
            hasher.update(column.col.as_bytes());
            hasher.update([0u8]);
            hasher.update(column.dbtype.code().to_be_bytes());
            for dim in column.shape.dims() {
                hasher.update(dim.to_be_bytes());
            }
            hasher.update([0u8]);
        }

        hasher.finalize().into()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSchema> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a TableSchema {
    type Item = &'a ColumnSchema;
    type IntoIter = std::slice::Iter<'a, ColumnSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

///
/// TableSchemaBuilder
///
/// Assigns ordinal indexes in declaration order so callers never hand-number
/// columns.
///

pub struct TableSchemaBuilder {
    table: String,
    columns: Vec<ColumnSchema>,
}

impl TableSchemaBuilder {
    /// Append a scalar column.
    #[must_use]
    pub fn column(self, col: impl Into<String>, dbtype: DbType) -> Self {
        self.column_shaped(col, dbtype, Shape::scalar())
    }

    /// Append a column with an explicit shape.
    #[must_use]
    pub fn column_shaped(mut self, col: impl Into<String>, dbtype: DbType, shape: Shape) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let index = self.columns.len() as u32;
        self.columns.push(ColumnSchema::new(
            self.table.clone(),
            col,
            dbtype,
            index,
            shape,
        ));
        self
    }

    pub fn build(self) -> Result<TableSchema, SchemaError> {
        TableSchema::from_columns(self.table, self.columns)
    }
}
