use rundb_core::{
    backend::{Backend, RowStream},
    error::Error as CoreError,
    row::Row,
    schema::TableSchema,
    types::SimId,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// MemBackendError
///
/// Construction-time failures only. Once built, a `MemBackend` is consumed
/// read-only through the `Backend` trait.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum MemBackendError {
    #[error("table '{table}' already exists")]
    DuplicateTable { table: String },

    #[error("row arity {found} does not match schema arity {expected} for table '{table}'")]
    RowArity {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown table '{table}'")]
    UnknownTable { table: String },

    #[error("column '{col}' ({expected}) of table '{table}' does not admit a {found} value")]
    ValueType {
        table: String,
        col: String,
        expected: &'static str,
        found: &'static str,
    },
}

///
/// MemBackend
///
/// In-memory reference implementation of the backend contract. Tables are
/// created with a schema, filled with validated rows, then served read-only;
/// emission order is insertion order.
///

pub struct MemBackend {
    name: String,
    sim_id: SimId,
    tables: BTreeMap<String, MemTable>,
}

struct MemTable {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl MemBackend {
    #[must_use]
    pub fn new(name: impl Into<String>, sim_id: SimId) -> Self {
        Self {
            name: name.into(),
            sim_id,
            tables: BTreeMap::new(),
        }
    }

    pub fn create_table(&mut self, schema: TableSchema) -> Result<(), MemBackendError> {
        let table = schema.table().to_string();

        if self.tables.contains_key(&table) {
            return Err(MemBackendError::DuplicateTable { table });
        }

        self.tables.insert(
            table,
            MemTable {
                schema,
                rows: Vec::new(),
            },
        );

        Ok(())
    }

    /// Append one row, validated against the table's schema (arity and
    /// per-column declared type).
    pub fn insert(&mut self, table: &str, row: impl Into<Row>) -> Result<(), MemBackendError> {
        let row = row.into();

        let entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| MemBackendError::UnknownTable {
                table: table.to_string(),
            })?;

        if row.len() != entry.schema.len() {
            return Err(MemBackendError::RowArity {
                table: table.to_string(),
                expected: entry.schema.len(),
                found: row.len(),
            });
        }

        for (column, value) in entry.schema.iter().zip(row.iter()) {
            if !column.dbtype().admits(value) {
                return Err(MemBackendError::ValueType {
                    table: table.to_string(),
                    col: column.col().to_string(),
                    expected: column.dbtype().label(),
                    found: value.label(),
                });
            }
        }

        entry.rows.push(row);

        Ok(())
    }

    /// Iterate tables with their schemas and rows (snapshot export).
    pub(crate) fn dump(&self) -> impl Iterator<Item = (&TableSchema, &[Row])> {
        self.tables
            .values()
            .map(|table| (&table.schema, table.rows.as_slice()))
    }
}

impl Backend for MemBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn sim_id(&self) -> SimId {
        self.sim_id
    }

    fn tables(&self) -> BTreeSet<String> {
        self.tables.keys().cloned().collect()
    }

    fn schema(&self, table: &str) -> Result<TableSchema, CoreError> {
        self.tables
            .get(table)
            .map(|entry| entry.schema.clone())
            .ok_or_else(|| CoreError::unknown_table(table))
    }

    fn rows(&self, table: &str) -> Result<RowStream<'_>, CoreError> {
        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| CoreError::unknown_table(table))?;

        Ok(Box::new(entry.rows.iter().cloned().map(Ok)))
    }
}
