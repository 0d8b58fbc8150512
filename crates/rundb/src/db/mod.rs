mod open;


use crate::error::{Error, OpenError};
use rundb_core::{
    backend::Backend,
    query::{Condition, QueryOptions, QueryResult, evaluate},
    schema::TableSchema,
    types::SimId,
};
use std::{collections::BTreeSet, path::Path};

pub use open::open;

///
/// Database
///
/// Façade binding one open backend (or a federation of same-schema
/// backends sharing one simulation identity) to the query and schema
/// operations. Owns no storage; dropping the handle releases the backends
/// (scoped acquisition), `close()` does the same eagerly.
///

pub struct Database {
    name: String,
    backends: Vec<Box<dyn Backend>>,
    closed: bool,
}

impl Database {
    /// Open a source path, probing its format. See [`open`].
    pub fn open(source: impl AsRef<Path>) -> Result<Self, Error> {
        open(source)
    }

    /// Bind a single already-constructed backend.
    #[must_use]
    pub fn attach(name: impl Into<String>, backend: impl Backend + 'static) -> Self {
        Self {
            name: name.into(),
            backends: vec![Box::new(backend)],
            closed: false,
        }
    }

    /// Bind several backends representing the same simulation run.
    ///
    /// All members must agree on the simulation identity; per-table schema
    /// agreement is checked lazily on each `schema`/`query` call.
    pub fn federate(
        name: impl Into<String>,
        backends: Vec<Box<dyn Backend>>,
    ) -> Result<Self, Error> {
        let Some(first) = backends.first() else {
            return Err(OpenError::NoBackends.into());
        };

        let sim_id = first.sim_id();
        for backend in &backends[1..] {
            if backend.sim_id() != sim_id {
                return Err(OpenError::SimIdMismatch {
                    left: first.name().to_string(),
                    right: backend.name().to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            name: name.into(),
            backends,
            closed: false,
        })
    }

    /// Identity of the opened source, exactly as resolved at open time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// The simulation run this database serves.
    pub fn sim_id(&self) -> Result<SimId, Error> {
        Ok(self.guard()?[0].sim_id())
    }

    /// Union of table names across all bound backends.
    pub fn tables(&self) -> Result<BTreeSet<String>, Error> {
        let backends = self.guard()?;

        let mut tables = BTreeSet::new();
        for backend in backends {
            tables.extend(backend.tables());
        }

        Ok(tables)
    }

    /// Ordered column schema for `table`.
    ///
    /// With several backends bound, all of them must agree structurally on
    /// the table; the common schema is returned.
    pub fn schema(&self, table: &str) -> Result<TableSchema, Error> {
        let backends = self.guard()?;

        let first = &backends[0];
        let schema = first.schema(table)?;
        let fingerprint = schema.fingerprint();

        for backend in &backends[1..] {
            let other = backend.schema(table)?;
            if other.fingerprint() != fingerprint {
                return Err(Error::SchemaMismatch {
                    table: table.to_string(),
                    left: first.name().to_string(),
                    right: backend.name().to_string(),
                });
            }
        }

        Ok(schema)
    }

    /// Filtered columnar read. Zero conditions return every row.
    pub fn query(&self, table: &str, conditions: &[Condition]) -> Result<QueryResult, Error> {
        self.query_with(table, conditions, &QueryOptions::default())
    }

    /// As [`Self::query`], with caller-supplied cancellation/observability.
    ///
    /// Per-backend results concatenate in backend-registration order, then
    /// emission order within each backend.
    pub fn query_with(
        &self,
        table: &str,
        conditions: &[Condition],
        options: &QueryOptions<'_>,
    ) -> Result<QueryResult, Error> {
        let backends = self.guard()?;

        // federation consistency first; also surfaces UnknownTable
        self.schema(table)?;

        let mut merged: Option<QueryResult> = None;
        for backend in backends {
            let result = evaluate(backend.as_ref(), table, conditions, options)?;
            match merged.as_mut() {
                None => merged = Some(result),
                Some(merged) => merged.append(result)?,
            }
        }

        // guard() guarantees at least one backend
        Ok(merged.expect("federation is never empty"))
    }

    /// Release all bound backends. Idempotent; every later operation fails
    /// with [`Error::Closed`].
    pub fn close(&mut self) {
        self.backends.clear();
        self.closed = true;
    }

    fn guard(&self) -> Result<&[Box<dyn Backend>], Error> {
        if self.closed {
            return Err(Error::Closed);
        }

        Ok(&self.backends)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("backends", &self.backends.len())
            .field("closed", &self.closed)
            .finish()
    }
}
