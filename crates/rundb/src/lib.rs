//! Public surface for rundb: the [`Database`] façade over one or more
//! backends, `open()` with on-disk format probing, the bundled reference
//! backends, and the small geometry toolkit.

pub mod backend;
pub mod db;
pub mod error;
pub mod position;

pub use db::{Database, open};
pub use error::{Error, OpenError};
pub use position::Position;

// the core vocabulary, re-exported so most callers need exactly one crate
pub use rundb_core::{
    backend::{Backend, RowStream},
    error::Error as CoreError,
    obs::{NullSink, QueryEvent, QuerySink},
    query::{CancelFlag, CompareOp, Condition, QueryOptions, QueryResult},
    row::Row,
    schema::{ColumnSchema, DbType, Shape, TableSchema},
    types::{Float32, Float64, SimId},
    value::Value,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Database,
        backend::MemBackend,
        open,
    };
    pub use rundb_core::prelude::*;
}
