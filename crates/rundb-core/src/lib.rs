//! Core runtime for rundb: the value model, declared column schemas, filter
//! conditions, the backend capability trait, and the streaming query engine.
//!
//! Everything here is backend-agnostic: a concrete store only has to satisfy
//! [`backend::Backend`] and the engine does the rest.

pub mod backend;
pub mod error;
pub mod obs;
pub mod query;
pub mod row;
pub mod schema;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, engines, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        backend::Backend,
        query::{CompareOp, Condition},
        row::Row,
        schema::{ColumnSchema, DbType, Shape, TableSchema},
        types::SimId,
        value::Value,
    };
}
