use thiserror::Error as ThisError;

pub use rundb_core::error::Error as CoreError;

///
/// Error
///
/// Public failure taxonomy of the database façade. Core engine errors pass
/// through transparently; the façade adds the open, close, and federation
/// failure classes.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error("database is closed")]
    Closed,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("table '{table}': schemas diverge between backends '{left}' and '{right}'")]
    SchemaMismatch {
        table: String,
        left: String,
        right: String,
    },
}

impl Error {
    #[must_use]
    pub const fn is_unknown_table(&self) -> bool {
        matches!(self, Self::Core(CoreError::UnknownTable { .. }))
    }
}

///
/// OpenError
///
/// Everything that can go wrong resolving a source into backends. Fatal to
/// the open attempt only; callers may retry with a corrected source.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum OpenError {
    #[error("corrupt database file '{path}': {message}")]
    Corrupt { path: String, message: String },

    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("no backends supplied")]
    NoBackends,

    #[error("no such database file: '{path}'")]
    NotFound { path: String },

    #[error("backends '{left}' and '{right}' belong to different simulation runs")]
    SimIdMismatch { left: String, right: String },

    #[error("unrecognized database format: '{path}'")]
    UnrecognizedFormat { path: String },
}
