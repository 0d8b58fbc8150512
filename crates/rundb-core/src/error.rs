use thiserror::Error as ThisError;

///
/// Error
///
/// Query-layer failure taxonomy. Every variant is a synchronous return-path
/// failure; evaluation is all-or-nothing, so no variant ever accompanies a
/// partial result.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error("backend failure: {message}")]
    Backend { message: String },

    #[error("query interrupted")]
    Interrupted,

    #[error("condition on column '{column}' expects {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("unknown table '{table}'")]
    UnknownTable { table: String },
}

impl Error {
    /// Construct a backend failure from any displayable cause.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }

    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}
