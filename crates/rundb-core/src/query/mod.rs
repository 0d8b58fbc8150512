mod bind;
mod cond;
mod engine;
mod result;

#[cfg(test)]
mod tests;

use crate::value::Value;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

pub use cond::{CompareOp, Condition, ParseOpError};
pub use engine::evaluate;
pub use result::QueryResult;

///
/// CancelFlag
///
/// Cheap cloneable cancellation token. The engine checks it between rows
/// only; a set flag aborts the stream with `Error::Interrupted` and drops
/// the backend's row stream so its resources are released.
///

#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

///
/// QueryOptions
///
/// Caller-supplied evaluation knobs: a cancellation flag and an
/// observability sink. Neither affects which rows survive.
///

#[derive(Clone, Copy, Default)]
pub struct QueryOptions<'a> {
    pub cancel: Option<&'a CancelFlag>,
    pub sink: Option<&'a dyn crate::obs::QuerySink>,
}

///
/// BoundCondition
///
/// A condition resolved against a concrete schema: column ordinal plus an
/// operand already widened to the column's stored variant.
///

#[derive(Clone, Debug)]
pub(crate) struct BoundCondition {
    pub(crate) index: usize,
    pub(crate) op: CompareOp,
    pub(crate) operand: Value,
}
