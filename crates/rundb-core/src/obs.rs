//! Query observability boundary.
//!
//! Engine logic MUST NOT depend on any concrete sink. All instrumentation
//! flows through [`QueryEvent`] and [`QuerySink`]; a sink never affects
//! execution semantics.

///
/// QueryEvent
///

#[derive(Clone, Copy, Debug)]
pub enum QueryEvent<'a> {
    Start {
        table: &'a str,
        conditions: usize,
    },
    Finish {
        table: &'a str,
        rows_scanned: u64,
        rows_kept: u64,
    },
}

///
/// QuerySink
///

pub trait QuerySink {
    fn record(&self, event: QueryEvent<'_>);
}

///
/// NullSink
///
/// Default sink when the caller injects nothing.
///

pub struct NullSink;

impl QuerySink for NullSink {
    fn record(&self, _event: QueryEvent<'_>) {}
}
