use crate::{
    backend::{Backend, RowStream},
    error::Error,
    obs::{QueryEvent, QuerySink},
    query::{CancelFlag, Condition, QueryOptions, evaluate},
    row::Row,
    schema::{DbType, TableSchema},
    types::SimId,
    value::Value,
};
use std::{
    cell::RefCell,
    collections::BTreeSet,
};

const SIM: SimId = SimId::from_parts(1_700_000_000_000, 7);

struct TestBackend {
    rows: Vec<Row>,
}

impl TestBackend {
    fn inventory() -> Self {
        let rows = vec![
            Row::new(vec![
                Value::SimId(SIM),
                Value::Int(1),
                Value::Text("Region".into()),
                Value::float64(0.25).unwrap(),
            ]),
            Row::new(vec![
                Value::SimId(SIM),
                Value::Int(2),
                Value::Text("Facility".into()),
                Value::float64(0.5).unwrap(),
            ]),
            Row::new(vec![
                Value::SimId(SIM),
                Value::Int(3),
                Value::Text("Facility".into()),
                Value::float64(0.75).unwrap(),
            ]),
        ];

        Self { rows }
    }

    fn schema() -> TableSchema {
        TableSchema::builder("Inventory")
            .column("SimId", DbType::SimId)
            .column("AgentId", DbType::Int)
            .column("Kind", DbType::VlText)
            .column("Quantity", DbType::Float64)
            .build()
            .unwrap()
    }
}

impl Backend for TestBackend {
    fn name(&self) -> &str {
        "test"
    }

    fn sim_id(&self) -> SimId {
        SIM
    }

    fn tables(&self) -> BTreeSet<String> {
        ["Inventory".to_string()].into()
    }

    fn schema(&self, table: &str) -> Result<TableSchema, Error> {
        if table == "Inventory" {
            Ok(Self::schema())
        } else {
            Err(Error::unknown_table(table))
        }
    }

    fn rows(&self, table: &str) -> Result<RowStream<'_>, Error> {
        if table == "Inventory" {
            Ok(Box::new(self.rows.iter().cloned().map(Ok)))
        } else {
            Err(Error::unknown_table(table))
        }
    }
}

#[test]
fn no_conditions_returns_every_row() {
    let backend = TestBackend::inventory();
    let result = evaluate(&backend, "Inventory", &[], &QueryOptions::default()).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.schema().len(), 4);
    assert_eq!(result["AgentId"], [Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn equality_filter_keeps_only_matches() {
    let backend = TestBackend::inventory();
    let result = evaluate(
        &backend,
        "Inventory",
        &[Condition::eq("Kind", "Facility")],
        &QueryOptions::default(),
    )
    .unwrap();

    assert_eq!(result.len(), 2);
    for value in &result["Kind"] {
        assert_eq!(value.as_text(), Some("Facility"));
    }
}

#[test]
fn conditions_combine_as_logical_and() {
    let backend = TestBackend::inventory();
    let result = evaluate(
        &backend,
        "Inventory",
        &[
            Condition::eq("Kind", "Facility"),
            Condition::le("Quantity", Value::float64(0.5).unwrap()),
        ],
        &QueryOptions::default(),
    )
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result["AgentId"], [Value::Int(2)]);
}

#[test]
fn emission_order_is_preserved_among_survivors() {
    let backend = TestBackend::inventory();
    let result = evaluate(
        &backend,
        "Inventory",
        &[Condition::ge("Quantity", Value::float64(0.25).unwrap())],
        &QueryOptions::default(),
    )
    .unwrap();

    assert_eq!(result["AgentId"], [Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn unknown_table_aborts() {
    let backend = TestBackend::inventory();
    let err = evaluate(&backend, "Nope", &[], &QueryOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownTable { .. }));
}

#[test]
fn setup_errors_abort_before_streaming() {
    let backend = TestBackend::inventory();

    let err = evaluate(
        &backend,
        "Inventory",
        &[Condition::eq("Color", "blue")],
        &QueryOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownColumn { .. }));

    let err = evaluate(
        &backend,
        "Inventory",
        &[Condition::eq("Kind", 3_i64)],
        &QueryOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn pre_set_cancel_flag_interrupts() {
    let backend = TestBackend::inventory();
    let cancel = CancelFlag::new();
    cancel.cancel();

    let options = QueryOptions {
        cancel: Some(&cancel),
        sink: None,
    };
    let err = evaluate(&backend, "Inventory", &[], &options).unwrap_err();
    assert_eq!(err, Error::Interrupted);
}

#[test]
fn malformed_row_is_backend_corruption() {
    struct ShortRows;

    impl Backend for ShortRows {
        fn name(&self) -> &str {
            "short"
        }

        fn sim_id(&self) -> SimId {
            SIM
        }

        fn tables(&self) -> BTreeSet<String> {
            ["Inventory".to_string()].into()
        }

        fn schema(&self, _table: &str) -> Result<TableSchema, Error> {
            Ok(TestBackend::schema())
        }

        fn rows(&self, _table: &str) -> Result<RowStream<'_>, Error> {
            Ok(Box::new(std::iter::once(Ok(Row::new(vec![Value::Int(1)])))))
        }
    }

    let err = evaluate(&ShortRows, "Inventory", &[], &QueryOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Backend { .. }));
}

#[test]
fn sink_observes_scanned_and_kept_counts() {
    #[derive(Default)]
    struct Recorder {
        finishes: RefCell<Vec<(u64, u64)>>,
    }

    impl QuerySink for Recorder {
        fn record(&self, event: QueryEvent<'_>) {
            if let QueryEvent::Finish {
                rows_scanned,
                rows_kept,
                ..
            } = event
            {
                self.finishes.borrow_mut().push((rows_scanned, rows_kept));
            }
        }
    }

    let backend = TestBackend::inventory();
    let recorder = Recorder::default();
    let options = QueryOptions {
        cancel: None,
        sink: Some(&recorder),
    };

    let result = evaluate(
        &backend,
        "Inventory",
        &[Condition::eq("Kind", "Region")],
        &options,
    )
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(recorder.finishes.into_inner(), vec![(3, 1)]);
}
