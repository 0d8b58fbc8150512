//! End-to-end coverage over the canonical fixture run: schema
//! introspection, filtered queries, snapshot open/close lifecycle, and the
//! toolkit Position type.

use rundb::{
    CancelFlag, Condition, Database, DbType, Error, OpenError, Position, QueryOptions, Value, open,
};
use rundb_testing_fixtures as fixtures;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU32, Ordering},
};

/// Unique on-disk scratch path per test; cleaned up by `ScratchFile::drop`.
struct ScratchFile(PathBuf);

impl ScratchFile {
    fn new(tag: &str) -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "rundb-test-{}-{tag}-{n}.rundb",
            std::process::id()
        ));
        Self(path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn fixture_db() -> Database {
    Database::attach("fixture", fixtures::backend())
}

#[test]
fn name_reflects_the_opened_source() {
    let scratch = ScratchFile::new("name");
    fixtures::write_fixture_snapshot(&scratch.0).unwrap();

    let db = open(&scratch.0).unwrap();
    assert_eq!(db.name(), scratch.0.display().to_string());
}

#[test]
fn unconditioned_query_has_a_single_sim_id() {
    let db = fixture_db();
    let result = db.query("AgentEntry", &[]).unwrap();
    assert!(!result.is_empty());

    let sim_ids = &result["SimId"];
    let expected = &sim_ids[0];
    for observed in sim_ids {
        assert_eq!(observed, expected);
    }
    assert_eq!(expected.as_sim_id(), Some(fixtures::sim_id()));
}

#[test]
fn kind_equality_selects_the_single_region() {
    let db = fixture_db();
    let result = db
        .query("AgentEntry", &[Condition::eq("Kind", "Region")])
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result["Kind"][0].as_text(), Some("Region"));
    assert_eq!(
        result["Spec"][0].as_text(),
        Some(fixtures::NULL_REGION_SPEC)
    );
}

#[test]
fn nuclide_and_mass_fraction_bounds_combine() {
    let db = fixture_db();
    let conditions = [
        Condition::eq("NucId", fixtures::U235),
        Condition::le("MassFrac", Value::float64(0.0072).unwrap()),
    ];
    let result = db.query("Compositions", &conditions).unwrap();

    assert!(!result.is_empty());
    for value in &result["MassFrac"] {
        assert!(value.as_f64().unwrap() < 0.007_200_000_01);
    }
}

#[test]
fn tuple_literals_build_the_same_conditions() {
    let db = fixture_db();
    let conditions = [
        Condition::try_from(("NucId", "==", fixtures::U235)).unwrap(),
        Condition::try_from(("MassFrac", "<=", Value::float64(0.0072).unwrap())).unwrap(),
    ];
    let result = db.query("Compositions", &conditions).unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn agent_entry_schema_matches_declared_layout() {
    let db = fixture_db();
    let schema = db.schema("AgentEntry").unwrap();
    assert_eq!(schema.len(), 8);

    let cols = [
        "SimId",
        "AgentId",
        "Kind",
        "Spec",
        "Prototype",
        "ParentId",
        "Lifetime",
        "EnterTime",
    ];
    let codes: [u16; 8] = [7, 1, 5, 5, 5, 1, 1, 1];

    for (i, column) in schema.iter().enumerate() {
        assert_eq!(column.table(), "AgentEntry");
        assert_eq!(column.col(), cols[i]);
        assert_eq!(column.dbtype().code(), codes[i]);
        assert_eq!(column.index() as usize, i);
        assert_eq!(column.shape().dims(), [-1]);
    }
}

#[test]
fn snapshot_round_trips_through_open() {
    let scratch = ScratchFile::new("roundtrip");
    fixtures::write_fixture_snapshot(&scratch.0).unwrap();

    let db = open(&scratch.0).unwrap();
    assert_eq!(db.sim_id().unwrap(), fixtures::sim_id());

    let tables = db.tables().unwrap();
    assert!(tables.contains("AgentEntry"));
    assert!(tables.contains("Compositions"));
    assert!(tables.contains("Info"));

    let result = db
        .query("AgentEntry", &[Condition::eq("Kind", "Region")])
        .unwrap();
    assert_eq!(result.len(), 1);

    let info = db.query("Info", &[]).unwrap();
    assert_eq!(info["Handle"][0].as_text(), Some("test"));
    assert_eq!(info["InitialYear"][0].as_int(), Some(2007));
}

#[test]
fn open_missing_source_fails_with_not_found() {
    let err = open("/no/such/place/run.rundb").unwrap_err();
    assert!(matches!(err, Error::Open(OpenError::NotFound { .. })));
}

#[test]
fn open_foreign_file_fails_with_unrecognized_format() {
    let scratch = ScratchFile::new("foreign");
    fs::write(&scratch.0, b"not a database, just bytes").unwrap();

    let err = open(&scratch.0).unwrap_err();
    assert!(matches!(
        err,
        Error::Open(OpenError::UnrecognizedFormat { .. })
    ));
}

#[test]
fn open_truncated_snapshot_fails_with_corrupt() {
    let scratch = ScratchFile::new("truncated");
    fixtures::write_fixture_snapshot(&scratch.0).unwrap();

    let bytes = fs::read(&scratch.0).unwrap();
    fs::write(&scratch.0, &bytes[..bytes.len() / 2]).unwrap();

    let err = open(&scratch.0).unwrap_err();
    assert!(matches!(err, Error::Open(OpenError::Corrupt { .. })));
}

#[test]
fn queries_after_close_fail() {
    let scratch = ScratchFile::new("close");
    fixtures::write_fixture_snapshot(&scratch.0).unwrap();

    let mut db = open(&scratch.0).unwrap();
    db.close();
    db.close();

    assert!(matches!(db.query("AgentEntry", &[]), Err(Error::Closed)));
}

#[test]
fn cancellation_applies_through_the_facade() {
    let db = fixture_db();
    let cancel = CancelFlag::new();
    cancel.cancel();

    let options = QueryOptions {
        cancel: Some(&cancel),
        sink: None,
    };
    let err = db.query_with("AgentEntry", &[], &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(rundb::CoreError::Interrupted)
    ));
}

#[test]
fn type_mismatch_fails_before_any_row_is_returned() {
    let db = fixture_db();
    let err = db
        .query("AgentEntry", &[Condition::eq("AgentId", "eleven")])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Core(rundb::CoreError::TypeMismatch { .. })
    ));
}

#[test]
fn schema_exposes_column_types_by_name() {
    let db = fixture_db();
    let types = db.schema("Compositions").unwrap().column_types();
    assert_eq!(types["MassFrac"], DbType::Float64);
    assert_eq!(types["NucId"], DbType::Int);
}

#[test]
fn position_distance_of_identical_points_is_exactly_zero() {
    let p1 = Position::new(42.65, 28.6);
    let p2 = Position::new(42.65, 28.6);
    assert_eq!(p1.distance(&p2), 0.0);
}
