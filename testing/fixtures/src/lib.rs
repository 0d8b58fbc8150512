//! Canonical single-run dataset shared by integration tests and CLI smoke
//! tests: one region/institution/facility hierarchy in `AgentEntry`, natural
//! and enriched uranium vectors in `Compositions`, and run metadata in
//! `Info`.
//!
//! Fixture construction uses literals that are valid by inspection, so
//! builder failures here are programming errors and panic immediately.

use rundb::{
    DbType, SimId, TableSchema, Value,
    backend::{MemBackend, write_snapshot},
    error::Error,
};
use std::path::Path;

/// Every fixture table carries this run identity.
#[must_use]
pub const fn sim_id() -> SimId {
    SimId::from_parts(1_706_000_000_000, 0x5EED)
}

/// U-235 nuclide id as stored in `Compositions.NucId`.
pub const U235: i64 = 922_350_000;

/// U-238 nuclide id as stored in `Compositions.NucId`.
pub const U238: i64 = 922_380_000;

/// Spec string of the fixture's single region agent.
pub const NULL_REGION_SPEC: &str = ":agents:NullRegion";

/// Build the canonical in-memory backend.
#[must_use]
pub fn backend() -> MemBackend {
    let mut backend = MemBackend::new("fixture", sim_id());

    agent_entry(&mut backend);
    compositions(&mut backend);
    info(&mut backend);

    backend
}

/// Export the canonical run as a snapshot file.
pub fn write_fixture_snapshot(path: impl AsRef<Path>) -> Result<(), Error> {
    write_snapshot(&path, &backend())
        .map_err(|err| rundb::OpenError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        })
        .map_err(Error::from)
}

fn agent_entry(backend: &mut MemBackend) {
    let schema = TableSchema::builder("AgentEntry")
        .column("SimId", DbType::SimId)
        .column("AgentId", DbType::Int)
        .column("Kind", DbType::VlText)
        .column("Spec", DbType::VlText)
        .column("Prototype", DbType::VlText)
        .column("ParentId", DbType::Int)
        .column("Lifetime", DbType::Int)
        .column("EnterTime", DbType::Int)
        .build()
        .expect("fixture schema is valid");
    backend
        .create_table(schema)
        .expect("fixture table is fresh");

    let agents: [(i64, &str, &str, &str, i64); 4] = [
        (11, "Region", NULL_REGION_SPEC, "SingleRegion", -1),
        (12, "Inst", ":agents:NullInst", "SingleInstitution", 11),
        (13, "Facility", ":cycamore:Source", "UraniumMine", 12),
        (14, "Facility", ":cycamore:Enrichment", "EnrichmentPlant", 12),
    ];

    for (agent_id, kind, spec, prototype, parent_id) in agents {
        backend
            .insert(
                "AgentEntry",
                vec![
                    Value::SimId(sim_id()),
                    Value::Int(agent_id),
                    Value::from(kind),
                    Value::from(spec),
                    Value::from(prototype),
                    Value::Int(parent_id),
                    Value::Int(-1),
                    Value::Int(0),
                ],
            )
            .expect("fixture row matches schema");
    }
}

fn compositions(backend: &mut MemBackend) {
    let schema = TableSchema::builder("Compositions")
        .column("SimId", DbType::SimId)
        .column("QualId", DbType::Int)
        .column("NucId", DbType::Int)
        .column("MassFrac", DbType::Float64)
        .build()
        .expect("fixture schema is valid");
    backend
        .create_table(schema)
        .expect("fixture table is fresh");

    // qual 1: natural uranium; qual 2: exactly at the filter bound;
    // qual 3: enriched product
    let vectors: [(i64, i64, f64); 6] = [
        (1, U235, 0.0071),
        (1, U238, 0.9929),
        (2, U235, 0.0072),
        (2, U238, 0.9928),
        (3, U235, 0.05),
        (3, U238, 0.95),
    ];

    for (qual_id, nuc_id, mass_frac) in vectors {
        backend
            .insert(
                "Compositions",
                vec![
                    Value::SimId(sim_id()),
                    Value::Int(qual_id),
                    Value::Int(nuc_id),
                    Value::float64(mass_frac).expect("fixture fractions are finite"),
                ],
            )
            .expect("fixture row matches schema");
    }
}

fn info(backend: &mut MemBackend) {
    let schema = TableSchema::builder("Info")
        .column("SimId", DbType::SimId)
        .column("Handle", DbType::VlText)
        .column("InitialYear", DbType::Int)
        .column("InitialMonth", DbType::Int)
        .column("Duration", DbType::Int)
        .build()
        .expect("fixture schema is valid");
    backend
        .create_table(schema)
        .expect("fixture table is fresh");

    backend
        .insert(
            "Info",
            vec![
                Value::SimId(sim_id()),
                Value::from("test"),
                Value::Int(2007),
                Value::Int(1),
                Value::Int(120),
            ],
        )
        .expect("fixture row matches schema");
}
