use crate::{backend::MemBackend, error::OpenError};
use rundb_core::{
    row::Row,
    schema::{DbType, Shape, TableSchema},
    types::SimId,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use thiserror::Error as ThisError;

/// First bytes of every snapshot file; the trailing byte is the format
/// version.
pub(crate) const MAGIC: [u8; 8] = *b"RUNDBSS\x01";

///
/// SnapshotWriteError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SnapshotWriteError {
    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_cbor::Error),

    #[error("cannot write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

///
/// On-wire layout. Column index and table name are implied by position and
/// map key, so a snapshot cannot encode a non-contiguous schema at all.
///

#[derive(Deserialize, Serialize)]
struct SnapshotFile {
    sim_id: SimId,
    tables: BTreeMap<String, SnapshotTable>,
}

#[derive(Deserialize, Serialize)]
struct SnapshotTable {
    columns: Vec<SnapshotColumn>,
    rows: Vec<Row>,
}

#[derive(Deserialize, Serialize)]
struct SnapshotColumn {
    col: String,
    dbtype: DbType,
    shape: Shape,
}

/// Serialize a backend's full contents to `path` (fixture/export use; the
/// query layer itself never writes).
pub fn write_snapshot(path: impl AsRef<Path>, backend: &MemBackend) -> Result<(), SnapshotWriteError> {
    use rundb_core::backend::Backend;

    let mut tables = BTreeMap::new();
    for (schema, rows) in backend.dump() {
        let columns = schema
            .iter()
            .map(|column| SnapshotColumn {
                col: column.col().to_string(),
                dbtype: column.dbtype(),
                shape: column.shape().clone(),
            })
            .collect();

        tables.insert(
            schema.table().to_string(),
            SnapshotTable {
                columns,
                rows: rows.to_vec(),
            },
        );
    }

    let file = SnapshotFile {
        sim_id: backend.sim_id(),
        tables,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&MAGIC)?;
    serde_cbor::to_writer(&mut writer, &file)?;
    writer.flush()?;

    Ok(())
}

/// Materialize a snapshot file as an in-memory backend.
///
/// The caller has already matched `MAGIC`; everything after it must decode
/// and re-validate or the file is reported corrupt.
pub(crate) fn read_snapshot(path: &Path, name: &str) -> Result<MemBackend, OpenError> {
    let corrupt = |message: String| OpenError::Corrupt {
        path: name.to_string(),
        message,
    };

    let file = File::open(path).map_err(|err| OpenError::Io {
        path: name.to_string(),
        message: err.to_string(),
    })?;

    let mut reader = BufReader::new(file);
    let mut magic = [0u8; MAGIC.len()];
    reader
        .read_exact(&mut magic)
        .map_err(|err| corrupt(err.to_string()))?;
    if magic != MAGIC {
        return Err(OpenError::UnrecognizedFormat {
            path: name.to_string(),
        });
    }

    let decoded: SnapshotFile =
        serde_cbor::from_reader(&mut reader).map_err(|err| corrupt(err.to_string()))?;

    let mut backend = MemBackend::new(name, decoded.sim_id);
    for (table, contents) in decoded.tables {
        let mut builder = TableSchema::builder(&table);
        for column in contents.columns {
            builder = builder.column_shaped(column.col, column.dbtype, column.shape);
        }
        let schema = builder.build().map_err(|err| corrupt(err.to_string()))?;

        backend
            .create_table(schema)
            .map_err(|err| corrupt(err.to_string()))?;
        for row in contents.rows {
            backend
                .insert(&table, row)
                .map_err(|err| corrupt(err.to_string()))?;
        }
    }

    Ok(backend)
}

/// Whether the file at `path` starts with the snapshot magic.
pub(crate) fn probe(path: &Path) -> std::io::Result<bool> {
    let mut reader = File::open(path)?;
    let mut magic = [0u8; MAGIC.len()];

    match reader.read_exact(&mut magic) {
        Ok(()) => Ok(magic == MAGIC),
        // too short to carry the header: some other format
        Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}
