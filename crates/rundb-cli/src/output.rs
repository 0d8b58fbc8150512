//! Text and JSON rendering for schemas and query results.

use rundb::{QueryResult, TableSchema, Value};
use serde_json::{Map, Number, json};
use std::fmt::Write;

pub fn schema_text(schema: &TableSchema) -> String {
    let mut out = String::new();
    for column in schema {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:<16} {}",
            column.index(),
            column.col(),
            format!("{} ({})", column.dbtype().label(), column.dbtype().code()),
            column.shape(),
        );
    }
    out
}

pub fn schema_json(schema: &TableSchema) -> String {
    let columns: Vec<serde_json::Value> = schema
        .iter()
        .map(|column| {
            json!({
                "table": column.table(),
                "col": column.col(),
                "dbtype": column.dbtype().code(),
                "index": column.index(),
                "shape": column.shape().dims(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&columns).expect("schema rendering is infallible")
}

pub fn result_text(result: &QueryResult) -> String {
    let mut out = String::new();

    let header: Vec<&str> = result.schema().iter().map(|c| c.col()).collect();
    let _ = writeln!(out, "{}", header.join("\t"));

    for row in 0..result.len() {
        let cells: Vec<String> = result
            .iter()
            .map(|(_, values)| values[row].to_string())
            .collect();
        let _ = writeln!(out, "{}", cells.join("\t"));
    }

    let _ = writeln!(out, "({} rows)", result.len());
    out
}

pub fn result_json(result: &QueryResult) -> String {
    let mut columns = Map::new();
    for (column, values) in result.iter() {
        columns.insert(
            column.col().to_string(),
            serde_json::Value::Array(values.iter().map(value_json).collect()),
        );
    }

    serde_json::to_string_pretty(&serde_json::Value::Object(columns))
        .expect("result rendering is infallible")
}

// Cells render by content, not by tag: numbers as numbers, ids and blobs as
// strings, containers structurally.
fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Blob(_) | Value::SimId(_) => serde_json::Value::String(value.to_string()),
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Float32(x) => Number::from_f64(f64::from(x.get()))
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Float64(x) => Number::from_f64(x.get())
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Int(n) => serde_json::Value::Number((*n).into()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_json).collect()),
        Value::Map(entries) => {
            let mut map = Map::new();
            for (key, entry) in entries {
                map.insert(key.to_string(), value_json(entry));
            }
            serde_json::Value::Object(map)
        }
        Value::Text(s) => serde_json::Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rundb::{Condition, Database};

    fn db() -> Database {
        Database::attach("fixture", rundb_testing_fixtures::backend())
    }

    #[test]
    fn schema_json_exposes_codes_and_shapes() {
        let schema = db().schema("AgentEntry").unwrap();
        let rendered: serde_json::Value = serde_json::from_str(&schema_json(&schema)).unwrap();

        assert_eq!(rendered[0]["col"], "SimId");
        assert_eq!(rendered[0]["dbtype"], 7);
        assert_eq!(rendered[0]["shape"], json!([-1]));
        assert_eq!(rendered.as_array().unwrap().len(), 8);
    }

    #[test]
    fn result_json_renders_cells_by_content() {
        let result = db()
            .query("AgentEntry", &[Condition::eq("Kind", "Region")])
            .unwrap();
        let rendered: serde_json::Value = serde_json::from_str(&result_json(&result)).unwrap();

        assert_eq!(rendered["Kind"], json!(["Region"]));
        assert_eq!(rendered["AgentId"], json!([11]));
    }

    #[test]
    fn result_text_has_header_rows_and_count() {
        let result = db().query("Info", &[]).unwrap();
        let text = result_text(&result);
        let mut lines = text.lines();

        assert!(lines.next().unwrap().starts_with("SimId\tHandle"));
        assert!(text.ends_with("(1 rows)\n"));
    }
}
