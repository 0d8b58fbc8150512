//! Parsing of `--where` clauses against a table's declared column types.

use rundb::{CompareOp, Condition, DbType, SimId, TableSchema, Value};
use std::str::FromStr;

// longest symbols first so "<=" never parses as "<"
const SYMBOLS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];

/// Parse every clause, resolving operand literals against the schema.
pub fn parse_clauses(schema: &TableSchema, clauses: &[String]) -> Result<Vec<Condition>, String> {
    clauses
        .iter()
        .map(|clause| parse_clause(schema, clause))
        .collect()
}

fn parse_clause(schema: &TableSchema, clause: &str) -> Result<Condition, String> {
    let (column, symbol, literal) = split_clause(clause)?;

    let dbtype = schema
        .column(column)
        .ok_or_else(|| {
            format!(
                "unknown column '{column}' in table '{}'",
                schema.table()
            )
        })?
        .dbtype();

    let op = CompareOp::from_str(symbol).map_err(|err| err.to_string())?;
    let value = parse_literal(dbtype, literal)
        .ok_or_else(|| format!("'{literal}' is not a valid {} literal", dbtype.label()))?;

    Ok(Condition::new(column, op, value))
}

fn split_clause(clause: &str) -> Result<(&str, &str, &str), String> {
    for symbol in SYMBOLS {
        if let Some(at) = clause.find(symbol) {
            let column = clause[..at].trim();
            let literal = clause[at + symbol.len()..].trim();
            if column.is_empty() || literal.is_empty() {
                break;
            }
            return Ok((column, symbol, literal));
        }
    }

    Err(format!(
        "cannot parse clause '{clause}'; expected column<op>literal with op one of {}",
        SYMBOLS.join(" ")
    ))
}

/// Interpret a literal according to the column's declared type. Containers
/// and blobs are not expressible on the command line.
fn parse_literal(dbtype: DbType, literal: &str) -> Option<Value> {
    let literal = literal.trim_matches('"');

    match dbtype {
        DbType::Bool => literal.parse::<bool>().ok().map(Value::Bool),
        DbType::Int => literal.parse::<i64>().ok().map(Value::Int),
        DbType::Float32 => literal.parse::<f32>().ok().and_then(Value::float32),
        DbType::Float64 => literal.parse::<f64>().ok().and_then(Value::float64),
        DbType::Text | DbType::VlText => Some(Value::from(literal)),
        DbType::SimId => SimId::from_str(literal).ok().map(Value::SimId),
        DbType::Blob
        | DbType::IntList
        | DbType::Float64List
        | DbType::TextList
        | DbType::IntFloat64Map
        | DbType::TextFloat64Map => None,
    }
}
