use crate::{
    error::Error,
    query::cond::Condition,
    query::BoundCondition,
    schema::{DbType, TableSchema, TypeFamily},
    types::{Float32, Float64},
    value::Value,
};

/// Resolve conditions against a table schema before any row is read.
///
/// Fails fast with `UnknownColumn` or `TypeMismatch`; nothing streams until
/// every condition is bound. Numeric Int literals are widened here, once, to
/// the column's declared float width so per-row evaluation stays a strict
/// same-variant comparison.
pub(crate) fn bind(
    schema: &TableSchema,
    conditions: &[Condition],
) -> Result<Vec<BoundCondition>, Error> {
    conditions
        .iter()
        .map(|condition| bind_one(schema, condition))
        .collect()
}

fn bind_one(schema: &TableSchema, condition: &Condition) -> Result<BoundCondition, Error> {
    let column = schema.column(condition.column()).ok_or_else(|| {
        Error::unknown_column(schema.table(), condition.column())
    })?;

    let dbtype = column.dbtype();

    if condition.op().is_ordering() && !dbtype.supports_ordering() {
        return Err(type_mismatch(condition, dbtype));
    }

    let operand = widen_operand(dbtype, condition.value())
        .ok_or_else(|| type_mismatch(condition, dbtype))?;

    Ok(BoundCondition {
        index: column.index() as usize,
        op: condition.op(),
        operand,
    })
}

fn type_mismatch(condition: &Condition, dbtype: DbType) -> Error {
    Error::TypeMismatch {
        column: condition.column().to_string(),
        expected: dbtype.label(),
        found: condition.value().label(),
    }
}

/// Convert an operand literal to the column's stored variant.
///
/// `None` means the literal cannot represent a value of the declared type;
/// there is no cross-family coercion. Containers are never filterable.
fn widen_operand(dbtype: DbType, value: &Value) -> Option<Value> {
    if dbtype.family() == TypeFamily::Container {
        return None;
    }

    if dbtype.admits(value) {
        return Some(value.clone());
    }

    match (dbtype, value) {
        // Int literals widen onto float columns; f64 -> f32 narrowing is
        // rejected rather than silently losing precision.
        #[allow(clippy::cast_precision_loss)]
        (DbType::Float64, Value::Int(n)) => Float64::try_new(*n as f64).map(Value::Float64),
        (DbType::Float64, Value::Float32(x)) => {
            Float64::try_new(f64::from(x.get())).map(Value::Float64)
        }
        #[allow(clippy::cast_precision_loss)]
        (DbType::Float32, Value::Int(n)) => Float32::try_new(*n as f32).map(Value::Float32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::cond::CompareOp;

    fn compositions() -> TableSchema {
        TableSchema::builder("Compositions")
            .column("QualId", DbType::Int)
            .column("NucId", DbType::Int)
            .column("MassFrac", DbType::Float64)
            .column("Tags", DbType::TextList)
            .build()
            .unwrap()
    }

    #[test]
    fn binds_column_to_ordinal_index() {
        let schema = compositions();
        let bound = bind(&schema, &[Condition::eq("NucId", 922_350_000_i64)]).unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].index, 1);
        assert_eq!(bound[0].op, CompareOp::Eq);
    }

    #[test]
    fn unknown_column_fails_fast() {
        let schema = compositions();
        let err = bind(&schema, &[Condition::eq("Nuclide", 1_i64)]).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
    }

    #[test]
    fn int_literal_widens_to_float_column() {
        let schema = compositions();
        let bound = bind(&schema, &[Condition::le("MassFrac", 1_i64)]).unwrap();
        assert_eq!(bound[0].operand, Value::float64(1.0).unwrap());
    }

    #[test]
    fn cross_family_literal_is_a_type_mismatch() {
        let schema = compositions();
        let err = bind(&schema, &[Condition::eq("NucId", "922350000")]).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: "Int",
                found: "Text",
                ..
            }
        ));
    }

    #[test]
    fn container_columns_are_not_filterable() {
        let schema = compositions();
        let err = bind(
            &schema,
            &[Condition::eq("Tags", Value::List(vec![Value::Text("a".into())]))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn float_literal_does_not_narrow_to_int_column() {
        let schema = compositions();
        let err = bind(
            &schema,
            &[Condition::eq("NucId", Value::float64(1.0).unwrap())],
        )
        .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
