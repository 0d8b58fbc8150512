use crate::{
    backend::Backend,
    error::Error,
    obs::{QueryEvent, QuerySink},
    query::{BoundCondition, Condition, QueryOptions, QueryResult, bind::bind},
    row::Row,
    schema::TableSchema,
    value::strict_cmp,
};

/// Evaluate `conditions` against one backend's rows for `table`.
///
/// All validation happens before the first row is pulled; afterwards the
/// stream is filtered row by row (logical AND over the bound conditions) and
/// survivors are assembled column-wise. Any error aborts the call with no
/// partial result.
pub fn evaluate(
    backend: &dyn Backend,
    table: &str,
    conditions: &[Condition],
    options: &QueryOptions<'_>,
) -> Result<QueryResult, Error> {
    let schema = backend.schema(table)?;
    let bound = bind(&schema, conditions)?;

    if let Some(sink) = options.sink {
        sink.record(QueryEvent::Start {
            table,
            conditions: bound.len(),
        });
    }

    let mut result = QueryResult::new(schema);
    let mut rows_scanned: u64 = 0;

    let mut stream = backend.rows(table)?;
    loop {
        if options.cancel.is_some_and(super::CancelFlag::is_cancelled) {
            return Err(Error::Interrupted);
        }

        let Some(row) = stream.next() else {
            break;
        };
        let row = row?;
        rows_scanned += 1;

        if survives(&row, &bound, result.schema())? {
            result.push_row(row);
        }
    }

    if let Some(sink) = options.sink {
        sink.record(QueryEvent::Finish {
            table,
            rows_scanned,
            rows_kept: result.len() as u64,
        });
    }

    Ok(result)
}

// AND over all bound conditions; a malformed row is backend corruption, not
// a non-match.
fn survives(
    row: &Row,
    bound: &[BoundCondition],
    schema: &TableSchema,
) -> Result<bool, Error> {
    if row.len() != schema.len() {
        return Err(Error::backend(format!(
            "row arity {} does not match schema arity {} for table '{}'",
            row.len(),
            schema.len(),
            schema.table()
        )));
    }

    for condition in bound {
        if !condition.matches(row, schema)? {
            return Ok(false);
        }
    }

    Ok(true)
}

impl BoundCondition {
    fn matches(&self, row: &Row, schema: &TableSchema) -> Result<bool, Error> {
        let actual = row.get(self.index).ok_or_else(|| {
            Error::backend(format!(
                "row is missing column index {} for table '{}'",
                self.index,
                schema.table()
            ))
        })?;

        let ordering = strict_cmp(actual, &self.operand).ok_or_else(|| {
            Error::backend(format!(
                "stored value of kind {} does not match declared column type in table '{}'",
                actual.label(),
                schema.table()
            ))
        })?;

        Ok(self.op.admits(ordering))
    }
}
