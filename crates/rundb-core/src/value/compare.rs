use crate::value::Value;
use std::cmp::Ordering;

/// Strict comparator for identical variants.
///
/// Returns `None` for mismatched variants; no coercion happens here. The
/// query layer widens operands to the declared column type before any row is
/// compared. Numeric variants order numerically, `Text` orders by bytes, and
/// float equality is exact IEEE equality.
#[must_use]
pub fn strict_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Blob(a), Value::Blob(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Float32(a), Value::Float32(b)) => Some(a.cmp(b)),
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => strict_cmp_list(a, b),
        (Value::Map(a), Value::Map(b)) => strict_cmp_map(a, b),
        (Value::SimId(a), Value::SimId(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

// Lexicographic over elements, then length.
fn strict_cmp_list(left: &[Value], right: &[Value]) -> Option<Ordering> {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = strict_cmp(left, right)?;
        if cmp != Ordering::Equal {
            return Some(cmp);
        }
    }

    Some(left.len().cmp(&right.len()))
}

fn strict_cmp_map(left: &[(Value, Value)], right: &[(Value, Value)]) -> Option<Ordering> {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = strict_cmp(left_key, right_key)?;
        if key_cmp != Ordering::Equal {
            return Some(key_cmp);
        }

        let value_cmp = strict_cmp(left_value, right_value)?;
        if value_cmp != Ordering::Equal {
            return Some(value_cmp);
        }
    }

    Some(left.len().cmp(&right.len()))
}
