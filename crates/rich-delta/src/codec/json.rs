//! JSON codec for deltas.
//!
//! The wire form is an array of loosely-typed op records: each an object
//! with exactly one of `insert` (string or embed object), `delete`
//! (integer), or `retain` (integer) populated, plus an optional
//! `attributes` object whose values are scalars or `null` — `null` marks
//! an explicit clear of the key, not its absence.
//!
//! Decoding funnels every record back through the delta's normalization
//! gate, so a sequence persisted unmerged reloads behaviorally identical.

use serde_json::{Map, Value};

use crate::attributes::{AttrValue, AttributeMap, Scalar};
use crate::delta::Delta;
use crate::error::DeltaError;
use crate::op::Op;

// ── Attributes ────────────────────────────────────────────────────────────

fn encode_attributes(attrs: &AttributeMap) -> Value {
    let mut out = Map::new();
    for (key, value) in attrs {
        let encoded = match value {
            AttrValue::Set(Scalar::Str(s)) => Value::String(s.clone()),
            AttrValue::Set(Scalar::Num(n)) => Value::Number(n.clone()),
            AttrValue::Set(Scalar::Bool(b)) => Value::Bool(*b),
            AttrValue::Cleared => Value::Null,
        };
        out.insert(key.clone(), encoded);
    }
    Value::Object(out)
}

fn decode_attributes(value: &Value) -> Result<Option<AttributeMap>, DeltaError> {
    let obj = value.as_object().ok_or_else(|| {
        DeltaError::InvalidAttributes("attributes must be an object".to_string())
    })?;
    let mut out = AttributeMap::new();
    for (key, value) in obj {
        let decoded = match value {
            Value::Null => AttrValue::Cleared,
            Value::String(s) => AttrValue::Set(Scalar::Str(s.clone())),
            Value::Number(n) => AttrValue::Set(Scalar::Num(n.clone())),
            Value::Bool(b) => AttrValue::Set(Scalar::Bool(*b)),
            _ => {
                return Err(DeltaError::InvalidAttributes(format!(
                    "{key}: expected a scalar or null"
                )))
            }
        };
        out.insert(key.clone(), decoded);
    }
    Ok(if out.is_empty() { None } else { Some(out) })
}

// ── Ops ───────────────────────────────────────────────────────────────────

/// Serialize an op to its wire record.
pub fn to_json(op: &Op) -> Value {
    let mut record = Map::new();
    match op {
        Op::Insert { text, .. } => {
            record.insert("insert".to_string(), Value::String(text.clone()));
        }
        Op::InsertEmbed { embed, .. } => {
            record.insert("insert".to_string(), Value::Object(embed.clone()));
        }
        Op::Delete { len } => {
            record.insert("delete".to_string(), Value::from(*len as u64));
        }
        Op::Retain { len, .. } => {
            record.insert("retain".to_string(), Value::from(*len as u64));
        }
    }
    if let Some(attrs) = op.attributes() {
        record.insert("attributes".to_string(), encode_attributes(attrs));
    }
    Value::Object(record)
}

fn decode_len(kind: &str, value: &Value) -> Result<usize, DeltaError> {
    // a non-positive length decodes to a zero-length op that the
    // normalization gate drops
    match value.as_i64() {
        Some(n) => Ok(n.max(0) as usize),
        None => Err(DeltaError::InvalidOp(format!(
            "{kind} length must be an integer"
        ))),
    }
}

/// Decode a single wire record into an op.
///
/// The record must populate exactly one of `insert`, `delete`, `retain`.
/// Attributes on a `delete` are ignored; deletes never carry any.
pub fn from_json(value: &Value) -> Result<Op, DeltaError> {
    let record = value
        .as_object()
        .ok_or_else(|| DeltaError::InvalidOp("op must be an object".to_string()))?;

    let present: Vec<&str> = ["insert", "delete", "retain"]
        .into_iter()
        .filter(|k| record.contains_key(*k))
        .collect();
    if present.len() > 1 {
        return Err(DeltaError::AmbiguousOp(present.join(", ")));
    }

    let attributes = match record.get("attributes") {
        Some(v) => decode_attributes(v)?,
        None => None,
    };

    if let Some(insert) = record.get("insert") {
        return match insert {
            Value::String(s) => Ok(Op::Insert {
                text: s.clone(),
                attributes,
            }),
            Value::Object(o) => Ok(Op::InsertEmbed {
                embed: o.clone(),
                attributes,
            }),
            _ => Err(DeltaError::InvalidOp(
                "insert must be a string or an object".to_string(),
            )),
        };
    }
    if let Some(delete) = record.get("delete") {
        return Ok(Op::Delete {
            len: decode_len("delete", delete)?,
        });
    }
    if let Some(retain) = record.get("retain") {
        return match retain {
            Value::Number(_) => Ok(Op::Retain {
                len: decode_len("retain", retain)?,
                attributes,
            }),
            // a loosely-typed producer may put an object payload here;
            // it occupies a single unit
            Value::Object(_) => Ok(Op::Retain { len: 1, attributes }),
            _ => Err(DeltaError::InvalidOp("retain must be a number".to_string())),
        };
    }
    Err(DeltaError::EmptyOp)
}

// ── Deltas ────────────────────────────────────────────────────────────────

/// Serialize a delta to its wire form, a JSON array of op records.
pub fn to_json_delta(delta: &Delta) -> Value {
    Value::Array(delta.ops().iter().map(to_json).collect())
}

/// Decode a wire array into a delta, re-normalizing along the way.
pub fn from_json_delta(value: &Value) -> Result<Delta, DeltaError> {
    let records = value
        .as_array()
        .ok_or_else(|| DeltaError::InvalidOp("delta must be an array of ops".to_string()))?;
    let mut delta = Delta::new();
    for record in records {
        delta.push(from_json(record)?);
    }
    Ok(delta)
}
