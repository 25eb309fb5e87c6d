//! Formatting attributes and their merge policy.
//!
//! An insert or retain may carry a map from attribute key to scalar value.
//! A key can also hold an explicit clear marker: on a retain it instructs
//! the underlying content to drop that key, which is different from the key
//! simply not being mentioned. The wire format writes the marker as `null`.

use indexmap::IndexMap;
use serde_json::Number;

/// A scalar attribute payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Num(Number),
    Bool(bool),
}

/// An attribute value: a concrete scalar, or an explicit clear-instruction
/// for the key.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Set(Scalar),
    Cleared,
}

impl AttrValue {
    pub fn is_cleared(&self) -> bool {
        matches!(self, AttrValue::Cleared)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Set(Scalar::Str(s.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Set(Scalar::Str(s))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Set(Scalar::Bool(b))
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Set(Scalar::Num(Number::from(n)))
    }
}

impl From<u64> for AttrValue {
    fn from(n: u64) -> Self {
        AttrValue::Set(Scalar::Num(Number::from(n)))
    }
}

/// Formatting metadata attached to an insert or retain.
///
/// Equality is deep value equality and independent of key order. An empty
/// map never appears on a stored operation; it is normalized to absent.
pub type AttributeMap = IndexMap<String, AttrValue>;

/// Merge `applied` over `base`.
///
/// Every key present in `applied` wins, including explicit clears. With
/// `keep_nulls` set, cleared keys survive in the output as
/// clear-instructions; without it they are dropped — freshly inserted
/// content has nothing to clear, so a dangling instruction would be
/// meaningless. Returns `None` when no keys remain.
///
/// ```
/// use rich_delta::attributes::{compose, AttrValue, AttributeMap};
///
/// let base: AttributeMap = [("bold".to_string(), AttrValue::from(true))].into_iter().collect();
/// let applied: AttributeMap = [("bold".to_string(), AttrValue::Cleared)].into_iter().collect();
///
/// assert_eq!(compose(Some(&base), Some(&applied), false), None);
/// let kept = compose(Some(&base), Some(&applied), true).unwrap();
/// assert!(kept["bold"].is_cleared());
/// ```
pub fn compose(
    base: Option<&AttributeMap>,
    applied: Option<&AttributeMap>,
    keep_nulls: bool,
) -> Option<AttributeMap> {
    let mut out: AttributeMap = base.cloned().unwrap_or_default();
    if let Some(applied) = applied {
        for (key, value) in applied {
            out.insert(key.clone(), value.clone());
        }
    }
    if !keep_nulls {
        out.retain(|_, value| !value.is_cleared());
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
