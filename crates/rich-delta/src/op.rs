//! Delta operations.

use serde_json::{Map, Value};

use crate::attributes::AttributeMap;

/// An opaque embedded-object token (an image reference, a divider, ...).
///
/// The model never inspects the payload; an embed always occupies exactly
/// one content unit.
pub type Embed = Map<String, Value>;

/// A single content instruction.
///
/// Exactly one of the three kinds — insert, delete, retain — with inserts
/// split by payload into text runs and embedded objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Insert a run of text.
    Insert {
        text: String,
        attributes: Option<AttributeMap>,
    },
    /// Insert a single embedded object.
    InsertEmbed {
        embed: Embed,
        attributes: Option<AttributeMap>,
    },
    /// Remove `len` units of underlying content.
    Delete { len: usize },
    /// Keep `len` units of underlying content, optionally re-tagging them.
    Retain {
        len: usize,
        attributes: Option<AttributeMap>,
    },
}

/// The kind of an operation, as seen by the compose loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Insert,
    Delete,
    Retain,
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Insert { .. } | Op::InsertEmbed { .. } => OpKind::Insert,
            Op::Delete { .. } => OpKind::Delete,
            Op::Retain { .. } => OpKind::Retain,
        }
    }

    /// Length in content units: characters for a text run, 1 for an embed,
    /// the stored count for delete and retain.
    pub fn len(&self) -> usize {
        match self {
            Op::Insert { text, .. } => text.chars().count(),
            Op::InsertEmbed { .. } => 1,
            Op::Delete { len } => *len,
            Op::Retain { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attributes carried by the operation; deletes never carry any.
    pub fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Op::Insert { attributes, .. }
            | Op::InsertEmbed { attributes, .. }
            | Op::Retain { attributes, .. } => attributes.as_ref(),
            Op::Delete { .. } => None,
        }
    }

    /// Split into a prefix of length `at` and the remaining suffix, both
    /// halves keeping kind and attributes.
    ///
    /// `at` must lie strictly inside the operation. An embed occupies a
    /// single unit and has no interior position to split at.
    pub fn slice(&self, at: usize) -> (Op, Op) {
        debug_assert!(at > 0 && at < self.len());
        match self {
            Op::Insert { text, attributes } => {
                let byte = text
                    .char_indices()
                    .nth(at)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                let (head, tail) = text.split_at(byte);
                (
                    Op::Insert {
                        text: head.to_string(),
                        attributes: attributes.clone(),
                    },
                    Op::Insert {
                        text: tail.to_string(),
                        attributes: attributes.clone(),
                    },
                )
            }
            Op::InsertEmbed { .. } => unreachable!("an embed occupies a single unit"),
            Op::Delete { len } => (Op::Delete { len: at }, Op::Delete { len: len - at }),
            Op::Retain { len, attributes } => (
                Op::Retain {
                    len: at,
                    attributes: attributes.clone(),
                },
                Op::Retain {
                    len: len - at,
                    attributes: attributes.clone(),
                },
            ),
        }
    }
}
