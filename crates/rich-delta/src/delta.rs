//! The ordered, self-normalizing operation sequence.

use crate::attributes::{self, AttributeMap};
use crate::cursor::OpCursor;
use crate::op::{Embed, Op, OpKind};

/// An ordered sequence of operations describing either a document (inserts
/// only) or an edit (retains and deletes mixed with new content) over some
/// base.
///
/// The sequence is kept maximally normalized: adjacent operations of the
/// same kind with equal attribute sets merge as they are pushed, and
/// zero-length operations never appear.
///
/// Deltas are value objects. The builder methods chain by value, and
/// [`compose`](Delta::compose) never touches its operands:
///
/// ```
/// use rich_delta::Delta;
///
/// let doc = Delta::new().insert("hello world", None);
/// let edit = Delta::new().retain(5, None).delete(6);
/// assert_eq!(doc.compose(&edit), Delta::new().insert("hello", None));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing operation sequence, re-pushing every op
    /// through the normalization gate. A sequence stored unmerged comes
    /// back behaviorally identical.
    pub fn from_ops<I: IntoIterator<Item = Op>>(ops: I) -> Self {
        let mut delta = Delta::new();
        for op in ops {
            delta.push(op);
        }
        delta
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.ops.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total length in content units: the document size for a document
    /// delta, base span plus inserted units for an edit.
    pub fn len(&self) -> usize {
        self.ops.iter().map(Op::len).sum()
    }

    /// Append a text insert.
    pub fn insert(mut self, text: impl Into<String>, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::Insert {
            text: text.into(),
            attributes,
        });
        self
    }

    /// Append an embedded-object insert.
    pub fn insert_embed(mut self, embed: Embed, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::InsertEmbed { embed, attributes });
        self
    }

    /// Append a delete. A zero length is a no-op.
    pub fn delete(mut self, len: usize) -> Self {
        self.push(Op::Delete { len });
        self
    }

    /// Append a retain. A zero length is a no-op; an attribute map with no
    /// keys is stored as absent.
    pub fn retain(mut self, len: usize, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::Retain { len, attributes });
        self
    }

    /// The single normalization gate every operation passes through.
    ///
    /// In order: zero-length operations vanish; a push onto an empty
    /// sequence appends; two adjacent text inserts with equal attribute
    /// sets concatenate; two adjacent deletes sum without any attribute
    /// check; two adjacent retains with equal attribute sets sum; anything
    /// else appends as a new trailing operation.
    pub fn push(&mut self, mut op: Op) {
        if op.is_empty() {
            return;
        }
        if let Op::Insert { attributes, .. }
        | Op::InsertEmbed { attributes, .. }
        | Op::Retain { attributes, .. } = &mut op
        {
            if attributes.as_ref().is_some_and(|a| a.is_empty()) {
                *attributes = None;
            }
        }
        let merged = match (self.ops.last_mut(), &op) {
            (
                Some(Op::Insert {
                    text: last_text,
                    attributes: last_attrs,
                }),
                Op::Insert { text, attributes },
            ) if *last_attrs == *attributes => {
                last_text.push_str(text);
                true
            }
            (Some(Op::Delete { len: last_len }), Op::Delete { len }) => {
                *last_len += len;
                true
            }
            (
                Some(Op::Retain {
                    len: last_len,
                    attributes: last_attrs,
                }),
                Op::Retain { len, attributes },
            ) if *last_attrs == *attributes => {
                *last_len += len;
                true
            }
            _ => false,
        };
        if !merged {
            self.ops.push(op);
        }
    }

    /// Merge an edit into this delta, producing a new equivalent delta.
    ///
    /// `self` is the base (a document, or an earlier edit) and `other` the
    /// edit layered on top. The two sequences are read through cursors in
    /// lockstep:
    ///
    /// - an insert from `other` has no counterpart in the base and passes
    ///   through unchanged;
    /// - a delete from `self` refers to content `other` never saw and is
    ///   drained first, unchanged;
    /// - otherwise an aligned span is taken from both sides. A retain from
    ///   `other` keeps the base's content (retain over retain stays a
    ///   retain, retain over insert keeps the inserted content) and
    ///   overlays its attributes — clear-instructions survive only onto
    ///   retains, never onto fresh content. A delete from `other` cancels
    ///   against base inserts and records a delete over base retains.
    ///
    /// Neither operand is modified. Every produced operation funnels
    /// through [`push`](Delta::push), so the result is maximally merged.
    /// An edit whose retain/delete span runs past the base's content is
    /// carried through: the overshoot reads as an implicit attribute-less
    /// retain on the exhausted side.
    pub fn compose(&self, other: &Delta) -> Delta {
        let mut base = OpCursor::new(&self.ops);
        let mut edit = OpCursor::new(&other.ops);
        let mut out = Delta::new();

        while base.has_more() || edit.has_more() {
            if edit.peek_kind() == OpKind::Insert {
                out.push(edit.take_rest());
                continue;
            }
            if base.peek_kind() == OpKind::Delete {
                out.push(base.take_rest());
                continue;
            }
            let n = base.peek_remaining().min(edit.peek_remaining());
            let base_op = base.take(n);
            let edit_op = edit.take(n);
            match edit_op {
                Op::Retain {
                    attributes: applied,
                    ..
                } => {
                    let keep_nulls = base_op.kind() == OpKind::Retain;
                    let attributes =
                        attributes::compose(base_op.attributes(), applied.as_ref(), keep_nulls);
                    match base_op {
                        Op::Retain { .. } => out.push(Op::Retain { len: n, attributes }),
                        Op::Insert { text, .. } => out.push(Op::Insert { text, attributes }),
                        Op::InsertEmbed { embed, .. } => {
                            out.push(Op::InsertEmbed { embed, attributes })
                        }
                        // base deletes were drained before alignment
                        Op::Delete { .. } => unreachable!(),
                    }
                }
                Op::Delete { .. } => {
                    // a base insert immediately removed leaves no trace;
                    // previously existing content is recorded as removed
                    if base_op.kind() == OpKind::Retain {
                        out.push(Op::Delete { len: n });
                    }
                }
                // edit inserts were consumed before alignment
                Op::Insert { .. } | Op::InsertEmbed { .. } => unreachable!(),
            }
        }
        out
    }

    /// Extract the sub-sequence covering the unit range `[start, end)`,
    /// splitting the operations on its boundary. Attributes travel with
    /// their operations.
    pub fn slice(&self, start: usize, end: usize) -> Delta {
        let mut cursor = OpCursor::new(&self.ops);
        let mut out = Delta::new();
        let mut pos = 0;
        while pos < end && cursor.has_more() {
            if pos < start {
                pos += cursor.take(start - pos).len();
            } else {
                let op = cursor.take(end - pos);
                pos += op.len();
                out.push(op);
            }
        }
        out
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Delta::from_ops(iter)
    }
}

impl IntoIterator for Delta {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Delta {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
