//! Delta document model for rich text.
//!
//! Content and edits are both expressed as ordered sequences of operations
//! — insert, delete, retain — optionally tagged with formatting attributes.
//! A document is an insert-only delta; an edit mixes retains and deletes
//! with new content. Applying an edit is `document.compose(edit)`, which
//! merges the two sequences into a new, normalized delta:
//!
//! ```
//! use rich_delta::{AttrValue, AttributeMap, Delta};
//!
//! let doc = Delta::new().insert("hello world", None);
//!
//! let bold: AttributeMap = [("bold".to_string(), AttrValue::from(true))]
//!     .into_iter()
//!     .collect();
//! let edit = Delta::new().retain(5, Some(bold.clone())).delete(6);
//!
//! let doc = doc.compose(&edit);
//! assert_eq!(doc, Delta::new().insert("hello", Some(bold)));
//! ```
//!
//! Deltas are value objects: compose never mutates its operands, and every
//! mutation path funnels through a single normalization gate, so adjacent
//! mergeable operations never coexist unmerged and zero-length operations
//! never appear. The [`codec`] module maps sequences to and from their
//! wire form, a JSON array of plain op records.

pub mod attributes;
pub mod codec;
pub mod cursor;
pub mod delta;
pub mod error;
pub mod op;

pub use attributes::{AttrValue, AttributeMap, Scalar};
pub use cursor::OpCursor;
pub use delta::Delta;
pub use error::DeltaError;
pub use op::{Embed, Op, OpKind};
