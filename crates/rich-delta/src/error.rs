//! Errors for the wire boundary.
//!
//! The core operations never fail: non-positive lengths degrade to no-ops
//! and span mismatches resolve through the cursor's implicit tail. Faults
//! only exist where loosely-typed records enter the model.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DeltaError {
    /// A record populated more than one of `insert`/`delete`/`retain`.
    #[error("AMBIGUOUS_OP: {0}")]
    AmbiguousOp(String),
    /// A record populating none of the three kinds.
    #[error("EMPTY_OP")]
    EmptyOp,
    /// A kind field whose payload has the wrong shape.
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
    /// An attribute entry that is not a scalar or `null`.
    #[error("INVALID_ATTRIBUTES: {0}")]
    InvalidAttributes(String),
}
