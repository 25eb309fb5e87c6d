//! Wire codecs for operation sequences.

pub mod json;
