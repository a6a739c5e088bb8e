//! Archive implementations for common types.
//!
//! Every implementation here works with any context and passes it through to nested values.

pub mod bytes;
pub mod fixed;
pub mod primitives;
pub mod tuple;
pub mod vec;
