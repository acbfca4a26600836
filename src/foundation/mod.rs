//! Shared primitives: error taxonomy and color handling.

pub mod color;
pub mod error;
