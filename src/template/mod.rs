//! Declarative page templates: the visual tree type, the fixed five-layer
//! page builder, and deterministic SVG serialization.

pub mod builder;
pub mod svg;
pub mod tree;
