//! Static site configuration consumed read-only by the pipeline.

pub mod model;
