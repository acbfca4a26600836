//! Asset retrieval and caching: local-first background resolution with a
//! bounded-redirect network fallback, and required font loading.

pub mod http;
pub mod resolver;
