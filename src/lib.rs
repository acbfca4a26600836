//! Ogweave turns a small set of declarative page descriptions into fixed-size
//! PNG social-preview images at build time; no runtime server is involved.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`AssetResolver`] loads background photos (local-first,
//!    bounded-redirect network fallback for the default) and the three
//!    required font weights, caching each distinct path once per run.
//! 2. **Build**: [`build_page_template`] composes a deterministic five-layer
//!    [`VisualTree`] per page, with no imperative drawing calls.
//! 3. **Rasterize**: [`Rasterizer`] vectorizes the tree (`usvg`) and renders
//!    it (`resvg`) into a standalone 1200x630 PNG.
//! 4. **Orchestrate**: [`BatchPipeline`] runs every page strictly
//!    sequentially and isolates per-page failures; one bad page never aborts
//!    the batch.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: template construction and SVG
//!   serialization are pure and stable for a given input.
//! - **Explicit ownership**: the asset cache lives inside a resolver scoped
//!   to one batch run; there is no ambient global state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod render;
mod template;

/// Batch orchestration and run summaries.
pub mod pipeline;

pub use assets::http::{
    HttpResponse, HttpTransport, MAX_REDIRECT_HOPS, ReqwestTransport, download,
};
pub use assets::resolver::{AssetResolver, PLACEHOLDER_DATA_URI, data_uri, mime_for_path};
pub use config::model::{AccentColors, PageConfig, SiteConfig};
pub use foundation::color::Color;
pub use foundation::error::{OgweaveError, OgweaveResult};
pub use pipeline::{BatchPipeline, GenerationFailure, GenerationResult, GenerationSummary};
pub use render::rasterizer::{FONT_FILES, FontSet, Rasterizer, RenderBackend};
pub use template::builder::{CARD_H, CARD_W, build_page_template, wrap_text};
pub use template::svg::{FONT_FAMILY, tree_to_svg};
pub use template::tree::{
    CANVAS_H, CANVAS_W, GradientStop, LinearGradient, Node, Paint, ShadowStyle, StrokeStyle,
    TextAnchor, TextNode, VisualTree,
};
