//! Batch orchestration: resolve assets, build and rasterize every page,
//! write output files, and isolate per-page failures.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    assets::{http::ReqwestTransport, resolver::AssetResolver},
    config::model::SiteConfig,
    foundation::error::{OgweaveError, OgweaveResult},
    render::rasterizer::{FontSet, Rasterizer, RenderBackend},
    template::builder::build_page_template,
};

/// Successful generation record for one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    /// Page slug.
    pub slug: String,
    /// Filename written under the output directory.
    pub output_filename: String,
}

/// Failure record for one page; the batch continued past it.
#[derive(Clone, Debug)]
pub struct GenerationFailure {
    /// Page slug.
    pub slug: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Aggregated outcome of one batch run.
#[derive(Clone, Debug, Default)]
pub struct GenerationSummary {
    /// Number of pages attempted.
    pub total: usize,
    /// Per-page success records, in declared page order.
    pub results: Vec<GenerationResult>,
    /// Per-page failure records, in declared page order.
    pub failures: Vec<GenerationFailure>,
}

impl GenerationSummary {
    /// Count of pages successfully rendered.
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// Filenames written during this run.
    pub fn written(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|r| r.output_filename.as_str())
            .collect()
    }
}

/// Sequential batch generator.
///
/// Pages are processed strictly in declared order, one at a time; at most one
/// tree, one vector and one raster buffer are alive at any point. A failure
/// at build or rasterize stage for one page never aborts the batch. Missing
/// fonts, by contrast, are fatal before any page is attempted.
pub struct BatchPipeline<B: RenderBackend> {
    config: SiteConfig,
    resolver: AssetResolver,
    backend: B,
}

impl<B: RenderBackend> std::fmt::Debug for BatchPipeline<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchPipeline")
            .field("pages", &self.config.pages.len())
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl BatchPipeline<Rasterizer> {
    /// Construct the production pipeline rooted at `root`.
    ///
    /// Loads the three required font weights up front; a missing font file
    /// surfaces here as [`OgweaveError::MissingAsset`] and produces zero
    /// output files.
    pub fn new(config: SiteConfig, root: impl Into<PathBuf>) -> OgweaveResult<Self> {
        let transport = ReqwestTransport::new()?;
        let resolver = AssetResolver::new(root, Box::new(transport));
        let fonts = FontSet::load(&resolver, &config.fonts_dir)?;
        Ok(Self {
            config,
            resolver,
            backend: Rasterizer::new(fonts),
        })
    }
}

impl<B: RenderBackend> BatchPipeline<B> {
    /// Construct a pipeline with an explicit resolver and render backend.
    pub fn with_backend(config: SiteConfig, resolver: AssetResolver, backend: B) -> Self {
        Self {
            config,
            resolver,
            backend,
        }
    }

    /// Generate every configured page and return the aggregated summary.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> OgweaveResult<GenerationSummary> {
        let out_dir = self.resolver.root().join(&self.config.output_dir);
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

        // Always resolved, even when every page overrides it: it is also the
        // fallback for overrides that fail to resolve.
        let default_uri = self.resolver.resolve_default_background(
            &self.config.default_background,
            self.config.default_background_url.as_deref(),
        );

        let mut summary = GenerationSummary {
            total: self.config.pages.len(),
            ..GenerationSummary::default()
        };

        for page in &self.config.pages {
            let background = match &page.bg_image {
                Some(rel) => self
                    .resolver
                    .resolve_page_background(rel)
                    .unwrap_or_else(|| default_uri.clone()),
                None => default_uri.clone(),
            };
            let accents = page.accent_colors.unwrap_or_default();
            let tree = build_page_template(page, &background, &accents);

            let filename = page.output_filename();
            let outcome = self
                .backend
                .render(&tree)
                .and_then(|png| {
                    let path = out_dir.join(&filename);
                    std::fs::write(&path, &png)
                        .with_context(|| format!("write '{}'", path.display()))
                        .map_err(OgweaveError::from)
                });

            match outcome {
                Ok(()) => {
                    tracing::info!(slug = %page.slug, file = %filename, "generated page image");
                    summary.results.push(GenerationResult {
                        slug: page.slug.clone(),
                        output_filename: filename,
                    });
                }
                Err(e) => {
                    tracing::error!(slug = %page.slug, error = %e, "page generation failed");
                    summary.failures.push(GenerationFailure {
                        slug: page.slug.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = summary.succeeded(),
            total = summary.total,
            "batch generation finished"
        );
        Ok(summary)
    }
}
