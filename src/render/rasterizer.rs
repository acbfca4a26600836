use std::{io::Cursor, sync::Arc};

use anyhow::Context as _;

use crate::{
    assets::resolver::AssetResolver,
    foundation::error::{OgweaveError, OgweaveResult},
    template::{
        svg::{FONT_FAMILY, tree_to_svg},
        tree::{CANVAS_H, CANVAS_W, VisualTree},
    },
};

/// The three required font files and the weights they provide.
///
/// All weights belong to one typeface; the template references no others.
pub const FONT_FILES: [(&str, u16); 3] = [
    ("Inter-Regular.ttf", 400),
    ("Inter-Medium.ttf", 500),
    ("Inter-Bold.ttf", 700),
];

/// A renderer that turns a [`VisualTree`] into encoded PNG bytes.
///
/// The production implementation is [`Rasterizer`]; the trait exists so the
/// batch pipeline can be exercised without font files on disk.
pub trait RenderBackend {
    /// Rasterize `tree` into a standalone PNG of exactly 1200x630 pixels.
    fn render(&self, tree: &VisualTree) -> OgweaveResult<Vec<u8>>;
}

/// Font database holding the three required weights of the template typeface.
#[derive(Clone, Debug)]
pub struct FontSet {
    pub(crate) db: Arc<usvg::fontdb::Database>,
}

impl FontSet {
    /// Load the fixed set of required font weights from `fonts_dir`.
    ///
    /// Any absent file is fatal for the whole batch; fonts are assumed
    /// pre-provisioned and have no network fallback.
    pub fn load(resolver: &AssetResolver, fonts_dir: &str) -> OgweaveResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        for (file, weight) in FONT_FILES {
            let bytes = resolver.load_font(&format!("{fonts_dir}/{file}"))?;
            tracing::debug!(file, weight, bytes = bytes.len(), "loaded font");
            db.load_font_data(bytes);
        }
        Ok(Self { db: Arc::new(db) })
    }

    /// Whether the database can satisfy the template family at `weight`.
    pub fn has_weight(&self, weight: u16) -> bool {
        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::Name(FONT_FAMILY)],
            weight: usvg::fontdb::Weight(weight),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        self.db.query(&query).is_some()
    }
}

/// Adapter over the two opaque conversion services: markup-to-vector
/// (`usvg`) and vector-to-raster (`resvg`).
///
/// The adapter enforces canvas dimensions and font availability before
/// producing a buffer; both sub-steps report failures as
/// [`OgweaveError::Render`], which the pipeline recovers per page.
pub struct Rasterizer {
    fonts: FontSet,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("faces", &self.fonts.db.len())
            .finish()
    }
}

impl Rasterizer {
    /// Construct a rasterizer over a loaded font set.
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }

    fn vectorize(&self, tree: &VisualTree) -> OgweaveResult<usvg::Tree> {
        for weight in tree.used_weights() {
            if !self.fonts.has_weight(weight) {
                return Err(OgweaveError::render(format!(
                    "font family '{FONT_FAMILY}' cannot satisfy weight {weight}"
                )));
            }
        }

        let svg = tree_to_svg(tree);
        let opts = usvg::Options {
            fontdb: self.fonts.db.clone(),
            ..usvg::Options::default()
        };
        let vector = usvg::Tree::from_data(svg.as_bytes(), &opts)
            .map_err(|e| OgweaveError::render(format!("vectorize page markup: {e}")))?;

        let size = vector.size();
        if size.width().round() as u32 != CANVAS_W || size.height().round() as u32 != CANVAS_H {
            return Err(OgweaveError::render(format!(
                "vector size {}x{} does not match canvas {CANVAS_W}x{CANVAS_H}",
                size.width(),
                size.height()
            )));
        }

        Ok(vector)
    }

    fn rasterize(&self, vector: &usvg::Tree) -> OgweaveResult<Vec<u8>> {
        let mut pixmap = resvg::tiny_skia::Pixmap::new(CANVAS_W, CANVAS_H)
            .ok_or_else(|| OgweaveError::render("failed to allocate output pixmap"))?;

        let sx = (CANVAS_W as f32) / vector.size().width();
        let sy = (CANVAS_H as f32) / vector.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(vector, xform, &mut pixmap.as_mut());

        // Pixmap stores premultiplied RGBA; PNG wants straight alpha.
        let mut rgba = Vec::with_capacity((CANVAS_W * CANVAS_H * 4) as usize);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut out = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut out,
            &rgba,
            CANVAS_W,
            CANVAS_H,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .context("encode png")?;
        Ok(out.into_inner())
    }
}

impl RenderBackend for Rasterizer {
    #[tracing::instrument(skip(self, tree))]
    fn render(&self, tree: &VisualTree) -> OgweaveResult<Vec<u8>> {
        let vector = self.vectorize(tree)?;
        self.rasterize(&vector)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
