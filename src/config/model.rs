use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    color::Color,
    error::{OgweaveError, OgweaveResult},
};

/// One entry per output image.
///
/// Constructed once at process start as part of [`SiteConfig`] and consumed
/// read-only by the batch pipeline. Display strings carry no hard length
/// limits, but the fixed template assumes soft caps (title ≈ 35 chars,
/// subtitle ≈ 50, description ≈ 150); longer text wraps or clips visually.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Unique, non-empty page identifier; output file is `og-{slug}.png`.
    pub slug: String,
    /// Main heading.
    pub title: String,
    /// Secondary heading.
    pub subtitle: String,
    /// Body text, wrapped into a fixed-width column.
    pub description: String,
    /// Short label rendered in the badge pill near the card top.
    pub badge: String,
    /// Optional project-root-relative path to a per-page background image.
    /// Absent means the process-wide default background is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    /// Optional three-stop gradient override for the divider bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_colors: Option<AccentColors>,
}

impl PageConfig {
    /// Output filename for this page.
    pub fn output_filename(&self) -> String {
        format!("og-{}.png", self.slug)
    }
}

/// Three color stops for the decorative divider gradient, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccentColors {
    /// Leftmost stop.
    pub start: Color,
    /// Center stop.
    pub middle: Color,
    /// Rightmost stop.
    pub end: Color,
}

impl Default for AccentColors {
    fn default() -> Self {
        Self {
            start: Color::rgb(0x8b, 0x5c, 0xf6),
            middle: Color::rgb(0xec, 0x48, 0x99),
            end: Color::rgb(0xf5, 0x9e, 0x0b),
        }
    }
}

/// Static configuration for one generation run.
///
/// A site config is a pure data model deserialized from JSON once at startup;
/// the pipeline consumes it read-only. Asset paths are project-root-relative.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Ordered page list; one output image per entry.
    pub pages: Vec<PageConfig>,
    /// Directory holding the three required font weights.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: String,
    /// Relative path of the default background image.
    #[serde(default = "default_background")]
    pub default_background: String,
    /// URL fetched when the default background is absent locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_background_url: Option<String>,
    /// Directory output files are written to (auto-created).
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_fonts_dir() -> String {
    "assets/fonts".to_string()
}

fn default_background() -> String {
    "assets/backgrounds/default.jpg".to_string()
}

fn default_output_dir() -> String {
    "public/og".to_string()
}

impl SiteConfig {
    /// Load and validate a site config from a JSON file.
    pub fn from_path(path: &Path) -> OgweaveResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read site config '{}'", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse site config '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants and page references.
    ///
    /// Duplicate slugs are rejected here rather than silently resolved by
    /// last-write-wins on the output filename.
    pub fn validate(&self) -> OgweaveResult<()> {
        validate_rel_path(&self.fonts_dir, "fontsDir")?;
        validate_rel_path(&self.default_background, "defaultBackground")?;
        validate_rel_path(&self.output_dir, "outputDir")?;

        let mut seen = std::collections::HashSet::new();
        for page in &self.pages {
            if page.slug.trim().is_empty() {
                return Err(OgweaveError::validation("page slug must be non-empty"));
            }
            if !seen.insert(page.slug.as_str()) {
                return Err(OgweaveError::validation(format!(
                    "duplicate page slug '{}': slugs map one-to-one onto output filenames",
                    page.slug
                )));
            }
            if let Some(bg) = &page.bg_image {
                validate_rel_path(bg, &format!("page '{}' bgImage", page.slug))?;
            }
        }

        Ok(())
    }
}

/// Validate a project-root-relative asset path.
///
/// Rejects empty strings, absolute paths, and parent traversals (`..`).
/// Backslashes are tolerated and treated as separators.
pub fn validate_rel_path(source: &str, field: &str) -> OgweaveResult<()> {
    if source.trim().is_empty() {
        return Err(OgweaveError::validation(format!(
            "{field} must be non-empty"
        )));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(OgweaveError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    for part in s.split('/') {
        if part == ".." {
            return Err(OgweaveError::validation(format!(
                "{field} must not contain '..'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
