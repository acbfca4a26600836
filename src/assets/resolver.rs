use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::{
    assets::http::{self, HttpTransport},
    foundation::error::{OgweaveError, OgweaveResult},
};

/// Embedded 1x1 transparent PNG used when the default background cannot be
/// retrieved. Degrading beats aborting: the card and text layers still render.
pub const PLACEHOLDER_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// MIME type inferred from a file extension.
///
/// Unknown or missing extensions fall back to JPEG, which matches the
/// photographic backgrounds the template is designed around.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/jpeg",
    }
}

/// Encode raw image bytes as a base64 data URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Loads background images and font files, caching each distinct resolved
/// path so it is read or fetched at most once per run.
///
/// The resolver owns its cache for the lifetime of one batch run and is
/// threaded through the pipeline explicitly; there is no ambient global
/// state.
pub struct AssetResolver {
    root: PathBuf,
    transport: Box<dyn HttpTransport>,
    backgrounds: HashMap<PathBuf, String>,
    loads: usize,
}

impl AssetResolver {
    /// Construct a resolver rooted at the project directory.
    pub fn new(root: impl Into<PathBuf>, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            root: root.into(),
            transport,
            backgrounds: HashMap::new(),
            loads: 0,
        }
    }

    /// Project root used to resolve relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the process-wide default background.
    ///
    /// Local-first; on a local miss the configured URL (if any) is fetched
    /// and the bytes are persisted back to the local default path so future
    /// runs skip the network. Retrieval failures degrade to the embedded
    /// placeholder pixel and never abort the run.
    pub fn resolve_default_background(&mut self, rel_path: &str, url: Option<&str>) -> String {
        let abs = self.absolute(rel_path);
        if let Some(cached) = self.backgrounds.get(&abs) {
            return cached.clone();
        }

        let uri = match self.load_local_background(&abs) {
            Some(uri) => uri,
            None => match url {
                Some(url) => match self.download_default(&abs, url) {
                    Ok(uri) => uri,
                    Err(e) => {
                        tracing::warn!(url, error = %e, "default background retrieval failed; using placeholder");
                        PLACEHOLDER_DATA_URI.to_string()
                    }
                },
                None => {
                    tracing::warn!(
                        path = %abs.display(),
                        "default background missing and no url configured; using placeholder"
                    );
                    PLACEHOLDER_DATA_URI.to_string()
                }
            },
        };

        self.backgrounds.insert(abs, uri.clone());
        uri
    }

    /// Resolve a per-page background override.
    ///
    /// Overrides are local-file-only; a missing path logs a warning and
    /// returns `None` so the caller substitutes the default background. The
    /// network is never attempted for overrides.
    pub fn resolve_page_background(&mut self, rel_path: &str) -> Option<String> {
        let abs = self.absolute(rel_path);
        if let Some(cached) = self.backgrounds.get(&abs) {
            return Some(cached.clone());
        }

        match self.load_local_background(&abs) {
            Some(uri) => {
                self.backgrounds.insert(abs, uri.clone());
                Some(uri)
            }
            None => {
                tracing::warn!(
                    path = %abs.display(),
                    "page background not found; falling back to default"
                );
                None
            }
        }
    }

    /// Read a required font file.
    ///
    /// Fonts are assumed pre-provisioned; a missing file is fatal for the
    /// whole batch and there is no network fallback.
    pub fn load_font(&self, rel_path: &str) -> OgweaveResult<Vec<u8>> {
        let abs = self.absolute(rel_path);
        std::fs::read(&abs).map_err(|_| {
            OgweaveError::missing_asset(format!("required font file '{}'", abs.display()))
        })
    }

    /// Number of underlying reads/fetches performed so far.
    ///
    /// Equals the number of distinct resolved paths, not the number of page
    /// references.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn absolute(&self, rel_path: &str) -> PathBuf {
        let joined = self.root.join(rel_path);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    fn load_local_background(&mut self, abs: &Path) -> Option<String> {
        let bytes = std::fs::read(abs).ok()?;
        self.loads += 1;
        Some(data_uri(mime_for_path(abs), &bytes))
    }

    fn download_default(&mut self, abs: &Path, url: &str) -> OgweaveResult<String> {
        let bytes = http::download(self.transport.as_ref(), url)?;
        self.loads += 1;
        tracing::info!(url, bytes = bytes.len(), "fetched default background");

        // Write-through so future runs resolve locally. A failed write is
        // only a warning; the in-memory bytes are still usable this run.
        if let Some(parent) = abs.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(dir = %parent.display(), error = %e, "could not create background dir");
        }
        if let Err(e) = std::fs::write(abs, &bytes) {
            tracing::warn!(path = %abs.display(), error = %e, "could not persist default background");
        }

        Ok(data_uri(mime_for_path(abs), &bytes))
    }
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("root", &self.root)
            .field("cached_backgrounds", &self.backgrounds.len())
            .field("loads", &self.loads)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
