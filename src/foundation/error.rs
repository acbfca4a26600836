/// Convenience result type used across ogweave.
pub type OgweaveResult<T> = Result<T, OgweaveError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum OgweaveError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Terminal non-200 HTTP response while retrieving a remote asset.
    #[error("download error: '{url}' answered with status {status}")]
    Download {
        /// Terminal HTTP status code.
        status: u16,
        /// URL of the request that produced the status.
        url: String,
    },

    /// Transport-level failure (DNS, TLS, connection reset) during retrieval.
    #[error("network error: {0}")]
    Network(String),

    /// Redirect chain exceeded the hop limit.
    #[error("too many redirects: '{url}' exceeded {limit} hops")]
    TooManyRedirects {
        /// URL that started the redirect chain.
        url: String,
        /// Maximum number of hops that was allowed.
        limit: usize,
    },

    /// A required local asset (font file) is absent. Fatal for the whole run.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// Template construction or rasterization failure for one page.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OgweaveError {
    /// Build a [`OgweaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OgweaveError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`OgweaveError::MissingAsset`] value.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Build a [`OgweaveError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether this error aborts the whole batch rather than a single page.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingAsset(_) | Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
