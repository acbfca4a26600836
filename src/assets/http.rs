use crate::foundation::error::{OgweaveError, OgweaveResult};

/// Maximum redirect hops followed before a download is abandoned.
pub const MAX_REDIRECT_HOPS: usize = 5;

static OGWEAVE_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A single terminal or intermediate HTTP response.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Location` header value, if the server sent one.
    pub location: Option<String>,
    /// Fully accumulated response body.
    pub body: Vec<u8>,
}

/// Transport seam for issuing one GET without following redirects.
///
/// The production implementation is [`ReqwestTransport`]; tests inject
/// scripted transports to exercise redirect and failure handling without a
/// network.
pub trait HttpTransport {
    /// Issue a GET for `url` and return the raw response.
    ///
    /// Implementations must not follow redirects themselves; the caller owns
    /// the redirect policy.
    fn get(&self, url: &str) -> OgweaveResult<HttpResponse>;
}

/// Blocking `reqwest` transport with redirect following disabled.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Construct a transport with the crate user agent.
    pub fn new() -> OgweaveResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(OGWEAVE_USER_AGENT)
            .build()
            .map_err(|e| OgweaveError::network(format!("construct http client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> OgweaveResult<HttpResponse> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| OgweaveError::network(format!("GET '{url}': {e}")))?;

        let status = resp.status().as_u16();
        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = resp
            .bytes()
            .map_err(|e| OgweaveError::network(format!("read body of '{url}': {e}")))?
            .to_vec();

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

/// Retrieve `url` fully, following 301/302 redirects up to
/// [`MAX_REDIRECT_HOPS`].
///
/// Relative `Location` values are resolved against the current URL. Any
/// terminal non-200 status yields [`OgweaveError::Download`]; exceeding the
/// hop limit yields [`OgweaveError::TooManyRedirects`]. The body is
/// accumulated completely before this returns.
pub fn download(transport: &dyn HttpTransport, url: &str) -> OgweaveResult<Vec<u8>> {
    let mut current = url.to_string();

    for _hop in 0..=MAX_REDIRECT_HOPS {
        let resp = transport.get(&current)?;
        match resp.status {
            200 => return Ok(resp.body),
            301 | 302 => {
                let location = resp.location.ok_or_else(|| {
                    OgweaveError::network(format!(
                        "redirect from '{current}' carried no Location header"
                    ))
                })?;
                let next = resolve_location(&current, &location)?;
                tracing::debug!(from = %current, to = %next, status = resp.status, "following redirect");
                current = next;
            }
            status => {
                return Err(OgweaveError::Download {
                    status,
                    url: current,
                });
            }
        }
    }

    Err(OgweaveError::TooManyRedirects {
        url: url.to_string(),
        limit: MAX_REDIRECT_HOPS,
    })
}

fn resolve_location(current: &str, location: &str) -> OgweaveResult<String> {
    let base = reqwest::Url::parse(current)
        .map_err(|e| OgweaveError::network(format!("invalid url '{current}': {e}")))?;
    let next = base
        .join(location)
        .map_err(|e| OgweaveError::network(format!("invalid Location '{location}': {e}")))?;
    Ok(next.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/http.rs"]
mod tests;
