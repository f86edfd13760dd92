use async_trait::async_trait;

use crate::fetch::HttpClient;

/// An [`HttpClient`] wrapper that appends an API key as a URL query
/// parameter on every request.
pub struct UrlParam<C> {
    inner: C,
    param_name: String,
    key: String,
}

impl<C> UrlParam<C> {
    pub fn new(inner: C, param_name: &str, key: &str) -> Self {
        Self {
            inner,
            param_name: param_name.to_string(),
            key: key.to_string(),
        }
    }

    /// The `apikey` query parameter used by the Open-Meteo customer tier.
    pub fn apikey(inner: C, key: &str) -> Self {
        Self::new(inner, "apikey", key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}
