use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use crate::fetch::HttpClient;

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header,
/// the pattern used by most commercial marine-data providers.
pub struct ApiKey<C> {
    inner: C,
    header: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Builds a wrapper setting `header_name: key` on every request.
    /// Fails up front if either part is not a valid header.
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header = header_name
            .parse::<HeaderName>()
            .with_context(|| format!("invalid auth header name `{header_name}`"))?;
        let value = key
            .parse::<HeaderValue>()
            .context("API key is not a valid header value")?;
        Ok(Self {
            inner,
            header,
            value,
        })
    }

    /// `Authorization: Bearer <key>`, the common OAuth-style form.
    pub fn bearer(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, "Authorization", &format!("Bearer {key}"))
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}
