//! Minimal HTTP client abstraction for the forecast providers.
//!
//! Everything is fetched through the [`HttpClient`] trait so auth wrappers
//! and test doubles compose around a plain [`BasicClient`].

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;

/// GETs `url` and decodes the JSON response body into `T`.
///
/// Non-2xx responses fail with the status and body text so provider errors
/// surface verbatim in logs.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("provider returned {status}: {body}");
    }

    resp.json::<T>().await.context("decoding provider JSON")
}
