//! Scrape, render and publish storefront product images.
//!
//! `Resolver` finds a direct image URL for a product on Amazon
//! or Google Images, `Downloader` stores it when it looks like a
//! real image, `placeholder` renders a fallback picture and
//! `AdminClient` points the backend's product thumbnails at the
//! prepared files.
//!
//! The `pass` module strings these together into the sequential
//! runs exposed by the `storefront-images` binary.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod pass;
pub mod placeholder;
pub mod resolve;

use header::{HeaderMap, HeaderValue};
use reqwest::{header, Client};
use std::time::Duration;

pub use admin::AdminClient;
pub use catalog::Product;
pub use config::Config;
pub use download::Downloader;
pub use resolve::{Resolver, Source};
pub use url::Url;

/// Builds the default headers for the scraping client.
fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("de-DE,de;q=0.9"),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers
}

/// Builds a client with browser-like headers that does not validate
/// certificates. `timeout` bounds every request made through it unless
/// the request overrides it.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .default_headers(build_headers())
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
        .build()
}
