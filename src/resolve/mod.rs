mod matcher;
pub mod patterns;
mod source;

pub use matcher::{extract_image_url, Matcher};
pub use source::{upscale, Source};

use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::Endpoints;
use crate::error::FetchError;

/// Finds direct image URLs on product and search pages.
///
/// A miss is `Ok(None)`; callers are expected to move on to the next
/// source either way.
pub struct Resolver {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
    amazon_product: Vec<Matcher>,
    amazon_search: Vec<Matcher>,
    google_images: Vec<Matcher>,
}

impl Resolver {
    pub fn new(client: Client, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            client,
            endpoints,
            timeout,
            amazon_product: patterns::amazon_product(),
            amazon_search: patterns::amazon_search(),
            google_images: patterns::google_images(),
        }
    }

    /// Matchers used for pages of `source`.
    pub fn matchers(&self, source: &Source) -> &[Matcher] {
        match source {
            Source::AmazonProduct(_) => &self.amazon_product,
            Source::AmazonSearch(_) => &self.amazon_search,
            Source::GoogleImages(_) => &self.google_images,
        }
    }

    /// Fetches `url` as text. Non-success statuses are errors.
    pub async fn fetch_page(&self, url: Url) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }

    /// Fetches the page of `source` and extracts the first image URL on it.
    ///
    /// ```rust,no_run
    /// use std::error::Error;
    /// use std::time::Duration;
    /// use storefront_images::{build_client, Config, Resolver, Source};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn Error>> {
    ///     let timeout = Duration::from_secs(15);
    ///     let resolver = Resolver::new(build_client(timeout)?, Config::default().endpoints, timeout);
    ///     let found = resolver.resolve(&Source::AmazonProduct("B003BVI1KK".into())).await?;
    ///     println!("{:?}", found);
    ///     Ok(())
    /// }
    /// ```
    pub async fn resolve(&self, source: &Source) -> Result<Option<String>, FetchError> {
        let url = source.page_url(&self.endpoints)?;
        debug!(%url, "fetching {source}");
        let body = self.fetch_page(url).await?;
        Ok(extract_image_url(&body, self.matchers(source)).map(|hit| source.finish(hit)))
    }
}
