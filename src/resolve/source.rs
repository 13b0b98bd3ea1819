use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::config::Endpoints;

/// A page that may name an image for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Amazon product page of an ASIN.
    AmazonProduct(String),
    /// Amazon search for free text.
    AmazonSearch(String),
    /// Google Images search, restricted to white backgrounds.
    GoogleImages(String),
}

impl Source {
    /// URL of the page to fetch.
    pub fn page_url(&self, endpoints: &Endpoints) -> Result<Url, url::ParseError> {
        match self {
            Source::AmazonProduct(asin) => {
                Url::parse(&format!("{}/dp/{}", endpoints.amazon.trim_end_matches('/'), asin))
            }
            Source::AmazonSearch(terms) => Url::parse_with_params(
                &format!("{}/s", endpoints.amazon.trim_end_matches('/')),
                &[("k", terms)],
            ),
            Source::GoogleImages(query) => Url::parse_with_params(
                &format!("{}/search", endpoints.google.trim_end_matches('/')),
                &[("q", query.as_str()), ("tbm", "isch"), ("tbs", "ic:white")],
            ),
        }
    }

    /// Rewrites a hit into the URL worth downloading. Search result
    /// thumbnails are swapped for their 500px rendition.
    pub fn finish(&self, image_url: String) -> String {
        match self {
            Source::AmazonSearch(_) => upscale(&image_url),
            _ => image_url,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::AmazonProduct(asin) => write!(f, "Amazon {asin}"),
            Source::AmazonSearch(terms) => write!(f, "Amazon search '{terms}'"),
            Source::GoogleImages(query) => write!(f, "Google Images '{query}'"),
        }
    }
}

static AC_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\._AC_S[XL]\d+_").unwrap());

/// Replaces Amazon's `._AC_SX<n>_`/`._AC_SL<n>_` size suffix with `._AC_SL500_`.
///
/// ```
/// use storefront_images::resolve::upscale;
///
/// assert_eq!(
///     upscale("https://m.media-amazon.com/images/I/517W3._AC_SX300_.jpg"),
///     "https://m.media-amazon.com/images/I/517W3._AC_SL500_.jpg"
/// );
/// ```
pub fn upscale(image_url: &str) -> String {
    AC_SIZE.replace_all(image_url, "._AC_SL500_").into_owned()
}
