//! The sequential runs behind the command line.
//!
//! Every pass handles one product after the other and one request after the
//! other. Misses are logged and skipped; only local filesystem trouble,
//! configuration mistakes and a failed admin login end a run early.

use eyre::{bail, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::admin::{AdminClient, ThumbnailUpdate, UpdateReport};
use crate::catalog::Product;
use crate::config::Config;
use crate::download::{existing_size, has_real_image, Downloader};
use crate::placeholder::Placeholder;
use crate::resolve::{Resolver, Source};

/// Writes a placeholder for each of `products`. Returns how many were written.
pub fn placeholders(config: &Config, products: &[&Product]) -> Result<usize> {
    let renderer = Placeholder::with_discovered_font(
        config.placeholder.font_path.as_deref(),
        config.placeholder.watermark.as_str(),
    );
    for product in products {
        let path = product.image_path(&config.output_dir);
        renderer
            .write(&product.label, &path)
            .wrap_err_with(|| format!("writing placeholder {}", path.display()))?;
        info!("OK: {}", product.file_name());
    }
    Ok(products.len())
}

/// What happened to one product during a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A real image was already on disk.
    AlreadyPresent { bytes: u64 },
    Downloaded { source: Source, url: String, bytes: u64 },
    /// No source produced a usable image; the file on disk is untouched.
    Unresolved,
}

/// Finds and downloads product images.
///
/// Consecutive requests made through one scraper, across products, are
/// at least the configured delay apart.
pub struct Scraper {
    resolver: Resolver,
    downloader: Downloader,
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
    real_image_bytes: u64,
    output_dir: PathBuf,
}

impl Scraper {
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetch = &config.fetch;
        let client = crate::build_client(fetch.page_timeout())?;
        Ok(Self {
            resolver: Resolver::new(client.clone(), config.endpoints.clone(), fetch.page_timeout()),
            downloader: Downloader::new(client, fetch.image_timeout(), fetch.min_image_bytes),
            delay: fetch.request_delay(),
            last_request: Mutex::new(None),
            real_image_bytes: fetch.real_image_bytes,
            output_dir: config.output_dir.clone(),
        })
    }

    /// Pages worth trying for `product`: its ASINs, then an Amazon search,
    /// then Google Images.
    pub fn sources(product: &Product) -> Vec<Source> {
        let mut sources: Vec<_> = product
            .asins
            .iter()
            .map(|asin| Source::AmazonProduct(asin.clone()))
            .collect();
        sources.extend(product.search.clone().map(Source::AmazonSearch));
        sources.extend(product.query.clone().map(Source::GoogleImages));
        sources
    }

    /// Tries the sources of `product` until one yields an image that is
    /// stored. With `force` unset, products that already have a real image
    /// are skipped.
    pub async fn scrape(&self, product: &Product, force: bool) -> Result<Outcome> {
        let path = product.image_path(&self.output_dir);
        if !force && has_real_image(&path, self.real_image_bytes) {
            let bytes = existing_size(&path).unwrap_or_default();
            info!("{}: already have real image", product.slug);
            return Ok(Outcome::AlreadyPresent { bytes });
        }

        for source in Self::sources(product) {
            info!("{}: trying {}", product.slug, source);
            self.pace().await;
            let url = match self.resolver.resolve(&source).await {
                Ok(Some(url)) => url,
                Ok(None) => {
                    info!("{}: no image on {}", product.slug, source);
                    continue;
                }
                Err(err) => {
                    warn!("{}: fetching {} failed: {}", product.slug, source, err);
                    continue;
                }
            };

            info!("{}: found {}", product.slug, url);
            self.pace().await;
            match self.downloader.save(&url, &path).await {
                Ok(bytes) => {
                    info!("{}: OK ({} bytes)", product.slug, bytes);
                    return Ok(Outcome::Downloaded { source, url, bytes });
                }
                Err(err) if err.is_fatal() => {
                    return Err(err).wrap_err_with(|| format!("saving {}", path.display()));
                }
                Err(err) => warn!("{}: download failed: {}", product.slug, err),
            }
        }

        warn!("{}: no image found, keeping placeholder", product.slug);
        Ok(Outcome::Unresolved)
    }

    /// Downloads the hand-picked `known_image` of `product`, if it has one.
    /// With `force` unset, a real image already on disk is kept.
    pub async fn fetch_known(&self, product: &Product, force: bool) -> Result<Option<u64>> {
        let Some(url) = &product.known_image else {
            return Ok(None);
        };
        let path = product.image_path(&self.output_dir);
        if !force && has_real_image(&path, self.real_image_bytes) {
            info!("{}: already have real image", product.slug);
            return Ok(None);
        }

        self.pace().await;
        match self.downloader.save(url, &path).await {
            Ok(bytes) => {
                info!("OK: {} ({} bytes)", product.file_name(), bytes);
                Ok(Some(bytes))
            }
            Err(err) if err.is_fatal() => {
                Err(err).wrap_err_with(|| format!("saving {}", path.display()))
            }
            Err(err) => {
                warn!("FAIL: {}: {}", product.file_name(), err);
                Ok(None)
            }
        }
    }

    /// Waits until the delay since the previous request has passed.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let wait = self.delay.saturating_sub(at.elapsed());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Runs the scraper over `products` and returns each outcome.
pub async fn scrape(config: &Config, products: &[&Product], force: bool) -> Result<Vec<Outcome>> {
    let scraper = Scraper::from_config(config)?;
    let mut outcomes = Vec::with_capacity(products.len());
    for product in products {
        outcomes.push(scraper.scrape(product, force).await?);
    }
    Ok(outcomes)
}

/// Downloads all known image URLs. Returns how many were stored.
pub async fn known(config: &Config, products: &[&Product], force: bool) -> Result<usize> {
    let scraper = Scraper::from_config(config)?;
    let mut stored = 0;
    for product in products {
        if scraper.fetch_known(product, force).await?.is_some() {
            stored += 1;
        }
    }
    Ok(stored)
}

/// Thumbnail updates for every product the backend knows about.
pub fn planned_updates(config: &Config) -> Vec<ThumbnailUpdate> {
    config
        .products
        .iter()
        .filter_map(|product| {
            Some(ThumbnailUpdate {
                remote_id: product.remote_id.clone()?,
                thumbnail: product.thumbnail_path(&config.admin.thumbnail_prefix),
            })
        })
        .collect()
}

/// Logs in once and points every product's thumbnail at its image file.
pub async fn update(config: &Config) -> Result<UpdateReport> {
    let admin = &config.admin;
    let Some(password) = admin.password.as_deref() else {
        bail!("no admin password, set STOREFRONT_ADMIN_PASSWORD or admin.password");
    };

    let client = AdminClient::new(&admin.base_url, admin.timeout())?;
    let token = client
        .login(&admin.email, password)
        .await
        .wrap_err_with(|| format!("logging in to {}", client.base_url()))?;
    info!("logged in as {}", admin.email);

    let report = client.update_all(&token, &planned_updates(config)).await;
    info!(
        "{} of {} thumbnails updated",
        report.updated.len(),
        report.attempted()
    );
    Ok(report)
}

/// Files in `dir` with their sizes, sorted by name.
pub fn report(dir: &Path) -> Result<Vec<(String, u64)>> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).wrap_err_with(|| format!("listing {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), meta.len()));
        }
    }
    files.sort();
    Ok(files)
}
