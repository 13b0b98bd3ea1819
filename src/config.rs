//! Runtime configuration.
//!
//! Built-in defaults reproduce the storefront setup. A TOML file can
//! override any part of it and a few environment variables override the
//! file, mostly so the admin password never has to live on disk.

use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{self, Product};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<slug>.jpg` files.
    pub output_dir: PathBuf,
    pub fetch: FetchConfig,
    pub endpoints: Endpoints,
    pub placeholder: PlaceholderConfig,
    pub admin: AdminConfig,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub page_timeout_secs: u64,
    pub image_timeout_secs: u64,
    /// Pause between consecutive scraping requests.
    pub request_delay_ms: u64,
    /// Downloads of this size or less are rejected.
    pub min_image_bytes: usize,
    /// Files above this size count as real images and are not scraped again.
    pub real_image_bytes: u64,
}

/// Base URLs of the scraped sites.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub amazon: String,
    pub google: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// TrueType font for the label; system fonts are searched when unset.
    pub font_path: Option<PathBuf>,
    pub watermark: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub base_url: String,
    pub email: String,
    pub password: Option<String>,
    pub timeout_secs: u64,
    /// Prefix of the thumbnail paths written to the backend.
    pub thumbnail_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/products"),
            fetch: FetchConfig::default(),
            endpoints: Endpoints::default(),
            placeholder: PlaceholderConfig::default(),
            admin: AdminConfig::default(),
            products: catalog::builtin(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 15,
            image_timeout_secs: 10,
            request_delay_ms: 500,
            min_image_bytes: 2000,
            real_image_bytes: 50_000,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            amazon: "https://www.amazon.de".into(),
            google: "https://www.google.com".into(),
        }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            watermark: "Suedpfote.de".into(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: "https://suedpfote-backend.onrender.com".into(),
            email: "admin@suedpfote.de".into(),
            password: None,
            timeout_secs: 30,
            thumbnail_prefix: "/products".into(),
        }
    }
}

impl FetchConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl AdminConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads the configuration from `path` (or the defaults) and applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("reading config {}", path.display()))?;
                Self::from_toml(&text)
                    .wrap_err_with(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overrides values from `lookup`, which is `std::env::var` outside tests.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("STOREFRONT_OUTPUT_DIR") {
            self.output_dir = dir.into();
        }
        if let Some(url) = lookup("STOREFRONT_ADMIN_URL") {
            self.admin.base_url = url;
        }
        if let Some(email) = lookup("STOREFRONT_ADMIN_EMAIL") {
            self.admin.email = email;
        }
        if let Some(password) = lookup("STOREFRONT_ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_builtin_catalog() {
        let config = Config::default();
        assert_eq!(config.products.len(), 12);
        assert_eq!(config.fetch.min_image_bytes, 2000);
        assert_eq!(config.fetch.real_image_bytes, 50_000);
        assert!(config.admin.password.is_none());
    }

    #[test]
    fn toml_overrides_only_what_it_names() {
        let config = Config::from_toml(
            r#"
            output_dir = "/tmp/images"

            [fetch]
            request_delay_ms = 0

            [[products]]
            slug = "lineal"
            label = "Lineal"
            asins = ["B001Q3L6MO"]
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/images"));
        assert_eq!(config.fetch.request_delay_ms, 0);
        assert_eq!(config.fetch.page_timeout_secs, 15);
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.products[0].asins, ["B001Q3L6MO"]);
        assert!(config.products[0].remote_id.is_none());
    }

    #[test]
    fn environment_wins_over_file() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "STOREFRONT_ADMIN_PASSWORD" => Some("secret".into()),
            "STOREFRONT_ADMIN_URL" => Some("http://localhost:9000".into()),
            _ => None,
        });
        assert_eq!(config.admin.password.as_deref(), Some("secret"));
        assert_eq!(config.admin.base_url, "http://localhost:9000");
        assert_eq!(config.admin.email, "admin@suedpfote.de");
    }
}
