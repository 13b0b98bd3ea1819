//! Client for the storefront backend's admin API.

mod token;

pub use crate::error::AdminError;
pub use token::{resolve_token, LoginResponse};

use reqwest::{Client, Response};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest response body excerpt put into logs.
const BODY_EXCERPT: usize = 200;

/// Set a product's thumbnail to `thumbnail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailUpdate {
    pub remote_id: String,
    pub thumbnail: String,
}

/// Outcome of `AdminClient::update_all`.
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Remote ids updated successfully, in request order.
    pub updated: Vec<String>,
    /// Remote ids whose update failed, with the reason.
    pub failed: Vec<(String, AdminError)>,
}

impl UpdateReport {
    pub fn attempted(&self) -> usize {
        self.updated.len() + self.failed.len()
    }
}

#[derive(Clone)]
pub struct AdminClient {
    base_url: String,
    http: Client,
}

impl AdminClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logs in with email and password and returns the bearer token.
    ///
    /// ```rust,no_run
    /// use std::error::Error;
    /// use std::time::Duration;
    /// use storefront_images::AdminClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn Error>> {
    ///     let admin = AdminClient::new("http://localhost:9000", Duration::from_secs(10))?;
    ///     let token = admin.login("admin@example.com", "secret").await?;
    ///     println!("{} characters of token", token.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AdminError> {
        let url = format!("{}/auth/user/emailpass", self.base_url);
        debug!(%url, email, "logging in");
        let response = self
            .http
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = success_body(response).await?;
        resolve_token(&body)?.ok_or(AdminError::MissingToken)
    }

    /// Points the thumbnail of product `remote_id` at `thumbnail`.
    pub async fn update_thumbnail(
        &self,
        token: &str,
        remote_id: &str,
        thumbnail: &str,
    ) -> Result<(), AdminError> {
        let url = format!("{}/admin/products/{}", self.base_url, remote_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "thumbnail": thumbnail }))
            .send()
            .await?;
        success_body(response).await?;
        Ok(())
    }

    /// Runs every update in order. A failed update is logged and recorded,
    /// the remaining ones are still attempted.
    pub async fn update_all(&self, token: &str, updates: &[ThumbnailUpdate]) -> UpdateReport {
        let mut report = UpdateReport::default();
        for update in updates {
            match self
                .update_thumbnail(token, &update.remote_id, &update.thumbnail)
                .await
            {
                Ok(()) => {
                    info!("OK: {} -> {}", update.thumbnail, update.remote_id);
                    report.updated.push(update.remote_id.clone());
                }
                Err(err) => {
                    warn!("failed to update {} ({}): {}", update.remote_id, update.thumbnail, err);
                    report.failed.push((update.remote_id.clone(), err));
                }
            }
        }
        report
    }
}

/// Body of a success response; any other status becomes
/// `AdminError::Status` carrying an excerpt of the body.
async fn success_body(response: Response) -> Result<String, AdminError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(AdminError::Status {
            status,
            body: excerpt(&body),
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_respects_char_boundaries() {
        let body = "ä".repeat(300);
        assert_eq!(excerpt(&body).chars().count(), BODY_EXCERPT);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = AdminClient::new("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
