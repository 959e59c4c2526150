//! Backend settings: data directories and the scraping API token.

use serde_json::json;

use crate::client::{decode, DashboardClient};
use crate::error::ClientError;
use crate::types::{BackendConfig, TokenUpdate};

impl DashboardClient {
    /// Reads the backend's non-sensitive settings. `GET /config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a body
    /// that is not a config object.
    pub async fn config(&self) -> Result<BackendConfig, ClientError> {
        let endpoint = self.endpoint("config")?;
        let body = self.get_json(&endpoint).await?;
        decode(body, "config")
    }

    /// Replaces the scraping API token. `POST /config/token`.
    ///
    /// The backend answers 400 for an empty token, which surfaces as
    /// [`ClientError::UnexpectedStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or an
    /// unrecognized body.
    pub async fn update_token(&self, token: &str) -> Result<TokenUpdate, ClientError> {
        let endpoint = self.endpoint("config/token")?;
        let body = self
            .post_json(&endpoint, &json!({ "token": token.trim() }))
            .await?;
        let update: TokenUpdate = decode(body, "config/token")?;
        tracing::info!(status = %update.status, "backend token updated");
        Ok(update)
    }
}
