//! Scrape triggers and task polling.

use serde_json::json;

use crate::client::{decode, DashboardClient};
use crate::error::ClientError;
use crate::normalize::encode_segment;
use crate::types::Task;

impl DashboardClient {
    /// Starts a YouTube channel or video scrape. `POST /scrape/youtube`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a body
    /// that is not a task.
    pub async fn scrape_youtube(&self, url: &str) -> Result<Task, ClientError> {
        let endpoint = self.endpoint("scrape/youtube")?;
        let body = self.post_json(&endpoint, &json!({ "url": url })).await?;
        decode(body, "scrape/youtube")
    }

    /// Starts an Instagram account scrape. `POST /scrape/instagram`.
    ///
    /// A leading `@` is dropped from `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a body
    /// that is not a task.
    pub async fn scrape_instagram(&self, username: &str) -> Result<Task, ClientError> {
        let username = username.trim().trim_start_matches('@');
        let endpoint = self.endpoint("scrape/instagram")?;
        let body = self
            .post_json(&endpoint, &json!({ "username": username }))
            .await?;
        decode(body, "scrape/instagram")
    }

    /// Polls a scrape task. `GET /tasks/<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a body
    /// that is not a task.
    pub async fn task_status(&self, task_id: &str) -> Result<Task, ClientError> {
        let endpoint = self.endpoint(&format!("tasks/{}", encode_segment(task_id)))?;
        let body = self.get_json(&endpoint).await?;
        decode(body, &format!("tasks/{task_id}"))
    }
}
