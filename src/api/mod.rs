pub mod rest;

pub use rest::RestApi;

#[cfg(test)]
use mockall::automock;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::Task;

/// The four operations of the remote task collection. No business logic
/// lives behind this trait; it is a pure transport adapter.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait TaskApi {
    /// Fetch the whole collection, in server order.
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    /// Persist a draft (`id = 0`); returns the task with its server id.
    async fn create_task(&self, task: Task) -> Result<Task>;
    async fn delete_task(&self, id: u64) -> Result<()>;
    /// Full replacement, not a partial patch.
    async fn replace_task(&self, id: u64, task: Task) -> Result<Task>;
}

pub type ArcTaskApi = Arc<dyn TaskApi + Send + Sync>;

pub fn new_api(config: &ApiConfig) -> Result<ArcTaskApi> {
    if config.endpoint.trim().is_empty() {
        eyre::bail!("No API endpoint configured");
    }
    if config.collection.trim().is_empty() {
        eyre::bail!("No API collection configured");
    }
    Ok(Arc::new(RestApi::from(config)))
}

/// Non-2xx response from the collection endpoint.
#[derive(Error, Debug)]
pub struct ApiError {
    pub http_code: u16,
    pub message: String,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "api error ({}): {}", self.http_code, self.message)
    }
}
