#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;

use std::time;

use async_trait::async_trait;
use eyre::{Context, Result};
use reqwest::Method;

use crate::api::{ApiError, TaskApi};
use crate::config::{ApiConfig, user_agent};
use crate::models::Task;

/// REST adapter for one task collection. The collection path is a plain
/// parameter, so one client type serves every app variant.
pub struct RestApi {
    endpoint: String,
    collection: String,
    timeout: Option<time::Duration>,
}

#[async_trait]
impl TaskApi for RestApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let res = self
            .request(Method::GET, &self.collection)
            .send()
            .await
            .wrap_err("listing tasks")?;
        let res = check_status(res).await?;

        let body = res.text().await.wrap_err("reading task list response")?;
        let tasks = serde_json::from_str::<Vec<Task>>(&body)
            .wrap_err(format!("parsing task list response: {}", body))?;
        Ok(tasks)
    }

    async fn create_task(&self, task: Task) -> Result<Task> {
        let res = self
            .request(Method::POST, &self.collection)
            .header("Content-Type", "application/json")
            .json(&task)
            .send()
            .await
            .wrap_err("creating task")?;
        let res = check_status(res).await?;

        res.json::<Task>()
            .await
            .wrap_err("parsing created task response")
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        let res = self
            .request(Method::DELETE, &format!("{}/{}", self.collection, id))
            .send()
            .await
            .wrap_err(format!("deleting task {}", id))?;
        check_status(res).await?;
        Ok(())
    }

    async fn replace_task(&self, id: u64, task: Task) -> Result<Task> {
        let res = self
            .request(Method::PUT, &format!("{}/{}", self.collection, id))
            .header("Content-Type", "application/json")
            .json(&task)
            .send()
            .await
            .wrap_err(format!("replacing task {}", id))?;
        let res = check_status(res).await?;

        res.json::<Task>()
            .await
            .wrap_err("parsing replaced task response")
    }
}

impl From<&ApiConfig> for RestApi {
    fn from(value: &ApiConfig) -> Self {
        let mut api = RestApi::default()
            .with_endpoint(&value.endpoint)
            .with_collection(&value.collection);

        if let Some(secs) = value.timeout_secs {
            api = api.with_timeout(time::Duration::from_secs(secs));
        }
        api
    }
}

impl RestApi {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = reqwest::Client::new()
            .request(method, format!("{}/{}", self.endpoint, path))
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        req
    }
}

impl Default for RestApi {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
            collection: "tasks".to_string(),
            timeout: None,
        }
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }
    let http_code = res.status().as_u16();
    let message = res.text().await.unwrap_or_default();
    Err(ApiError { http_code, message }.into())
}
