//! This module provides a client to connect to the remote task service
//!
//! The client is a stateless wrapper around the HTTP API: it holds the base URL and
//! the bearer token, and nothing else. It never caches tasks, since the consistency
//! model of this crate is to re-fetch the whole collection after every mutation.

use std::error::Error;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::task::{NewTask, Task, TaskId, TaskStatus};
use crate::traits::TaskSource;

/// The body of a status-only PATCH
#[derive(Serialize)]
struct StatusUpdate {
    status: TaskStatus,
}

/// A task source that fetches its data from the remote HTTP service
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S, token: Option<String>) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    /// Create a client against the configured default server
    /// (see [`config::API_BASE_URL`](crate::config::API_BASE_URL))
    pub fn with_default_url(token: Option<String>) -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::api_base_url(), token)
    }

    /// Replace the bearer token (e.g. after a login or logout)
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn bearer_token(&self) -> Result<&str, Box<dyn Error>> {
        match &self.token {
            Some(token) => Ok(token.as_str()),
            None => Err("No access token, refusing to send a request".into()),
        }
    }
}

#[async_trait]
impl TaskSource for Client {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let token = self.bearer_token()?;

        let response = self.http
            .get(self.endpoint("todos/"))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let tasks = response.json::<Vec<Task>>().await?;
        log::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), Box<dyn Error>> {
        let token = self.bearer_token()?;

        let response = self.http
            .post(self.endpoint("todos/"))
            .bearer_auth(token)
            .json(new_task)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }

    async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>> {
        let token = self.bearer_token()?;

        let response = self.http
            .patch(self.endpoint(&format!("todos/{}/status/", id)))
            .bearer_auth(token)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Box<dyn Error>> {
        let token = self.bearer_token()?;

        let response = self.http
            .delete(self.endpoint(&format!("todos/{}/delete/", id)))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_the_api_layout() {
        let client = Client::new("https://tasks.example.com/api/", Some("tok".to_string())).unwrap();
        assert_eq!(client.endpoint("todos/"), "https://tasks.example.com/api/todos/");
        assert_eq!(client.endpoint(&format!("todos/{}/status/", 7)), "https://tasks.example.com/api/todos/7/status/");
        assert_eq!(client.endpoint(&format!("todos/{}/delete/", 7)), "https://tasks.example.com/api/todos/7/delete/");
    }

    #[test]
    fn missing_token_short_circuits() {
        let client = Client::new("https://tasks.example.com/api", None).unwrap();
        assert_eq!(client.is_authenticated(), false);
        assert!(client.bearer_token().is_err());
    }
}
