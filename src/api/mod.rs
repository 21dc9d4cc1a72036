//! REST client for the board server.
//!
//! `ApiClient` owns one connection pool plus the instance URL and token.
//! Board-scoped endpoints live in `boards.rs`, task-scoped ones in `tasks.rs`;
//! both go through the request helpers below so every call gets the same
//! authorization header and error mapping.

mod boards;
mod tasks;

use crate::error::{AppError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(instance_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("taskboard-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: instance_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Sends the request and turns non-success statuses into `AppError::Api`
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let res = builder.send().await?;
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            warn!(status, %message, "request rejected");
            Err(AppError::Api { status, message })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.send(self.request(Method::GET, path)).await?;
        Ok(res.json::<T>().await?)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let res = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(res.json::<T>().await?)
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let res = self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(res.json::<T>().await?)
    }

    /// PUT whose response body is ignored
    async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let res = self
            .send(self.request(Method::PATCH, path).json(body))
            .await?;
        Ok(res.json::<T>().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
