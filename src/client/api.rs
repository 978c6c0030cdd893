//! 产品接口客户端

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::app::product::{Product, ProductInput};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation}: server responded {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

const FETCH: &str = "Failed to fetch products";
const CREATE: &str = "Failed to create product";
const UPDATE: &str = "Failed to update product";
const DELETE: &str = "Failed to delete product";

/// 前端依赖的四个接口操作
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ClientError>;

    async fn create(&self, input: &ProductInput) -> Result<Product, ClientError>;

    async fn update(&self, id: i64, input: &ProductInput) -> Result<Product, ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

/// 基于 reqwest 的实现
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

fn check_status(operation: &'static str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status { operation, status });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Result<Response>,
) -> Result<T, ClientError> {
    let response = response.map_err(|source| ClientError::Transport { operation, source })?;
    check_status(operation, response)?
        .json::<T>()
        .await
        .map_err(|source| ClientError::Decode { operation, source })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        read_json(FETCH, self.client.get(&self.base_url).send().await).await
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let response = self.client.post(&self.base_url).json(input).send().await;
        read_json(CREATE, response).await
    }

    async fn update(&self, id: i64, input: &ProductInput) -> Result<Product, ClientError> {
        let response = self.client.put(self.item_url(id)).json(input).send().await;
        read_json(UPDATE, response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation: DELETE,
                source,
            })?;
        check_status(DELETE, response)?;
        Ok(())
    }
}
