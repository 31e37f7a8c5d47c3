use crate::endpoints::GenerateImage;
use api::endpoints::Endpoint;
use async_trait::async_trait;
use derive_more::Display;
use reqwest::{header::ACCEPT, Client, StatusCode, Url};
use std::time::Duration;

/// One GET for a generated image
#[async_trait]
pub trait FetchImage: Send + Sync {
    async fn fetch_image(&self, url: Url, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Display)]
pub enum FetchError {
    #[display(fmt = "image service responded with {}", _0)]
    Status(StatusCode),
    #[display(fmt = "{}", _0)]
    Request(eyre::Report),
}

impl std::error::Error for FetchError {}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status(status) => Some(*status),
            FetchError::Request(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status),
            None => FetchError::Request(err.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl FetchImage for HttpImageFetcher {
    async fn fetch_image(&self, url: Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .request(GenerateImage::METHOD, url)
            .header(ACCEPT, "image/*")
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
