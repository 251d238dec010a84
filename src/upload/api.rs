use super::types::{Source, UploadReceipt, WorkflowStatus, CSV_MIME};
use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// The two remote calls the controller depends on.
#[async_trait]
pub trait LoaderApi: Send + Sync {
    async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        source: Source,
    ) -> Result<UploadReceipt>;

    async fn workflow_status(&self) -> Result<WorkflowStatus>;
}

#[derive(Clone)]
pub struct HttpLoaderApi {
    client: reqwest::Client,
    upload_url: String,
    status_url: String,
}

impl HttpLoaderApi {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: config.upload_url(),
            status_url: config.status_url(),
        }
    }
}

#[async_trait]
impl LoaderApi for HttpLoaderApi {
    async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        source: Source,
    ) -> Result<UploadReceipt> {
        debug!(url = %self.upload_url, file = file_name, %source, "posting upload");

        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(CSV_MIME)?;
        let form = Form::new()
            .part("file", part)
            .text("source", source.as_str());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }

    async fn workflow_status(&self) -> Result<WorkflowStatus> {
        debug!(url = %self.status_url, "fetching workflow status");
        let response = self.client.get(&self.status_url).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail")?.as_str().map(str::to_string));
        warn!(status = status.as_u16(), ?detail, "loader service returned an error");
        return Err(LoaderError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| LoaderError::Decode(e.to_string()))
}
