// file: src/remote/client.rs
// description: http client for the file ingestion backend
// reference: POST {base_url}/files/upload with a multipart `file` field

use crate::config::BackendConfig;
use crate::error::{PipelineError, Result};
use crate::models::UploadDescriptor;
use crate::utils::Validator;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info};

const UPLOAD_PATH: &str = "/files/upload";

pub struct BackendClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Validator::validate_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| PipelineError::Backend(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone().filter(|token| !token.is_empty()),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    fn build_form(filename: &str, bytes: Vec<u8>, target_column: Option<&str>) -> Result<Form> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| PipelineError::Backend(format!("Invalid upload content type: {}", e)))?;

        let mut form = Form::new().part("file", part);
        if let Some(column) = target_column.map(str::trim).filter(|c| !c.is_empty()) {
            form = form.text("target_column", column.to_string());
        }
        Ok(form)
    }

    /// Sends the raw file; the backend parses it and describes its columns.
    pub async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        target_column: Option<&str>,
    ) -> Result<UploadDescriptor> {
        let url = self.upload_url();
        debug!("Uploading {} ({} bytes) to {}", filename, bytes.len(), url);

        let form = Self::build_form(filename, bytes, target_column)?;
        let mut request = self.client.post(&url).multipart(form);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::Backend(format!("Failed to send upload request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Backend(format!(
                "Upload failed with status {}: {}",
                status, error_text
            )));
        }

        let descriptor: UploadDescriptor = response
            .json()
            .await
            .map_err(|e| PipelineError::Backend(format!("Failed to parse upload response: {}", e)))?;

        info!(
            "Backend accepted {} as {} ({} rows)",
            descriptor.filename, descriptor.file_id, descriptor.row_count
        );
        Ok(descriptor)
    }
}
