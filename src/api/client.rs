use bytes::Bytes;
use reqwest::{multipart, Client};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::models::{ApiConfig, EmailRequest, EmailResponse, UploadResponse};
use crate::domain::UploadRequest;

/// Multipart field the upload endpoint reads the file from
const UPLOAD_FIELD: &str = "myfile";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP error! Status: {status}, Message: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Backend response does not contain a '{0}' property")]
    MissingField(&'static str),

    #[error("{0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    // No cookie store, so requests never carry credentials.
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Resolve a locator that may be relative against the configured base URL.
    fn resolve_locator(&self, locator: &str) -> String {
        if Url::parse(locator).is_ok() {
            return locator.to_string();
        }

        Url::parse(&self.config.base_url)
            .and_then(|base| base.join(locator))
            .map(String::from)
            .unwrap_or_else(|_| locator.to_string())
    }

    /// Upload a single file as multipart form data.
    /// Returns the locator of the stored file
    pub async fn upload_file(&self, request: &UploadRequest, payload: Bytes) -> Result<String> {
        let url = self.config.upload_url();
        info!(url = %url, "Uploading file");
        debug!(
            name = %request.name,
            size = request.size,
            media_type = %request.media_type,
            "File details"
        );

        let length = payload.len() as u64;
        let part = multipart::Part::stream_with_length(payload, length)
            .file_name(request.name.clone())
            .mime_str(&request.media_type)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;
        debug!(response = ?body, "Upload successful");

        let locator = body
            .file
            .filter(|file| !file.is_empty())
            .ok_or(ApiError::MissingField("file"))?;

        Ok(self.resolve_locator(&locator))
    }

    /// Ask the backend to email the locator of an uploaded file.
    /// The JSON body is read on every status so server errors can be reported
    pub async fn send_email(&self, request: &EmailRequest) -> Result<()> {
        let url = self.config.email_url();
        info!(url = %url, uuid = %request.uuid, "Sending email request");
        debug!(to = %request.email_to, from = %request.email_from, "Email form data");

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        let body: EmailResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        if !body.success {
            return Err(ApiError::Rejected(
                body.error
                    .unwrap_or_else(|| "Failed to send email".to_string()),
            ));
        }

        Ok(())
    }
}
