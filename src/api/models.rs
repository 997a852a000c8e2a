use serde::{Deserialize, Serialize};

/// Response from the upload endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file: Option<String>,
}

/// Body posted to the email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub uuid: String,
    pub email_to: String,
    pub email_from: String,
}

/// Response from the email endpoint, parsed for both success and failure statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/api/files", self.base_url)
    }

    pub fn email_url(&self) -> String {
        format!("{}/api/files/send", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("https://filesharing-backend-6uqo.onrender.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = ApiConfig::new("http://localhost:3000/");
        assert_eq!(config.upload_url(), "http://localhost:3000/api/files");
        assert_eq!(config.email_url(), "http://localhost:3000/api/files/send");
    }

    #[test]
    fn test_email_request_wire_names() {
        let request = EmailRequest {
            uuid: "xyz789".to_string(),
            email_to: "a@x.com".to_string(),
            email_from: "b@y.com".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"uuid": "xyz789", "emailTo": "a@x.com", "emailFrom": "b@y.com"})
        );
    }
}
