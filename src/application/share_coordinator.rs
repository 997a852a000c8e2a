use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError, EmailRequest},
    domain::{EmailError, FileCandidate, UploadError, UploadRequest, UploadResult},
};

/// Bytes read from the head of a file to sniff its media type
const SNIFF_LEN: u64 = 8192;
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

impl From<ApiError> for UploadError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => UploadError::Transport(e.to_string()),
            ApiError::Status { status, message } => UploadError::ServerError {
                status,
                body: message,
            },
            other => UploadError::MalformedResponse(other.to_string()),
        }
    }
}

impl From<ApiError> for EmailError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => EmailError::Transport(e.to_string()),
            other => EmailError::Rejected(other.to_string()),
        }
    }
}

fn io_error(path: &Path, err: std::io::Error) -> UploadError {
    UploadError::Io(format!("{}: {}", path.display(), err))
}

/// Runs the side effects of the share flow: reading files, the picker dialog
/// and the two API calls.
#[derive(Clone)]
pub struct ShareCoordinator {
    api_client: ApiClient,
}

impl ShareCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    pub async fn choose_file(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Select a file to share")
            .pick_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Read size and media type of every dropped or picked path.
    pub async fn inspect(&self, paths: Vec<PathBuf>) -> Result<Vec<FileCandidate>, UploadError> {
        let mut candidates = Vec::with_capacity(paths.len());
        for path in paths {
            candidates.push(inspect_file(path).await?);
        }
        Ok(candidates)
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        let payload = tokio::fs::read(&request.path)
            .await
            .map_err(|e| io_error(&request.path, e))?;

        let locator = self
            .api_client
            .upload_file(&request, Bytes::from(payload))
            .await?;

        Ok(UploadResult::new(locator))
    }

    pub async fn send_email(&self, request: EmailRequest) -> Result<(), EmailError> {
        self.api_client.send_email(&request).await?;
        Ok(())
    }
}

async fn inspect_file(path: PathBuf) -> Result<FileCandidate, UploadError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| io_error(&path, e))?;
    if !metadata.is_file() {
        return Err(UploadError::Io(format!("{} is not a file", path.display())));
    }

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| io_error(&path, e))?;
    let mut head = Vec::new();
    file.take(SNIFF_LEN)
        .read_to_end(&mut head)
        .await
        .map_err(|e| io_error(&path, e))?;

    let media_type = infer::get(&head)
        .map(|kind| kind.mime_type())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
        .to_string();

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    debug!(name = %name, size = metadata.len(), media_type = %media_type, "Inspected input");

    Ok(FileCandidate {
        name,
        size: metadata.len(),
        media_type,
        path,
    })
}
