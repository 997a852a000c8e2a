use std::path::PathBuf;

pub const MEBIBYTE: u64 = 1024 * 1024;

/// Largest file the upload endpoint accepts (inclusive).
pub const MAX_ALLOWED_SIZE: u64 = 100 * MEBIBYTE;

/// A file offered through a drop or the picker, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

/// The single file accepted for upload. Consumed by the upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl From<FileCandidate> for UploadRequest {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            path: candidate.path,
            name: candidate.name,
            size: candidate.size,
            media_type: candidate.media_type,
        }
    }
}

/// Resource locator returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub locator: String,
}

impl UploadResult {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
        }
    }

    /// Identifier of the stored file: everything after the final `/`.
    pub fn file_id(&self) -> &str {
        self.locator
            .rsplit_once('/')
            .map(|(_, id)| id)
            .unwrap_or(&self.locator)
    }
}

/// Simulated upload progress.
///
/// The transport does not report bytes sent, so the percentage is advanced by a
/// timer and only reaches 100 once the server has answered successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    percent: u8,
}

impl ProgressState {
    pub const STEP: u8 = 10;
    pub const SIMULATED_CAP: u8 = 90;

    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. Returns false once the simulated cap is reached.
    pub fn tick(&mut self) -> bool {
        if self.percent >= Self::SIMULATED_CAP {
            return false;
        }
        self.percent = (self.percent + Self::STEP).min(Self::SIMULATED_CAP);
        true
    }

    pub fn complete(&mut self) {
        self.percent = 100;
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Horizontal scale of the progress bar, 0.0 to 1.0.
    pub fn scale(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Drop,
    Picker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharePhase {
    #[default]
    Idle,
    Uploading,
    /// Upload finished, locator and email form visible.
    Sharing,
    SendingEmail,
}

impl SharePhase {
    /// True while a network request owned by the widget is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, SharePhase::Uploading | SharePhase::SendingEmail)
    }

    pub fn is_sharing(self) -> bool {
        matches!(self, SharePhase::Sharing | SharePhase::SendingEmail)
    }
}
