use tracing::{error, info, warn};

use super::input::{accept_input, validate_address};
use super::toast::Toast;
use crate::api::EmailRequest;
use crate::domain::{
    EmailError, FileCandidate, InputSource, ProgressState, SharePhase, UploadError,
    UploadRequest, UploadResult, ValidationError, MAX_ALLOWED_SIZE,
};

/// State of the share widget: idle, uploading, sharing, sending an email.
///
/// All transitions are synchronous. The app turns the values returned here
/// into network tasks and feeds their outcomes back through `finish_*`.
#[derive(Debug)]
pub struct ShareSession {
    phase: SharePhase,
    max_size: u64,
    selected: Option<UploadRequest>,
    progress: ProgressState,
    result: Option<UploadResult>,
    status: String,
    toast: Toast,
}

impl Default for ShareSession {
    fn default() -> Self {
        Self::new(MAX_ALLOWED_SIZE)
    }
}

impl ShareSession {
    pub fn new(max_size: u64) -> Self {
        Self {
            phase: SharePhase::Idle,
            max_size,
            selected: None,
            progress: ProgressState::new(),
            result: None,
            status: String::new(),
            toast: Toast::default(),
        }
    }

    /// Validate a drop or picker selection and, if one file passes, start
    /// uploading it.
    pub fn accept(
        &mut self,
        source: InputSource,
        candidates: Vec<FileCandidate>,
    ) -> Option<UploadRequest> {
        if candidates.is_empty() {
            return None;
        }

        if self.phase.is_busy() {
            warn!(phase = ?self.phase, "Input ignored while a request is in flight");
            self.reject(source, ValidationError::Busy);
            return None;
        }

        match accept_input(candidates, self.max_size) {
            Ok(Some(request)) => {
                self.selected = Some(request);
                self.start_upload()
            }
            Ok(None) => None,
            Err(e) => {
                self.reject(source, e);
                None
            }
        }
    }

    /// Check a raw selection before any of its files are read.
    /// Returns true if the paths should be inspected.
    pub fn precheck(&mut self, source: InputSource, count: usize) -> bool {
        if count == 0 {
            return false;
        }

        if self.phase.is_busy() {
            warn!(phase = ?self.phase, "Input ignored while a request is in flight");
            self.reject(source, ValidationError::Busy);
            return false;
        }

        if count > 1 {
            self.reject(source, ValidationError::MultipleFiles);
            return false;
        }

        true
    }

    fn reject(&mut self, source: InputSource, reason: ValidationError) {
        warn!(?source, error = %reason, "Input rejected");
        self.toast.show(reason.to_string());
        if source == InputSource::Picker {
            self.selected = None;
        }
    }

    /// Input could not be read at all (missing file, permissions, ...).
    pub fn input_failed(&mut self, err: UploadError) {
        error!(error = %err, "Failed to inspect input");
        self.toast.show(format!("Error in upload: {}", err));
        self.selected = None;
    }

    /// Take the selected file and enter the uploading state.
    pub fn start_upload(&mut self) -> Option<UploadRequest> {
        let Some(request) = self.selected.take() else {
            self.toast.show(UploadError::NoFile.to_string());
            return None;
        };

        self.result = None;
        self.progress = ProgressState::new();
        self.status = "Uploading...".to_string();
        self.phase = SharePhase::Uploading;

        Some(request)
    }

    pub fn tick(&mut self) {
        if self.phase == SharePhase::Uploading {
            self.progress.tick();
        }
    }

    pub fn finish_upload(&mut self, outcome: Result<UploadResult, UploadError>) {
        if self.phase != SharePhase::Uploading {
            warn!(phase = ?self.phase, "Upload result arrived outside of an upload");
            return;
        }

        self.selected = None;
        match outcome {
            Ok(result) => {
                info!(locator = %result.locator, "Upload successful");
                self.progress.complete();
                self.status = "Uploaded".to_string();
                self.result = Some(result);
                self.phase = SharePhase::Sharing;
            }
            Err(e) => {
                error!(error = %e, "Upload error");
                self.toast.show(format!("Error in upload: {}", e));
                self.phase = SharePhase::Idle;
            }
        }
    }

    /// Returns the locator to place on the clipboard.
    pub fn copy_locator(&mut self) -> Option<String> {
        let locator = self.result.as_ref()?.locator.clone();
        self.toast.show("Copied to clipboard");
        Some(locator)
    }

    /// Build the email request and lock the form until it resolves.
    pub fn begin_email(&mut self, email_to: &str, email_from: &str) -> Option<EmailRequest> {
        if self.phase == SharePhase::SendingEmail {
            return None;
        }

        match self.build_email(email_to, email_from) {
            Ok(request) => {
                self.phase = SharePhase::SendingEmail;
                Some(request)
            }
            Err(e) => {
                warn!(error = %e, "Email form rejected");
                self.toast.show(format!("Error sending email: {}", e));
                None
            }
        }
    }

    fn build_email(&self, email_to: &str, email_from: &str) -> Result<EmailRequest, EmailError> {
        let result = match (self.phase, self.result.as_ref()) {
            (SharePhase::Sharing, Some(result)) => result,
            _ => return Err(EmailError::NoLocator),
        };

        Ok(EmailRequest {
            uuid: result.file_id().to_string(),
            email_to: validate_address(email_to)?,
            email_from: validate_address(email_from)?,
        })
    }

    pub fn finish_email(&mut self, outcome: Result<(), EmailError>) {
        if self.phase != SharePhase::SendingEmail {
            warn!(phase = ?self.phase, "Email result arrived outside of a send");
            return;
        }

        match outcome {
            Ok(()) => {
                info!("Email sent");
                self.toast.show("Email Sent");
                self.result = None;
                self.phase = SharePhase::Idle;
            }
            Err(e) => {
                error!(error = %e, "Email send error");
                self.toast.show(format!("Error sending email: {}", e));
                self.phase = SharePhase::Sharing;
            }
        }
    }

    pub fn expire_toast(&mut self, generation: u64) {
        self.toast.expire(generation);
    }

    pub fn phase(&self) -> SharePhase {
        self.phase
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn locator(&self) -> Option<&str> {
        self.result.as_ref().map(|result| result.locator.as_str())
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn can_browse(&self) -> bool {
        !self.phase.is_busy()
    }

    pub fn can_send(&self) -> bool {
        self.phase == SharePhase::Sharing
    }

    pub fn send_label(&self) -> &'static str {
        if self.phase == SharePhase::SendingEmail {
            "Sending"
        } else {
            "Send"
        }
    }

    pub fn progress_visible(&self) -> bool {
        self.phase == SharePhase::Uploading
    }

    pub fn sharing_visible(&self) -> bool {
        self.phase.is_sharing()
    }
}
