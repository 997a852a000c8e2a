pub mod error;
pub mod model;

pub use error::{EmailError, UploadError, ValidationError};
pub use model::{
    FileCandidate, InputSource, ProgressState, SharePhase, UploadRequest, UploadResult,
    MAX_ALLOWED_SIZE,
};
