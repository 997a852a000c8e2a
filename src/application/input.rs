use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{EmailError, FileCandidate, UploadRequest, ValidationError};

static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Pick the single file to upload out of a drop or picker selection.
///
/// Zero candidates is not an error, there is simply nothing to do. Files of
/// exactly `max_size` bytes are accepted.
pub fn accept_input(
    mut candidates: Vec<FileCandidate>,
    max_size: u64,
) -> Result<Option<UploadRequest>, ValidationError> {
    match candidates.len() {
        0 => Ok(None),
        1 => {
            let candidate = candidates.remove(0);
            if candidate.size > max_size {
                return Err(ValidationError::TooLarge {
                    size: candidate.size,
                    max: max_size,
                });
            }
            Ok(Some(candidate.into()))
        }
        _ => Err(ValidationError::MultipleFiles),
    }
}

/// Trim an address from the email form and check it looks like one.
pub fn validate_address(address: &str) -> Result<String, EmailError> {
    let address = address.trim();
    if !EMAIL_ADDRESS.is_match(address) {
        return Err(EmailError::InvalidAddress(address.to_string()));
    }
    Ok(address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MEBIBYTE;
    use crate::domain::MAX_ALLOWED_SIZE;
    use std::path::PathBuf;

    fn candidate(name: &str, size: u64) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            media_type: "application/octet-stream".to_string(),
        }
    }

    #[test]
    fn test_no_files_is_noop() {
        assert_eq!(accept_input(Vec::new(), MAX_ALLOWED_SIZE), Ok(None));
    }

    #[test]
    fn test_single_file_accepted() {
        let accepted = accept_input(vec![candidate("a.bin", 5 * MEBIBYTE)], MAX_ALLOWED_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(accepted.name, "a.bin");
        assert_eq!(accepted.size, 5 * MEBIBYTE);
    }

    #[test]
    fn test_multiple_files_rejected() {
        let err = accept_input(
            vec![candidate("a.bin", 1), candidate("b.bin", 1)],
            MAX_ALLOWED_SIZE,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MultipleFiles);
        assert_eq!(err.to_string(), "You can't upload multiple files");
    }

    #[test]
    fn test_size_boundary_is_inclusive() {
        assert!(accept_input(vec![candidate("a.bin", MAX_ALLOWED_SIZE)], MAX_ALLOWED_SIZE).is_ok());

        let err = accept_input(
            vec![candidate("a.bin", MAX_ALLOWED_SIZE + 1)],
            MAX_ALLOWED_SIZE,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_oversized_file_message() {
        let err = accept_input(vec![candidate("big.iso", 150 * MEBIBYTE)], MAX_ALLOWED_SIZE)
            .unwrap_err();
        assert_eq!(err.to_string(), "Max file size is 100MB");
    }

    #[test]
    fn test_validate_address() {
        assert_eq!(validate_address("  a@x.com ").unwrap(), "a@x.com");
        assert!(validate_address("").is_err());
        assert!(validate_address("not-an-address").is_err());
        assert!(validate_address("a@b").is_err());
    }
}
