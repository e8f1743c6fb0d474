use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("No tab at index {0}")]
    InvalidIndex(usize),

    #[error("Range {offset}+{len} is outside the document (length {available})")]
    FormatBoundary {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("Unrecognized file format")]
    UnrecognizedFormat,

    #[error("RTF error: {0}")]
    Rtf(String),

    #[error("Invalid font size: {0:?}")]
    InvalidFontSize(String),

    #[error("Error report could not be written: {0}")]
    ErrorReport(std::io::Error),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::InvalidIndex(3);
        assert_eq!(err.to_string(), "No tab at index 3");

        let err = AppError::FormatBoundary {
            offset: 2,
            len: 10,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Range 2+10 is outside the document (length 5)"
        );

        let err = AppError::InvalidFontSize("12pt".to_string());
        assert_eq!(err.to_string(), "Invalid font size: \"12pt\"");
    }
}
