//! Error types for reading and writing graph documents

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read or write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    /// Line and column of a JSON syntax error, if that is what this is
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            DocumentError::Json(e) if e.line() > 0 => Some((e.line(), e.column())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_location() {
        let err: DocumentError = serde_json::from_str::<serde_json::Value>("{\n  oops")
            .unwrap_err()
            .into();
        assert_eq!(err.location().map(|(line, _)| line), Some(2));
        assert!(err.to_string().contains("invalid graph document"));
    }

    #[test]
    fn test_io_error_has_no_location() {
        let err = DocumentError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.location(), None);
    }
}
