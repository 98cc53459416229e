use thiserror::Error;

/// Failure taxonomy shared by the provider client, the stores and the scan pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Invalid address: {0}")] InvalidAddress(String),

    #[error("Invalid payload: {0}")] InvalidPayload(String),

    #[error("Not found: {0}")] NotFound(String),

    #[error("Upstream error: {0}")] Upstream(String),

    #[error("Persist error: {0}")] Persist(String),
}

impl BoardError {
    /// True for failures raised by the market-data provider.
    /// These are the ones a multi-token scan swallows per token.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, BoardError::NotFound(_) | BoardError::Upstream(_))
    }

    /// True for failures caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, BoardError::InvalidAddress(_) | BoardError::InvalidPayload(_))
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        BoardError::Persist(err.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Persist(err.to_string())
    }
}

impl From<BoardError> for String {
    fn from(err: BoardError) -> String {
        err.to_string()
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failure_classification() {
        assert!(BoardError::NotFound("x".into()).is_provider_failure());
        assert!(BoardError::Upstream("x".into()).is_provider_failure());
        assert!(!BoardError::Persist("x".into()).is_provider_failure());
        assert!(!BoardError::InvalidAddress("x".into()).is_provider_failure());
    }

    #[test]
    fn test_io_error_maps_to_persist() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BoardError = io.into();
        assert!(matches!(err, BoardError::Persist(_)));
        assert!(err.to_string().contains("denied"));
    }
}
