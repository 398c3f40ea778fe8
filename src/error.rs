//! Request error taxonomy shared by the CLI and the HTTP server.

pub type Result<T, E = TriageError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// A required field is missing or malformed. Client-facing.
    #[error("{0}")]
    Validation(String),
    /// Unexpected failure while scoring. Details are logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TriageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<anyhow::Error> for TriageError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("invalid request body: {}", err))
    }
}
