use thiserror::Error;

use ops_core::errors::{ApplicationError, DomainError, InterfaceError};
use ops_db::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid arguments for `{tool}`: {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl From<RepositoryError> for ToolError {
    fn from(value: RepositoryError) -> Self {
        Self::Application(ApplicationError::Persistence(value.to_string()))
    }
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments { tool: tool.to_string(), reason: reason.into() }
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        match self {
            Self::Domain(error) => ApplicationError::from(error).into_interface(correlation_id),
            Self::InvalidArguments { .. } | Self::UnknownTool(_) => {
                InterfaceError::BadRequest { message: self.to_string(), correlation_id }
            }
            Self::Application(error) => error.into_interface(correlation_id),
        }
    }
}
