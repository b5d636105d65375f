use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Structured error payload sent back by a remote procedure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Failure reported by a search or save collaborator.
///
/// Either part may be missing. [`RemoteError::user_message`] picks the one
/// shown to the user.
#[derive(Debug, Clone, Default, Error, PartialEq)]
pub struct RemoteError {
    pub body: Option<ErrorBody>,
    pub message: Option<String>,
}

impl RemoteError {
    /// Error with only a flat message, e.g. a transport failure.
    pub fn flat(message: impl Into<String>) -> Self {
        Self {
            body: None,
            message: Some(message.into()),
        }
    }

    /// Error carrying a structured body message.
    pub fn structured(body_message: impl Into<String>) -> Self {
        Self {
            body: Some(ErrorBody {
                message: Some(body_message.into()),
            }),
            message: None,
        }
    }

    /// Structured message, then flat message, then "Unknown error".
    /// Empty strings count as missing.
    pub fn user_message(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .filter(|m| !m.is_empty())
            .or_else(|| self.message.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or(UNKNOWN_ERROR)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// A request could not be built from the current filters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    #[error("{field} is not a valid number")]
    InvalidBound { field: &'static str, value: f64 },
}

/// The two failures a user can see.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperationError {
    #[error("Search failed: {0}")]
    SearchFailed(String),
    #[error("Save failed: {0}")]
    SaveFailed(String),
}

impl OperationError {
    pub fn title(&self) -> &'static str {
        match self {
            OperationError::SearchFailed(_) => "Search failed",
            OperationError::SaveFailed(_) => "Save failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OperationError::SearchFailed(msg) | OperationError::SaveFailed(msg) => msg,
        }
    }
}
