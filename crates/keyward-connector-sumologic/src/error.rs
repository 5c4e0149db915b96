//! Error types for the Sumo Logic connector.

use keyward_connector::annotations::Annotations;
use keyward_connector::error::{ConnectorError, SyncError};
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using `SumoLogicError`.
pub type SumoLogicResult<T> = Result<T, SumoLogicError>;

/// Errors that can occur when talking to the Sumo Logic API.
#[derive(Debug, Error)]
pub enum SumoLogicError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A path placeholder had no matching parameter.
    #[error("Unresolved placeholder '{{{placeholder}}}' in path template '{template}'")]
    PathTemplate {
        template: String,
        placeholder: String,
    },

    /// A path parameter value that cannot stand as a single path segment.
    #[error("Invalid value '{value}' for path parameter '{name}'")]
    PathParameter { name: String, value: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sumo Logic API error.
    #[error(
        "API error (HTTP {status}): code: {code}, message: {message}, target: {}",
        .target.as_deref().unwrap_or("none")
    )]
    Api {
        status: u16,
        code: String,
        message: String,
        target: Option<String>,
    },

    /// The request was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// An error raised while performing a named operation.
    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<SumoLogicError>,
    },
}

impl SumoLogicError {
    /// Wraps the error with the name of the operation that produced it.
    #[must_use]
    pub fn context(self, operation: &'static str) -> Self {
        SumoLogicError::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, with operation context stripped.
    #[must_use]
    pub fn root(&self) -> &SumoLogicError {
        match self {
            SumoLogicError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of an upstream error.
    #[must_use]
    pub fn api_status(&self) -> Option<u16> {
        match self.root() {
            SumoLogicError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API reported the object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Returns true if the request was cancelled by the caller.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), SumoLogicError::Cancelled)
    }

    /// Returns true if the request could not be built; nothing was sent.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self.root(),
            SumoLogicError::Config(_)
                | SumoLogicError::Url(_)
                | SumoLogicError::PathTemplate { .. }
                | SumoLogicError::PathParameter { .. }
        )
    }
}

/// Converts a client error into a host-facing error, prefixed with `context`.
pub(crate) fn connector_error(context: impl Into<String>, err: SumoLogicError) -> ConnectorError {
    if err.is_cancelled() {
        return ConnectorError::Cancelled;
    }
    ConnectorError::operation_failed_with_source(context, err)
}

/// Like [`connector_error`], keeping the annotations gathered so far.
pub(crate) fn sync_error(
    context: impl Into<String>,
    err: SumoLogicError,
    annotations: &Annotations,
) -> SyncError {
    SyncError::new(connector_error(context, err), annotations.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> SumoLogicError {
        SumoLogicError::Api {
            status: 404,
            code: "user:not_found".to_string(),
            message: "User not found".to_string(),
            target: None,
        }
    }

    #[test]
    fn test_api_error_display_without_target() {
        assert_eq!(
            not_found().to_string(),
            "API error (HTTP 404): code: user:not_found, message: User not found, target: none"
        );
    }

    #[test]
    fn test_api_error_display_with_target() {
        let err = SumoLogicError::Api {
            status: 400,
            code: "user:invalid_email".to_string(),
            message: "Invalid email".to_string(),
            target: Some("email".to_string()),
        };
        assert!(err.to_string().ends_with("target: email"));
    }

    #[test]
    fn test_context_prefixes_operation() {
        let err = not_found().context("get user");
        assert!(err.to_string().starts_with("get user: API error (HTTP 404)"));
        assert!(err.is_not_found());
        assert_eq!(err.api_status(), Some(404));
    }

    #[test]
    fn test_path_template_display() {
        let err = SumoLogicError::PathTemplate {
            template: "/api/{api-version}/users/{user-id}".to_string(),
            placeholder: "user-id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved placeholder '{user-id}' in path template '/api/{api-version}/users/{user-id}'"
        );
        assert!(err.is_construction());
    }

    #[test]
    fn test_cancelled_maps_to_connector_cancelled() {
        let err = connector_error(
            "failed to list roles",
            SumoLogicError::Cancelled.context("list roles"),
        );
        assert!(matches!(err, ConnectorError::Cancelled));
    }

    #[test]
    fn test_upstream_error_maps_with_context() {
        let err = connector_error("failed to get role", not_found().context("get role"));
        assert_eq!(err.to_string(), "failed to get role");
        assert_eq!(err.error_code(), "OPERATION_FAILED");
    }
}
