//! Connector Framework error types
//!
//! Host-facing errors returned by resource syncers and provisioners. Every
//! failure travels together with the annotations collected before it happened
//! (see [`SyncError`]), so rate-limit information survives error paths.

use thiserror::Error;

use crate::annotations::Annotations;

/// Error that can occur during connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connector configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A call against the target system failed (transport or upstream error).
    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required input field was missing; nothing was sent to the target.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// The principal of a grant or revoke is not of the expected resource type.
    #[error("principal type mismatch: expected '{expected}', got '{actual}'")]
    PrincipalTypeMismatch { expected: String, actual: String },

    /// The target acknowledged a delete but the object can still be observed.
    #[error("delete verification failed for {identifier}: {message}")]
    DeleteVerificationFailed {
        identifier: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A page token was returned twice while draining a listing.
    #[error("pagination cycle detected at token '{token}'")]
    PaginationCycle { token: String },

    /// The operation was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,
}

impl ConnectorError {
    /// Get an error code for classification.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectorError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            ConnectorError::OperationFailed { .. } => "OPERATION_FAILED",
            ConnectorError::MissingField { .. } => "MISSING_FIELD",
            ConnectorError::PrincipalTypeMismatch { .. } => "PRINCIPAL_TYPE_MISMATCH",
            ConnectorError::DeleteVerificationFailed { .. } => "DELETE_VERIFICATION_FAILED",
            ConnectorError::PaginationCycle { .. } => "PAGINATION_CYCLE",
            ConnectorError::Cancelled => "CANCELLED",
        }
    }

    // Convenience constructors

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an operation failed error.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        ConnectorError::OperationFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create an operation failed error with source.
    pub fn operation_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::OperationFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ConnectorError::MissingField {
            field: field.into(),
        }
    }

    /// Create a delete verification error.
    pub fn delete_verification_failed(
        identifier: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConnectorError::DeleteVerificationFailed {
            identifier: identifier.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a delete verification error with source.
    pub fn delete_verification_failed_with_source(
        identifier: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::DeleteVerificationFailed {
            identifier: identifier.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// A [`ConnectorError`] together with the annotations gathered before it.
///
/// Callers must not read a rate-limit annotation as a sign of success, nor its
/// absence as a sign that no limiting happened.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SyncError {
    #[source]
    pub error: ConnectorError,
    pub annotations: Annotations,
}

impl SyncError {
    /// Attach annotations to an error.
    #[must_use]
    pub fn new(error: ConnectorError, annotations: Annotations) -> Self {
        Self { error, annotations }
    }

    /// The error code of the wrapped error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

impl From<ConnectorError> for SyncError {
    fn from(error: ConnectorError) -> Self {
        Self::new(error, Annotations::new())
    }
}

/// Result type for host-facing sync and provisioning calls.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::RateLimitDescription;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ConnectorError::missing_field("email").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            ConnectorError::operation_failed("test").error_code(),
            "OPERATION_FAILED"
        );
        assert_eq!(ConnectorError::Cancelled.error_code(), "CANCELLED");
    }

    #[test]
    fn test_error_display() {
        let err = ConnectorError::PrincipalTypeMismatch {
            expected: "user".to_string(),
            actual: "role".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "principal type mismatch: expected 'user', got 'role'"
        );

        let err = ConnectorError::missing_field("default_role_id");
        assert_eq!(err.to_string(), "missing required field: default_role_id");
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::new(std::io::ErrorKind::Other, "underlying error");
        let err = ConnectorError::operation_failed_with_source("failed to list roles", source_err);

        assert_eq!(err.to_string(), "failed to list roles");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("underlying error"));
    }

    #[test]
    fn test_sync_error_keeps_annotations() {
        let mut annotations = Annotations::new();
        annotations.with_rate_limiting(Some(RateLimitDescription::default()));

        let err = SyncError::new(ConnectorError::Cancelled, annotations);
        assert_eq!(err.error_code(), "CANCELLED");
        assert!(err.annotations.rate_limit().is_some());
    }

    #[test]
    fn test_sync_error_from_connector_error_has_no_annotations() {
        let err: SyncError = ConnectorError::missing_field("email").into();
        assert!(err.annotations.is_empty());
    }
}
