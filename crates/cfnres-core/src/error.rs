use thiserror::Error;

/// Rejected controller configuration.
///
/// Construction fails closed: an invalid configuration never yields a
/// usable [`LifecycleController`](crate::LifecycleController).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("A custom resource handler is required")]
    MissingResourceCapability,

    #[error("An update method must be defined when deleteToUpdate is false")]
    IncompleteUpdateCapability,
}

/// Failure raised by a resource adapter.
///
/// The `Display` rendering is the only information that reaches the
/// orchestrator, as the `Reason` of a FAILED response.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Adapter-raised failure, rendered as `Error: <message>`
    #[error("Error: {0}")]
    Failed(String),

    /// Rejection carrying a message that is reported verbatim
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResourceError {
    /// Create a new Failed error
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Create a new Message error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Result alias for resource adapter operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_rendering() {
        assert_eq!(ResourceError::failed("oh no").to_string(), "Error: oh no");
        assert_eq!(ResourceError::message("boom").to_string(), "boom");
        let other: ResourceError = anyhow::anyhow!("socket closed").into();
        assert_eq!(other.to_string(), "socket closed");
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingResourceCapability.to_string(),
            "A custom resource handler is required"
        );
        assert_eq!(
            ConfigError::IncompleteUpdateCapability.to_string(),
            "An update method must be defined when deleteToUpdate is false"
        );
    }
}
