//! Observability hook for the lifecycle controller.

use crate::error::ResourceError;
use crate::event::RequestType;
use crate::reporter::ResponseStatus;

/// Branch of the dispatch state machine taken for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Create with no pre-existing resource
    CreateAbsent,
    /// Create found the resource already there
    CreatePresent,
    /// Delete-and-recreate update, resource present
    ReplacePresent,
    /// Delete-and-recreate update, resource missing
    ReplaceAbsent,
    UpdateInPlace,
    /// In-place update requested but the resource exposes no updater
    UpdateUnsupported,
    DeletePresent,
    DeleteAbsent,
}

/// Resource capability invoked by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    IsPresent,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IsPresent => write!(f, "is_present"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Receives structured notifications as the controller works.
///
/// All methods default to no-ops.
pub trait LifecycleObserver: Send + Sync {
    fn branch_taken(&self, _request_type: RequestType, _branch: Branch) {}

    fn operation_failed(
        &self,
        _request_type: RequestType,
        _operation: Operation,
        _error: &ResourceError,
    ) {
    }

    fn reported(&self, _request_type: RequestType, _status: ResponseStatus, _reason: Option<&str>) {}
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LifecycleObserver for TracingObserver {
    fn branch_taken(&self, request_type: RequestType, branch: Branch) {
        tracing::info!(request_type = %request_type, branch = ?branch, "Custom resource branch selected");
    }

    fn operation_failed(&self, request_type: RequestType, operation: Operation, error: &ResourceError) {
        tracing::warn!(
            request_type = %request_type,
            operation = %operation,
            error = %error,
            "Resource operation failed"
        );
    }

    fn reported(&self, request_type: RequestType, status: ResponseStatus, reason: Option<&str>) {
        tracing::info!(
            request_type = %request_type,
            status = %status,
            reason = reason.unwrap_or(""),
            "Custom resource ended"
        );
    }
}
