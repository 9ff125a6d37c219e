//! Event dispatch for custom resource lifecycle requests.
//!
//! Every request runs through a small state machine keyed on the request
//! type and ends in exactly one call to the [`ResponseReporter`]:
//!
//! | Request | Presence query | Operations                               |
//! |---------|----------------|------------------------------------------|
//! | Create  | yes            | create when absent                       |
//! | Update  | recreate only  | delete + create, or in-place update      |
//! | Delete  | yes            | delete when present                      |
//!
//! Resource operations are awaited one at a time. The controller holds no
//! state between invocations apart from its configuration.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::{ControllerConfig, LifecyclePolicy};
use crate::context::InvocationContext;
use crate::error::{ConfigError, ResourceError};
use crate::event::{RequestType, ResourceEvent};
use crate::observer::{Branch, LifecycleObserver, Operation, TracingObserver};
use crate::reporter::{ResponseReporter, ResponseStatus};
use crate::resource::CustomResource;

/// Reason reported when an in-place update is requested of a resource that
/// cannot update.
pub const UPDATE_UNSUPPORTED_REASON: &str = "update is not supported by this resource";

/// Value returned to the host once an event has been handled.
///
/// Informational only: the orchestrator learns the outcome from the
/// reporter, not from this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub status_code: u16,
    pub body: String,
}

impl Acknowledgment {
    fn completed(event: &ResourceEvent) -> Self {
        let input = serde_json::to_value(event).unwrap_or(Value::Null);
        Self {
            status_code: 200,
            body: json!({ "message": "Completed", "input": input }).to_string(),
        }
    }
}

/// Terminal status plus the reason attached to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Outcome {
    status: ResponseStatus,
    reason: Option<String>,
}

impl Outcome {
    fn success() -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
        }
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            reason: Some(reason.into()),
        }
    }

    /// Policy-triggered failure; carries no reason so it can be told apart
    /// from operation failures.
    fn unexpected_presence() -> Self {
        Self {
            status: ResponseStatus::Failed,
            reason: None,
        }
    }
}

/// Idempotent lifecycle controller for one resource type.
pub struct LifecycleController {
    resource: Arc<dyn CustomResource>,
    policy: LifecyclePolicy,
    reporter: Arc<dyn ResponseReporter>,
    observer: Arc<dyn LifecycleObserver>,
}

impl LifecycleController {
    /// Validates `config` and builds a controller.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingResourceCapability` without a resource,
    /// and `ConfigError::IncompleteUpdateCapability` when in-place update is
    /// demanded of a resource without an updater.
    pub fn new(
        config: ControllerConfig,
        reporter: Arc<dyn ResponseReporter>,
    ) -> Result<Self, ConfigError> {
        let resource = Arc::clone(config.validate()?);
        Ok(Self {
            resource,
            policy: config.policy,
            reporter,
            observer: Arc::new(TracingObserver),
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Changes the unexpected-presence policy between invocations.
    ///
    /// This is the only setting that may change after construction.
    pub fn set_fail_if_unexpected_presence(&mut self, value: bool) {
        self.policy.fail_if_unexpected_presence = value;
    }

    /// Handles one lifecycle request and reports its outcome.
    pub async fn process(
        &self,
        mut event: ResourceEvent,
        context: &InvocationContext,
    ) -> Acknowledgment {
        let request_type = event.request_type;
        tracing::debug!(
            request_type = %request_type,
            logical_resource_id = ?event.logical_resource_id,
            request_id = ?event.request_id,
            "Processing custom resource event"
        );

        let outcome = match request_type {
            RequestType::Create => self.handle_create(&mut event).await,
            RequestType::Update => self.handle_update(&mut event).await,
            RequestType::Delete => self.handle_delete(&event).await,
        };

        self.observer
            .reported(request_type, outcome.status, outcome.reason.as_deref());
        self.reporter
            .report(&event, context, outcome.status, outcome.reason)
            .await;

        Acknowledgment::completed(&event)
    }

    async fn handle_create(&self, event: &mut ResourceEvent) -> Outcome {
        let present = match self.query_presence(event).await {
            Ok(present) => present,
            Err(outcome) => return outcome,
        };

        if !present {
            self.observer
                .branch_taken(RequestType::Create, Branch::CreateAbsent);
            return self.create(event).await;
        }

        self.observer
            .branch_taken(RequestType::Create, Branch::CreatePresent);
        if self.policy.fail_if_unexpected_presence {
            Outcome::unexpected_presence()
        } else {
            Outcome::success()
        }
    }

    async fn handle_update(&self, event: &mut ResourceEvent) -> Outcome {
        if self.policy.delete_to_update == Some(true) {
            return self.replace(event).await;
        }

        let Some(updater) = self.resource.updater() else {
            self.observer
                .branch_taken(RequestType::Update, Branch::UpdateUnsupported);
            return Outcome::failed(UPDATE_UNSUPPORTED_REASON);
        };

        self.observer
            .branch_taken(RequestType::Update, Branch::UpdateInPlace);
        match updater.update(event).await {
            Ok(()) => Outcome::success(),
            Err(error) => self.operation_failed(RequestType::Update, Operation::Update, error),
        }
    }

    /// Delete-and-recreate update. A tolerated delete failure still falls
    /// through to create.
    async fn replace(&self, event: &mut ResourceEvent) -> Outcome {
        let present = match self.query_presence(event).await {
            Ok(present) => present,
            Err(outcome) => return outcome,
        };

        if present {
            self.observer
                .branch_taken(RequestType::Update, Branch::ReplacePresent);
            if let Err(error) = self.resource.delete(event).await {
                if self.policy.fail_if_unexpected_presence {
                    return self.operation_failed(RequestType::Update, Operation::Delete, error);
                }
                self.observer
                    .operation_failed(RequestType::Update, Operation::Delete, &error);
            }
        } else {
            self.observer
                .branch_taken(RequestType::Update, Branch::ReplaceAbsent);
            if self.policy.fail_if_unexpected_presence {
                return Outcome::unexpected_presence();
            }
        }

        self.create(event).await
    }

    async fn handle_delete(&self, event: &ResourceEvent) -> Outcome {
        let present = match self.query_presence(event).await {
            Ok(present) => present,
            Err(outcome) => return outcome,
        };

        if !present {
            self.observer
                .branch_taken(RequestType::Delete, Branch::DeleteAbsent);
            return if self.policy.fail_if_unexpected_presence {
                Outcome::unexpected_presence()
            } else {
                Outcome::success()
            };
        }

        self.observer
            .branch_taken(RequestType::Delete, Branch::DeletePresent);
        match self.resource.delete(event).await {
            Ok(()) => Outcome::success(),
            Err(error) if self.policy.ignore_delete_failure => {
                self.observer
                    .operation_failed(RequestType::Delete, Operation::Delete, &error);
                Outcome::success()
            }
            Err(error) => self.operation_failed(RequestType::Delete, Operation::Delete, error),
        }
    }

    async fn create(&self, event: &mut ResourceEvent) -> Outcome {
        match self.resource.create(event).await {
            Ok(id) => {
                event.assign_physical_resource_id(id);
                Outcome::success()
            }
            Err(error) => self.operation_failed(event.request_type, Operation::Create, error),
        }
    }

    async fn query_presence(&self, event: &ResourceEvent) -> Result<bool, Outcome> {
        self.resource
            .is_present(event)
            .await
            .map_err(|error| self.operation_failed(event.request_type, Operation::IsPresent, error))
    }

    fn operation_failed(
        &self,
        request_type: RequestType,
        operation: Operation,
        error: ResourceError,
    ) -> Outcome {
        self.observer
            .operation_failed(request_type, operation, &error);
        Outcome::failed(error.to_string())
    }
}
