//! # cfnres-core
//!
//! Lifecycle controller for CloudFormation custom resources.
//!
//! The controller receives a Create, Update or Delete request, decides
//! which resource operations to run according to its [`LifecyclePolicy`],
//! and closes every request with exactly one status report.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cfnres_core::{ControllerConfig, InvocationContext, LifecycleController};
//!
//! let config = ControllerConfig::builder()
//!     .resource(Arc::new(UserPoolDomain::new(client)))
//!     .delete_to_update(true)
//!     .ignore_delete_failure(true)
//!     .build();
//! let controller = LifecycleController::new(config, Arc::new(HttpResponseReporter::new()))?;
//!
//! let ack = controller
//!     .process(event, &InvocationContext::new(log_stream_name))
//!     .await;
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod event;
pub mod observer;
pub mod reporter;
pub mod resource;

pub use config::{ControllerConfig, ControllerConfigBuilder, LifecyclePolicy};
pub use context::{CompletionSignal, InvocationContext};
pub use controller::{Acknowledgment, LifecycleController, UPDATE_UNSUPPORTED_REASON};
pub use error::{ConfigError, ResourceError, ResourceResult};
pub use event::{RequestType, ResourceEvent};
pub use observer::{Branch, LifecycleObserver, Operation, TracingObserver};
pub use reporter::{ResponseReporter, ResponseStatus};
pub use resource::{CustomResource, ResourceUpdate};
