//! REST-backed [`CustomResource`](cfnres_core::CustomResource) adapter.
//!
//! Lets a custom resource manage an object behind an HTTP API without a
//! dedicated adapter: the `Path` resource property names the object and the
//! remaining properties form the JSON body.

pub mod config;
pub mod error;
pub mod resource;

pub use config::{DeleteWaitConfig, RestResourceConfig};
pub use error::RestError;
pub use resource::{PATH_PROPERTY, RestResource};
