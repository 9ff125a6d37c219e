//! Resource capability traits.
//!
//! A resource adapter manages exactly one kind of external object. It must
//! be able to report presence, create and delete; in-place update is an
//! optional capability exposed through [`CustomResource::updater`].

use async_trait::async_trait;

use crate::error::ResourceResult;
use crate::event::ResourceEvent;

/// Mandatory capabilities of a managed resource.
///
/// # Example
///
/// ```ignore
/// struct Domain { client: CognitoClient }
///
/// #[async_trait]
/// impl CustomResource for Domain {
///     async fn is_present(&self, event: &ResourceEvent) -> ResourceResult<bool> {
///         Ok(self.client.describe(event.property_str("Domain")).await?.is_active())
///     }
///     async fn create(&self, event: &ResourceEvent) -> ResourceResult<Option<String>> {
///         self.client.create(event.property_str("Domain")).await?;
///         Ok(event.property_str("Domain").map(String::from))
///     }
///     async fn delete(&self, event: &ResourceEvent) -> ResourceResult<()> {
///         self.client.delete(event.property_str("Domain")).await
///     }
/// }
/// ```
#[async_trait]
pub trait CustomResource: Send + Sync {
    /// Reports whether the resource currently exists.
    ///
    /// Absence is `Ok(false)`, never an error.
    async fn is_present(&self, event: &ResourceEvent) -> ResourceResult<bool>;

    /// Creates the resource, optionally returning its physical identifier.
    async fn create(&self, event: &ResourceEvent) -> ResourceResult<Option<String>>;

    /// Deletes the resource.
    ///
    /// Implementations may wait for asynchronous deletion to settle before
    /// returning.
    async fn delete(&self, event: &ResourceEvent) -> ResourceResult<()>;

    /// In-place update capability, if the resource has one.
    fn updater(&self) -> Option<&dyn ResourceUpdate> {
        None
    }
}

/// Optional in-place update capability.
#[async_trait]
pub trait ResourceUpdate: Send + Sync {
    async fn update(&self, event: &ResourceEvent) -> ResourceResult<()>;
}
