use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resource::CustomResource;

/// Policy flags that steer the controller's dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    /// `Some(true)`: update by delete-and-recreate. `Some(false)`: update in
    /// place, which requires an updater. `None`: update in place when the
    /// resource has an updater.
    #[serde(default)]
    pub delete_to_update: Option<bool>,

    /// Treat an unexpected presence state as a failure instead of tolerating it
    #[serde(default)]
    pub fail_if_unexpected_presence: bool,

    /// Report SUCCESS when deleting a present resource fails
    #[serde(default)]
    pub ignore_delete_failure: bool,
}

/// Controller configuration: the resource adapter plus its policy.
#[derive(Clone, Default)]
pub struct ControllerConfig {
    pub resource: Option<Arc<dyn CustomResource>>,
    pub policy: LifecyclePolicy,
}

impl ControllerConfig {
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    pub fn from_policy(resource: Arc<dyn CustomResource>, policy: LifecyclePolicy) -> Self {
        Self {
            resource: Some(resource),
            policy,
        }
    }

    /// Checks the configuration and hands back the resource adapter.
    pub fn validate(&self) -> Result<&Arc<dyn CustomResource>, ConfigError> {
        let resource = self
            .resource
            .as_ref()
            .ok_or(ConfigError::MissingResourceCapability)?;

        if self.policy.delete_to_update == Some(false) && resource.updater().is_none() {
            return Err(ConfigError::IncompleteUpdateCapability);
        }

        Ok(resource)
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("resource", &self.resource.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

#[derive(Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    pub fn resource(mut self, resource: Arc<dyn CustomResource>) -> Self {
        self.config.resource = Some(resource);
        self
    }

    pub fn delete_to_update(mut self, value: bool) -> Self {
        self.config.policy.delete_to_update = Some(value);
        self
    }

    pub fn fail_if_unexpected_presence(mut self, value: bool) -> Self {
        self.config.policy.fail_if_unexpected_presence = value;
        self
    }

    pub fn ignore_delete_failure(mut self, value: bool) -> Self {
        self.config.policy.ignore_delete_failure = value;
        self
    }

    pub fn build(self) -> ControllerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::ResourceResult;
    use crate::event::ResourceEvent;
    use crate::resource::ResourceUpdate;

    struct CreateOnly;

    #[async_trait]
    impl CustomResource for CreateOnly {
        async fn is_present(&self, _event: &ResourceEvent) -> ResourceResult<bool> {
            Ok(false)
        }
        async fn create(&self, _event: &ResourceEvent) -> ResourceResult<Option<String>> {
            Ok(None)
        }
        async fn delete(&self, _event: &ResourceEvent) -> ResourceResult<()> {
            Ok(())
        }
    }

    struct Updatable;

    #[async_trait]
    impl CustomResource for Updatable {
        async fn is_present(&self, _event: &ResourceEvent) -> ResourceResult<bool> {
            Ok(true)
        }
        async fn create(&self, _event: &ResourceEvent) -> ResourceResult<Option<String>> {
            Ok(None)
        }
        async fn delete(&self, _event: &ResourceEvent) -> ResourceResult<()> {
            Ok(())
        }
        fn updater(&self) -> Option<&dyn ResourceUpdate> {
            Some(self)
        }
    }

    #[async_trait]
    impl ResourceUpdate for Updatable {
        async fn update(&self, _event: &ResourceEvent) -> ResourceResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_resource_is_rejected() {
        let config = ControllerConfig::builder().delete_to_update(true).build();
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::MissingResourceCapability)
        );
    }

    #[test]
    fn test_in_place_update_requires_updater() {
        let config = ControllerConfig::builder()
            .resource(Arc::new(CreateOnly))
            .delete_to_update(false)
            .build();
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::IncompleteUpdateCapability)
        );
    }

    #[test]
    fn test_updater_not_required_unless_explicitly_in_place() {
        let unset = ControllerConfig::builder()
            .resource(Arc::new(CreateOnly))
            .build();
        assert!(unset.validate().is_ok());

        let recreate = ControllerConfig::builder()
            .resource(Arc::new(CreateOnly))
            .delete_to_update(true)
            .build();
        assert!(recreate.validate().is_ok());

        let in_place = ControllerConfig::builder()
            .resource(Arc::new(Updatable))
            .delete_to_update(false)
            .build();
        assert!(in_place.validate().is_ok());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: LifecyclePolicy =
            serde_json::from_str(r#"{ "delete_to_update": true }"#).unwrap();
        assert_eq!(policy.delete_to_update, Some(true));
        assert!(!policy.fail_if_unexpected_presence);
        assert!(!policy.ignore_delete_failure);

        let empty: LifecyclePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LifecyclePolicy::default());
    }
}
