//! Resource adapter over a plain REST API.
//!
//! Each custom resource maps to one URL, `base_url` joined with the `Path`
//! resource property:
//!
//! | Capability | Request  | Notes                                    |
//! |------------|----------|------------------------------------------|
//! | is_present | `GET`    | 2xx present, 404 absent                  |
//! | create     | `PUT`    | identifier from `id_field`, else `Path`  |
//! | update     | `PATCH`  | only when `update_supported`             |
//! | delete     | `DELETE` | 404 tolerated, then polls until absent   |

use async_trait::async_trait;
use cfnres_core::{CustomResource, ResourceEvent, ResourceResult, ResourceUpdate};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::RestResourceConfig;
use crate::error::RestError;

/// Resource property naming the object's path below `base_url`
pub const PATH_PROPERTY: &str = "Path";

/// Property CloudFormation injects into every request; never forwarded
const SERVICE_TOKEN_PROPERTY: &str = "ServiceToken";

pub struct RestResource {
    http_client: Client,
    base_url: Url,
    config: RestResourceConfig,
}

impl RestResource {
    pub fn new(config: RestResourceConfig) -> Result<Self, RestError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestError::invalid_config(format!("header {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RestError::invalid_config(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &RestResourceConfig {
        &self.config
    }

    fn resource_path<'e>(&self, event: &'e ResourceEvent) -> Result<&'e str, RestError> {
        event
            .property_str(PATH_PROPERTY)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| RestError::MissingProperty(PATH_PROPERTY.to_string()))
    }

    /// Resolves `Path` below `base_url`. Absolute URLs and paths climbing
    /// above the base are rejected, since every request carries the
    /// configured headers.
    fn target_url(&self, event: &ResourceEvent) -> Result<Url, RestError> {
        let path = self.resource_path(event)?;
        if Url::parse(path).is_ok() {
            return Err(RestError::PathOutsideBase(path.to_string()));
        }
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path()) {
            return Err(RestError::PathOutsideBase(path.to_string()));
        }
        Ok(url)
    }

    fn payload(event: &ResourceEvent) -> Value {
        let mut properties = event.resource_properties.clone();
        properties.remove(SERVICE_TOKEN_PROPERTY);
        Value::Object(properties)
    }

    async fn probe(&self, url: &Url) -> Result<bool, RestError> {
        let response = self.http_client.get(url.clone()).send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::unexpected(Method::GET, url, response).await),
        }
    }

    async fn send_json(&self, method: Method, url: &Url, body: &Value) -> Result<Response, RestError> {
        let response = self
            .http_client
            .request(method.clone(), url.clone())
            .json(body)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::unexpected(method, url, response).await)
        }
    }

    async fn unexpected(method: Method, url: &Url, response: Response) -> RestError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        RestError::UnexpectedStatus {
            method: method.to_string(),
            url: url.to_string(),
            status,
            body,
        }
    }

    /// Polls until the object disappears or the attempts run out.
    ///
    /// Running out is not an error: the DELETE itself was accepted.
    async fn wait_until_absent(&self, url: &Url) {
        let wait = self.config.delete_wait;
        let mut remaining = wait.attempts;
        loop {
            match self.probe(url).await {
                Ok(false) => return,
                Ok(true) if remaining > 0 => {
                    remaining -= 1;
                    info!(url = %url, interval_ms = wait.interval_ms, "Waiting for deletion to complete");
                    tokio::time::sleep(wait.interval()).await;
                }
                Ok(true) => {
                    warn!(url = %url, attempts = wait.attempts, "Resource still present after delete");
                    return;
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Could not confirm deletion");
                    return;
                }
            }
        }
    }
}

#[async_trait]
impl CustomResource for RestResource {
    async fn is_present(&self, event: &ResourceEvent) -> ResourceResult<bool> {
        let url = self.target_url(event)?;
        let present = self.probe(&url).await?;
        debug!(url = %url, present, "Presence checked");
        Ok(present)
    }

    async fn create(&self, event: &ResourceEvent) -> ResourceResult<Option<String>> {
        let url = self.target_url(event)?;
        let response = self
            .send_json(Method::PUT, &url, &Self::payload(event))
            .await?;

        // Empty or non-JSON bodies fall back to the path
        let body: Option<Value> = response.json().await.ok();
        let id = body
            .as_ref()
            .and_then(|b| b.get(&self.config.id_field))
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| self.resource_path(event).unwrap_or_default().to_string());

        info!(url = %url, physical_resource_id = %id, "Created resource");
        Ok(Some(id))
    }

    async fn delete(&self, event: &ResourceEvent) -> ResourceResult<()> {
        let url = self.target_url(event)?;
        let response = self
            .http_client
            .delete(url.clone())
            .send()
            .await
            .map_err(RestError::from)?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Self::unexpected(Method::DELETE, &url, response).await.into());
        }

        info!(url = %url, "Deleted resource");
        self.wait_until_absent(&url).await;
        Ok(())
    }

    fn updater(&self) -> Option<&dyn ResourceUpdate> {
        if self.config.update_supported {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl ResourceUpdate for RestResource {
    async fn update(&self, event: &ResourceEvent) -> ResourceResult<()> {
        let url = self.target_url(event)?;
        self.send_json(Method::PATCH, &url, &Self::payload(event))
            .await?;
        info!(url = %url, "Updated resource");
        Ok(())
    }
}
