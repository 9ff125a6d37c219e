//! Custom resource request envelope.
//!
//! CloudFormation delivers each lifecycle request as a loosely-typed JSON
//! document. [`ResourceEvent`] models the handful of fields the controller
//! and the response document read, and keeps everything else in
//! [`ResourceEvent::extra`] so it survives a round trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle request kind sent by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Update => write!(f, "Update"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// A custom resource request.
///
/// Resource adapters read [`ResourceEvent::resource_properties`]; the
/// controller itself only looks at [`ResourceEvent::request_type`] and
/// writes [`ResourceEvent::assigned_physical_resource_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceEvent {
    pub request_type: RequestType,

    /// Pre-signed callback URL the response document is PUT to
    #[serde(rename = "ResponseURL", default, skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Identifier the orchestrator already knows (Update and Delete only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,

    /// Opaque property bag forwarded to the resource adapter
    #[serde(default)]
    pub resource_properties: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,

    /// Identifier returned by a create during this invocation
    #[serde(
        rename = "physicalResourceId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_physical_resource_id: Option<String>,

    #[serde(rename = "noEcho", default, skip_serializing_if = "is_false")]
    pub no_echo: bool,

    #[serde(rename = "responseData", default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,

    /// Fields the controller does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ResourceEvent {
    /// Creates a bare event of the given kind.
    pub fn new(request_type: RequestType) -> Self {
        Self {
            request_type,
            response_url: None,
            stack_id: None,
            request_id: None,
            logical_resource_id: None,
            resource_type: None,
            physical_resource_id: None,
            resource_properties: Map::new(),
            old_resource_properties: None,
            assigned_physical_resource_id: None,
            no_echo: false,
            response_data: None,
            extra: Map::new(),
        }
    }

    /// Parses an event from its JSON representation.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[must_use]
    pub fn with_response_url(mut self, url: impl Into<String>) -> Self {
        self.response_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.resource_properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_physical_resource_id(mut self, id: impl Into<String>) -> Self {
        self.physical_resource_id = Some(id.into());
        self
    }

    /// Records the identifier produced by a create.
    ///
    /// Empty identifiers are ignored so the reported id falls back to the
    /// previously known one.
    pub fn assign_physical_resource_id(&mut self, id: Option<String>) {
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            self.assigned_physical_resource_id = Some(id);
        }
    }

    /// Identifier to report back: assigned by this invocation, else the one
    /// the orchestrator supplied.
    pub fn effective_physical_resource_id(&self) -> Option<&str> {
        self.assigned_physical_resource_id
            .as_deref()
            .or(self.physical_resource_id.as_deref())
    }

    /// Returns a string property from the resource property bag.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.resource_properties.get(key).and_then(Value::as_str)
    }
}
