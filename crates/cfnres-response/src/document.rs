use cfnres_core::{InvocationContext, ResourceEvent, ResponseStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReportError;

/// Prefix of the reason sent when no failure text is available
pub const LOG_STREAM_REASON_PREFIX: &str = "See the details in CloudWatch Log Stream: ";

/// Response document PUT to the orchestrator's callback URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseDocument {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,

    pub no_echo: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseDocument {
    pub fn build(
        event: &ResourceEvent,
        context: &InvocationContext,
        status: ResponseStatus,
        reason: Option<String>,
    ) -> Self {
        let reason = reason
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| format!("{LOG_STREAM_REASON_PREFIX}{}", context.log_stream_name));

        let physical_resource_id = event
            .effective_physical_resource_id()
            .filter(|id| !id.is_empty())
            .unwrap_or(context.log_stream_name.as_str())
            .to_string();

        Self {
            status,
            reason,
            physical_resource_id,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: event.no_echo,
            data: event.response_data.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfnres_core::RequestType;
    use serde_json::json;

    fn ctx() -> InvocationContext {
        InvocationContext::new("logstreamname")
    }

    #[test]
    fn test_fallback_reason_and_physical_id() {
        let event = ResourceEvent::new(RequestType::Create);
        let doc = ResponseDocument::build(&event, &ctx(), ResponseStatus::Failed, None);

        assert_eq!(doc.reason, "See the details in CloudWatch Log Stream: logstreamname");
        assert_eq!(doc.physical_resource_id, "logstreamname");
        assert!(!doc.no_echo);
    }

    #[test]
    fn test_assigned_physical_id_is_reported() {
        let mut event = ResourceEvent::new(RequestType::Create);
        event.assign_physical_resource_id(Some("my-resource-id".to_string()));

        let doc = ResponseDocument::build(&event, &ctx(), ResponseStatus::Success, None);
        assert_eq!(doc.physical_resource_id, "my-resource-id");
    }

    #[test]
    fn test_supplied_physical_id_is_kept_on_update() {
        let event = ResourceEvent::new(RequestType::Update).with_physical_resource_id("existing");
        let doc = ResponseDocument::build(&event, &ctx(), ResponseStatus::Success, None);
        assert_eq!(doc.physical_resource_id, "existing");
    }

    #[test]
    fn test_passthrough_fields() {
        let mut event = ResourceEvent::from_value(json!({
            "RequestType": "Delete",
            "StackId": "stack",
            "RequestId": "request",
            "LogicalResourceId": "Logical",
            "noEcho": true,
            "responseData": { "Arn": "arn:aws:x" }
        }))
        .unwrap();
        event.assign_physical_resource_id(Some("pid".to_string()));

        let doc = ResponseDocument::build(
            &event,
            &ctx(),
            ResponseStatus::Failed,
            Some("Error: oh no".to_string()),
        );
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "Status": "FAILED",
                "Reason": "Error: oh no",
                "PhysicalResourceId": "pid",
                "StackId": "stack",
                "RequestId": "request",
                "LogicalResourceId": "Logical",
                "NoEcho": true,
                "Data": { "Arn": "arn:aws:x" }
            })
        );
    }

    #[test]
    fn test_empty_reason_falls_back() {
        let event = ResourceEvent::new(RequestType::Delete);
        let doc = ResponseDocument::build(&event, &ctx(), ResponseStatus::Failed, Some(String::new()));
        assert!(doc.reason.starts_with(LOG_STREAM_REASON_PREFIX));
    }
}
