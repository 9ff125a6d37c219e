use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use cfnres_core::{
    Acknowledgment, ControllerConfig, InvocationContext, LifecycleController, ResourceEvent,
    ResponseStatus,
};
use cfnres_response::{CompletionFlag, HttpResponseReporter, ResponseDocument};
use cfnres_rest::RestResource;
use tracing::{info, warn};

use crate::config::AppConfig;

/// Reads a custom resource event from a file, or from stdin when `source` is `-`.
pub fn read_event(source: &str) -> Result<ResourceEvent> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read event file {source}"))?
    };
    serde_json::from_str(&raw).context("Invalid custom resource event")
}

/// Runs one event through the controller backed by the `[rest]` resource.
pub async fn process(
    cfg: &AppConfig,
    event: ResourceEvent,
    log_stream_name: String,
) -> Result<Acknowledgment> {
    let rest = cfg
        .rest
        .clone()
        .context("A [rest] section is required to process events")?;
    let resource = Arc::new(RestResource::new(rest)?);
    let reporter = Arc::new(HttpResponseReporter::with_timeout(cfg.reporter.timeout())?);
    let controller = LifecycleController::new(
        ControllerConfig::from_policy(resource, cfg.policy),
        reporter,
    )?;

    let completion = Arc::new(CompletionFlag::new());
    let context = InvocationContext::new(log_stream_name).with_completion(completion.clone());

    info!(
        request_type = %event.request_type,
        logical_resource_id = event.logical_resource_id.as_deref().unwrap_or("-"),
        "Processing event"
    );
    let ack = controller.process(event, &context).await;

    if !completion.is_done() {
        warn!("Invocation finished without a completion signal");
    }
    Ok(ack)
}

/// Builds the document a report for `event` would carry.
pub fn render(
    mut event: ResourceEvent,
    log_stream_name: String,
    status: ResponseStatus,
    reason: Option<String>,
    physical_id: Option<String>,
) -> ResponseDocument {
    event.assign_physical_resource_id(physical_id);
    let context = InvocationContext::new(log_stream_name);
    ResponseDocument::build(&event, &context, status, reason)
}

/// Sends a report directly, surfacing delivery failures to the caller.
pub async fn signal(
    cfg: &AppConfig,
    mut event: ResourceEvent,
    log_stream_name: String,
    status: ResponseStatus,
    reason: Option<String>,
    physical_id: Option<String>,
) -> Result<()> {
    event.assign_physical_resource_id(physical_id);
    let reporter = HttpResponseReporter::with_timeout(cfg.reporter.timeout())?;
    let context = InvocationContext::new(log_stream_name);
    reporter
        .send(&event, &context, status, reason)
        .await
        .context("Failed to deliver response")?;
    Ok(())
}
