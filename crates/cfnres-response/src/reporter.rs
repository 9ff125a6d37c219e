use std::time::Duration;

use async_trait::async_trait;
use cfnres_core::{InvocationContext, ResourceEvent, ResponseReporter, ResponseStatus};
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tracing::{debug, info, warn};

use crate::completion::CompletionGuard;
use crate::document::ResponseDocument;
use crate::error::ReportError;

/// Default transport timeout for the callback PUT
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends response documents to the pre-signed callback URL of the event.
pub struct HttpResponseReporter {
    http_client: Client,
}

impl HttpResponseReporter {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ReportError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }

    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Builds the response document and PUTs it to the event's `ResponseURL`.
    ///
    /// The body is sent with an empty content type, which the pre-signed URL
    /// requires.
    pub async fn send(
        &self,
        event: &ResourceEvent,
        context: &InvocationContext,
        status: ResponseStatus,
        reason: Option<String>,
    ) -> Result<(), ReportError> {
        let url = event
            .response_url
            .as_deref()
            .ok_or(ReportError::MissingResponseUrl)?;

        let document = ResponseDocument::build(event, context, status, reason);
        let body = document.to_json()?;

        if document.no_echo {
            debug!(status = %document.status, "Sending response (body withheld, NoEcho)");
        } else {
            debug!(body = %body, "Sending response");
        }

        let response = self
            .http_client
            .put(url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await?;

        let http_status = response.status();
        if http_status.is_success() {
            info!(
                status = %document.status,
                physical_resource_id = %document.physical_resource_id,
                "Response delivered"
            );
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ReportError::Rejected {
                status: http_status.as_u16(),
                body,
            })
        }
    }
}

impl Default for HttpResponseReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseReporter for HttpResponseReporter {
    async fn report(
        &self,
        event: &ResourceEvent,
        context: &InvocationContext,
        status: ResponseStatus,
        reason: Option<String>,
    ) {
        let _completion = CompletionGuard::new(context.completion());

        if let Err(e) = self.send(event, context, status, reason).await {
            warn!(
                error = %e,
                request_id = ?event.request_id,
                "Failed to send cloudformation response"
            );
        }
    }
}
