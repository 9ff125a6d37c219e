use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::InvocationContext;
use crate::event::ResourceEvent;

/// Terminal status reported to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResponseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("unknown response status: {other}")),
        }
    }
}

/// Delivers the terminal status of an invocation to the orchestrator.
///
/// Delivery problems are the reporter's to log; they never reach the
/// controller. Implementations must fire the context's completion signal on
/// every path.
#[async_trait]
pub trait ResponseReporter: Send + Sync {
    async fn report(
        &self,
        event: &ResourceEvent,
        context: &InvocationContext,
        status: ResponseStatus,
        reason: Option<String>,
    );
}
