use std::fmt;
use std::sync::Arc;

/// Host hook fired once the response for an invocation has been handled.
pub trait CompletionSignal: Send + Sync {
    fn done(&self);
}

/// Per-invocation host context.
#[derive(Clone)]
pub struct InvocationContext {
    /// Log stream of the running execution, used as fallback reason and id
    pub log_stream_name: String,
    completion: Option<Arc<dyn CompletionSignal>>,
}

impl InvocationContext {
    pub fn new(log_stream_name: impl Into<String>) -> Self {
        Self {
            log_stream_name: log_stream_name.into(),
            completion: None,
        }
    }

    #[must_use]
    pub fn with_completion(mut self, signal: Arc<dyn CompletionSignal>) -> Self {
        self.completion = Some(signal);
        self
    }

    pub fn completion(&self) -> Option<&dyn CompletionSignal> {
        self.completion.as_deref()
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("log_stream_name", &self.log_stream_name)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}
