pub mod completion;
pub mod document;
pub mod error;
pub mod reporter;

pub use completion::{CompletionFlag, CompletionGuard};
pub use document::{LOG_STREAM_REASON_PREFIX, ResponseDocument};
pub use error::ReportError;
pub use reporter::{DEFAULT_TIMEOUT, HttpResponseReporter};
