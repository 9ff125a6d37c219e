use std::sync::atomic::{AtomicUsize, Ordering};

use cfnres_core::CompletionSignal;

/// Fires a completion signal when dropped.
///
/// Holding one across the delivery call guarantees the host is told the
/// invocation finished on every exit path, including early returns and
/// unwinding.
pub struct CompletionGuard<'a> {
    signal: Option<&'a dyn CompletionSignal>,
}

impl<'a> CompletionGuard<'a> {
    pub fn new(signal: Option<&'a dyn CompletionSignal>) -> Self {
        Self { signal }
    }
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.take() {
            signal.done();
        }
    }
}

/// Completion signal that counts how often it fired.
#[derive(Debug, Default)]
pub struct CompletionFlag {
    fired: AtomicUsize,
}

impl CompletionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.count() > 0
    }

    pub fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl CompletionSignal for CompletionFlag {
    fn done(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}
