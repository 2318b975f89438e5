//! Single-threaded execution context for all image cache state.

use std::future::Future;

use tokio::task::{JoinHandle, LocalSet};

/// The UI execution context.
///
/// Loaders and the registry are `!Send`; their futures can only run here.
/// Every cache read and write therefore happens on one logical thread and
/// needs no locking.
pub struct UiContext {
    local: LocalSet,
}

impl UiContext {
    /// Creates an idle context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            local: LocalSet::new(),
        }
    }

    /// Queues `future` on this context.
    ///
    /// The task makes progress while the context is driven by `run_until`.
    /// Aborting the returned handle cancels it.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        self.local.spawn_local(future)
    }

    /// Drives the context until `future` completes.
    pub async fn run_until<F: Future>(&self, future: F) -> F::Output {
        self.local.run_until(future).await
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext").finish_non_exhaustive()
    }
}
