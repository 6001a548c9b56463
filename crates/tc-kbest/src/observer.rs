//! Progress-reporting hooks for a K-best engine run.

/// Callbacks invoked by [`KBestEngine::run`][crate::engine::KBestEngine::run]
/// at key points in the batch loop.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Under the `parallel` feature, batches are not
/// processed in a fixed order, so `on_batch_start`/`on_batch_end` are only
/// called from the sequential path; `on_run_end` always fires.
pub trait KBestObserver {
    /// Called before a batch of anchors starts relaxing.
    fn on_batch_start(&mut self, _batch_index: usize, _batch_len: usize) {}

    /// Called after a batch's labels have been merged into the global top-K.
    fn on_batch_end(&mut self, _batch_index: usize) {}

    /// Called once after every batch has been merged.
    fn on_run_end(&mut self, _node_count: usize) {}
}

/// A [`KBestObserver`] that does nothing.
pub struct NoopObserver;

impl KBestObserver for NoopObserver {}
