// src/progress.rs
/// Lightweight progress reporting for the per-poster loops.
/// Frontends implement this to surface status; every method defaults to a no-op.
pub trait Progress {
    /// Called when a stage starts with the number of posters it will visit.
    fn begin(&mut self, _stage: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One poster handled (fetched, skipped, kept, dropped, enriched).
    fn item_done(&mut self, _id: u64) {}

    /// One poster hit a recoverable failure.
    fn item_failed(&mut self, _id: u64, _reason: &str) {}

    /// Called at the end of the stage.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
