// src/progress.rs
/// Lightweight progress reporting for batch collection.
/// Callers implement this to surface status however they like.
pub trait Progress {
    /// Called at the start with the number of pages to visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A page was extracted and added to the corpus.
    fn item_done(&mut self, _page_id: u32) {}

    /// A page could not be fetched or extracted; the batch goes on.
    fn item_failed(&mut self, _page_id: u32, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
