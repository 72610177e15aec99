// src/progress.rs
/// Progress reporting for a run. The binary prints these to stderr; tests
/// and library callers can pass `NullProgress` or `None`.
pub trait Progress {
    /// Called once with the number of pages to fetch (URLs × passes).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One pass over one URL finished with `cards` posting cards on the page.
    fn item_done(&mut self, _url: &str, _cards: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

pub struct NullProgress;
impl Progress for NullProgress {}
