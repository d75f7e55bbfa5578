// src/progress.rs
/// Lightweight progress reporting used by multi-year runs.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of years.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One year resolved.
    fn item_done(&mut self, _year: i32) {}

    /// One year failed (not found, unreachable, ...).
    fn item_failed(&mut self, _year: i32, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
