// src/progress.rs
/// Progress reporting for long-running operations (harvest/scan).
/// Every skip or fallback goes through here so the user sees it.
pub trait Progress {
    /// Called at the start with the total number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item (page or variable) finished. `pos` is 0-based.
    fn item_done(&mut self, _pos: usize, _name: &str, _outcome: &str) {}

    /// One item was skipped or fell back, with the reason.
    fn item_skipped(&mut self, _pos: usize, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Prints one line per item to stdout: `0003/0120 - NAME= value`.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, pos: usize, name: &str, outcome: &str) {
        println!("{pos:04}/{:04} - {name}= {outcome}", self.total);
    }

    fn item_skipped(&mut self, pos: usize, name: &str, reason: &str) {
        println!("{pos:04}/{:04} - {name}: skipped ({reason})", self.total);
    }
}
