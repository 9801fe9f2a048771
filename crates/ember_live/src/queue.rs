//! Row work queue.

use std::sync::Mutex;

/// Mutex-guarded cursor handing out row indices [0, height), each exactly
/// once. The critical section is a read-increment-return.
pub struct WorkQueue {
    cursor: Mutex<u32>,
    height: u32,
}

impl WorkQueue {
    /// Create a queue over `height` rows.
    pub fn new(height: u32) -> Self {
        Self {
            cursor: Mutex::new(0),
            height,
        }
    }

    /// Claim the next unclaimed row, or `None` once all rows are taken.
    pub fn next(&self) -> Option<u32> {
        // A poisoned lock means a worker died mid-claim; the pass cannot
        // continue correctly, so this is fatal.
        let mut cursor = self.cursor.lock().expect("row cursor lock poisoned");
        if *cursor >= self.height {
            return None;
        }
        let row = *cursor;
        *cursor += 1;
        Some(row)
    }
}
