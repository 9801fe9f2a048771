//! Ember's real-time render dispatcher.
//!
//! A fixed pool of worker threads shares a read-only scene and a packed
//! RGBA framebuffer. A mutex-guarded row cursor hands each worker the next
//! unclaimed row; rows are rendered without further synchronization since
//! each row has exactly one owner. The main thread may snapshot the
//! framebuffer at any time and present partially completed frames.

mod dispatcher;
mod framebuffer;
mod queue;

pub use dispatcher::{DispatchError, Dispatcher};
pub use framebuffer::{snapshot_bytes, Framebuffer};
pub use queue::WorkQueue;
