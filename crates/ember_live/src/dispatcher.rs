//! Worker pool driving a live render pass.

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ember_tracer::{pack_rgba, render_pixel, row_rng, Camera, ConfigError, RenderConfig, Scene};
use log::debug;
use thiserror::Error;

use crate::framebuffer::Framebuffer;
use crate::queue::WorkQueue;

/// Error raised while starting a render pass.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid render configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[from] io::Error),
}

/// Shared state handed to every worker.
struct WorkerContext {
    camera: Arc<Camera>,
    scene: Arc<Scene>,
    config: RenderConfig,
    framebuffer: Arc<Framebuffer>,
    queue: Arc<WorkQueue>,
    cancel: Arc<AtomicBool>,
    rows_done: Arc<AtomicU32>,
}

/// A running render pass over a fixed pool of worker threads.
///
/// Workers pull rows from a shared cursor, render them with the same
/// per-row random streams as the offline paths, and store packed pixels
/// into the shared framebuffer. The pass finishes when the cursor runs
/// out or [`Dispatcher::cancel`] is called; either way the framebuffer
/// holds only fully rendered rows plus cleared ones.
pub struct Dispatcher {
    workers: Vec<JoinHandle<()>>,
    cancel: Arc<AtomicBool>,
    rows_done: Arc<AtomicU32>,
    total_rows: u32,
}

impl Dispatcher {
    /// Validate the configuration and start `threads` workers.
    ///
    /// The framebuffer dimensions must match the camera's; workers index
    /// it by the camera's pixel grid.
    pub fn spawn(
        camera: Arc<Camera>,
        scene: Arc<Scene>,
        config: RenderConfig,
        framebuffer: Arc<Framebuffer>,
        threads: usize,
    ) -> Result<Self, DispatchError> {
        config.validate()?;

        let total_rows = camera.image_height;
        let queue = Arc::new(WorkQueue::new(total_rows));
        let cancel = Arc::new(AtomicBool::new(false));
        let rows_done = Arc::new(AtomicU32::new(0));

        let mut workers = Vec::with_capacity(threads.max(1));
        for idx in 0..threads.max(1) {
            let ctx = WorkerContext {
                camera: Arc::clone(&camera),
                scene: Arc::clone(&scene),
                config: config.clone(),
                framebuffer: Arc::clone(&framebuffer),
                queue: Arc::clone(&queue),
                cancel: Arc::clone(&cancel),
                rows_done: Arc::clone(&rows_done),
            };
            let handle = thread::Builder::new()
                .name(format!("render-worker-{idx}"))
                .spawn(move || worker_loop(idx, ctx))?;
            workers.push(handle);
        }

        Ok(Self {
            workers,
            cancel,
            rows_done,
            total_rows,
        })
    }

    /// Rows completed so far out of the total.
    pub fn progress(&self) -> (u32, u32) {
        (self.rows_done.load(Ordering::Relaxed), self.total_rows)
    }

    /// True once every worker has exited.
    pub fn is_finished(&self) -> bool {
        self.workers.iter().all(|w| w.is_finished())
    }

    /// Ask the workers to stop. Each finishes its current row first, so
    /// the framebuffer never holds a half-rendered row.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for every worker to exit. Propagates a worker panic.
    pub fn join(self) {
        for worker in self.workers {
            if let Err(payload) = worker.join() {
                panic::resume_unwind(payload);
            }
        }
    }
}

fn worker_loop(idx: usize, ctx: WorkerContext) {
    debug!("render-worker-{idx} started");

    // Cancellation is only checked between rows; a claimed row is always
    // rendered to completion.
    while !ctx.cancel.load(Ordering::Relaxed) {
        let Some(y) = ctx.queue.next() else {
            break;
        };

        let mut rng = row_rng(ctx.config.seed, y);
        for x in 0..ctx.camera.image_width {
            let color = render_pixel(&ctx.camera, &ctx.scene, &ctx.config, x, y, &mut rng);
            ctx.framebuffer.store(x, y, pack_rgba(color));
        }
        ctx.rows_done.fetch_add(1, Ordering::Relaxed);
    }

    debug!("render-worker-{idx} exiting");
}
