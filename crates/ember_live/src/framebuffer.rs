//! Shared live framebuffer.

use std::sync::atomic::{AtomicU32, Ordering};

/// Row-major pixel buffer, one packed RGBA word per pixel (red in the
/// high byte, alpha in the low byte).
///
/// Pixels are atomics so workers can store whole pixels while a presenter
/// reads concurrently. All accesses are relaxed: a snapshot taken
/// mid-render shows whatever rows have landed, and partially filled
/// frames are accepted presentation behavior.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<AtomicU32>,
}

impl Framebuffer {
    /// Create a framebuffer cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = (0..width as usize * height as usize)
            .map(|_| AtomicU32::new(0))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Store a packed pixel at (x, y).
    pub fn store(&self, x: u32, y: u32, packed: u32) {
        self.pixels[(y * self.width + x) as usize].store(packed, Ordering::Relaxed);
    }

    /// Load the packed pixel at (x, y).
    pub fn load(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize].load(Ordering::Relaxed)
    }

    /// Copy the current contents into a plain vector for presentation.
    pub fn snapshot(&self) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|p| p.load(Ordering::Relaxed))
            .collect()
    }
}

/// View a snapshot as raw bytes for texture upload.
pub fn snapshot_bytes(snapshot: &[u32]) -> &[u8] {
    bytemuck::cast_slice(snapshot)
}
