//! Windowless surface - a plain timer loop with no drawing
//!
//! Stands in for a real backend in tests and headless deployments: it
//! ticks on a fixed interval, counts repaint requests instead of
//! painting, and can end after a fixed number of frames to behave like a
//! user closing the window.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{PlotSurface, SurfaceExit, TickOutcome};

/// A surface that keeps time but draws nothing
pub struct HeadlessSurface<F> {
    frames: Arc<AtomicU64>,
    max_frames: Option<u64>,
    _fig: PhantomData<fn() -> F>,
}

impl<F> HeadlessSurface<F> {
    pub fn new() -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            max_frames: None,
            _fig: PhantomData,
        }
    }

    /// End the loop after `frames` repaints, like a window being closed.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Shared repaint counter, readable from outside the worker.
    pub fn frame_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.frames)
    }
}

impl<F> Default for HeadlessSurface<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: 'static> PlotSurface for HeadlessSurface<F> {
    type Fig = F;

    fn show(
        &mut self,
        mut fig: F,
        interval: Duration,
        tick: &mut dyn FnMut(&mut F) -> TickOutcome,
    ) -> SurfaceExit {
        loop {
            match tick(&mut fig) {
                TickOutcome::Stop => return SurfaceExit::Stopped,
                TickOutcome::Redraw => {
                    let drawn = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(max) = self.max_frames {
                        if drawn >= max {
                            return SurfaceExit::Closed;
                        }
                    }
                }
                TickOutcome::Idle => {}
            }
            thread::sleep(interval);
        }
    }
}
