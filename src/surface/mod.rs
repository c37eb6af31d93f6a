//! Plot surface abstraction - the black-box rendering backend
//!
//! The monitor core never draws. It hands the figure to a [`PlotSurface`]
//! and supplies a tick callback; the surface owns the event loop, invokes
//! the callback on its own schedule (nominally every `interval`) and
//! repaints when asked. Any windowing/drawing framework can sit behind
//! this trait; the crate ships a windowless [`HeadlessSurface`] for tests
//! and headless producers.

mod headless;

pub use headless::HeadlessSurface;

use std::time::Duration;

/// What one tick of the render loop decided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to draw this tick (no sample yet, or a skipped frame)
    Idle,
    /// The figure changed; repaint it
    Redraw,
    /// Leave the event loop
    Stop,
}

/// Why the surface event loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceExit {
    /// The tick callback asked to stop
    Stopped,
    /// The surface ended on its own (window closed by the user)
    Closed,
}

/// A rendering backend capable of showing a figure and driving a
/// periodic animation callback
///
/// `show` blocks in the backend's own event loop until the callback
/// returns [`TickOutcome::Stop`] or the loop ends on its own. If a tick
/// takes longer than `interval`, the next tick is delayed or dropped per
/// the backend's timer semantics; that is accepted degradation, not an
/// error.
pub trait PlotSurface: Send + 'static {
    /// The figure type this surface can display
    type Fig;

    /// Run the event loop; call `tick` about every `interval`.
    fn show(
        &mut self,
        fig: Self::Fig,
        interval: Duration,
        tick: &mut dyn FnMut(&mut Self::Fig) -> TickOutcome,
    ) -> SurfaceExit;
}
