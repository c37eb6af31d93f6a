//! plotmon - live monitoring of externally produced data
//!
//! A producer loop publishes time-series samples (`(x, y1, ..., yN)` rows)
//! while a background render worker polls the latest one on a fixed
//! cadence and redraws a plot. The producer never blocks on rendering.
//!
//! ## How it works
//!
//! - [`DataMonitor`] owns the lifecycle: it spawns the render worker,
//!   exposes a write-only data path, and tears everything down on `stop()`
//!   or drop.
//! - [`SampleSlot`] is the only shared state: a last-write-wins cell
//!   holding the most recent [`Sample`]. No queue, no history - for a live
//!   display, staleness beats backlog.
//! - A [`PlotPolicy`] decides what is drawn ([`LinePolicy`] by default);
//!   a [`PlotSurface`] decides how and where ([`HeadlessSurface`] ships
//!   for tests and headless use, GUI backends are the caller's business).
//!
//! ```no_run
//! use plotmon::{DataMonitor, HeadlessSurface, LinePolicy};
//!
//! let mut monitor = DataMonitor::new(LinePolicy::new(), HeadlessSurface::new());
//! monitor.start()?;
//! for t in 0..150 {
//!     let x = t as f64;
//!     monitor.set_data(&[x, (x * 0.2).cos(), (x * 0.2).sin()])?;
//!     std::thread::sleep(std::time::Duration::from_millis(10));
//! }
//! monitor.stop();
//! # Ok::<(), plotmon::MonitorError>(())
//! ```

mod monitor;
pub mod policy;
mod sample;
mod slot;
pub mod surface;

pub use monitor::{DataMonitor, MonitorConfig, MonitorError, MonitorState, StopOutcome};
pub use policy::{
    from_fns, AxesStyle, ChannelStyle, FnPolicy, LineFigure, LinePolicy, LineSeries, PlotPolicy,
    PolicyError,
};
pub use sample::{Sample, ShapeError};
pub use slot::SampleSlot;
pub use surface::{HeadlessSurface, PlotSurface, SurfaceExit, TickOutcome};
