//! Data monitor - lifecycle orchestration for the render worker
//!
//! [`DataMonitor`] is the producer-side handle: it owns the worker's
//! lifecycle (spawn, readiness, stop, cleanup) and exposes a write-only
//! data path into the shared slot. The producer never blocks on
//! rendering - publishing a sample is fire-and-forget.
//!
//! Dropping a monitor stops the worker, so the usual pattern is to let
//! scope do the cleanup:
//!
//! ```no_run
//! use plotmon::{DataMonitor, HeadlessSurface, LinePolicy};
//!
//! let mut monitor = DataMonitor::new(LinePolicy::new(), HeadlessSurface::new());
//! monitor.start()?;
//! for i in 0..100 {
//!     monitor.set_data(&[i as f64, (i as f64).sin()])?;
//! }
//! // worker is stopped and joined when `monitor` goes out of scope
//! # Ok::<(), plotmon::MonitorError>(())
//! ```

mod worker;

use std::time::Duration;

use thiserror::Error;

use crate::policy::PlotPolicy;
use crate::sample::{Sample, ShapeError};
use crate::slot::SampleSlot;
use crate::surface::PlotSurface;
use worker::{RenderWorker, WorkerMain};

/// Lifecycle and configuration errors raised synchronously to the caller
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("monitor is already running")]
    AlreadyStarted,

    #[error("monitor has not been started")]
    NotStarted,

    #[error("monitor has already been stopped")]
    Stopped,

    #[error("invalid monitor configuration: {0}")]
    Config(String),

    #[error("failed to spawn render worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("render worker did not report ready within {0:?}")]
    SpawnTimeout(Duration),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Where the monitor is in its lifecycle
///
/// Owned solely by the monitor; transitions happen only in `start()` and
/// `stop()`. One monitor drives one worker lifetime - there is no restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    NotStarted,
    Running,
    Stopping,
    Stopped,
}

/// How the render worker ended - a status, not an error
///
/// A worker that exited on its own (window closed, draw state broken at
/// startup) is a normal end state for an interactive display, so `stop()`
/// reports it instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopOutcome {
    /// `stop()` was called on a monitor that never started
    NeverStarted,
    /// The worker left its loop when asked
    Clean,
    /// The surface had already ended on its own
    WindowClosed,
    /// Figure construction failed; the worker exited at startup
    StartupFailed,
    /// The worker thread panicked
    Panicked,
    /// The worker ignored the stop request within the grace period and
    /// was detached
    Unresponsive,
}

/// Monitor timing configuration
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    /// Nominal delay between render ticks
    pub interval: Duration,
    /// How long `start()` waits for the worker's readiness handshake
    pub spawn_timeout: Duration,
    /// Grace period `stop()` gives the worker before detaching it
    pub stop_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            spawn_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(2),
        }
    }
}

impl MonitorConfig {
    /// Config with a custom tick interval in milliseconds.
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), MonitorError> {
        if self.interval.is_zero() {
            return Err(MonitorError::Config(
                "tick interval must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Producer-side handle: owns the worker lifecycle, publishes samples
pub struct DataMonitor {
    config: MonitorConfig,
    state: MonitorState,
    main: Option<WorkerMain>,
    slot: Option<SampleSlot>,
    worker: Option<RenderWorker>,
    outcome: Option<StopOutcome>,
}

impl DataMonitor {
    /// Pair a policy with a surface under the default configuration.
    pub fn new<P, S>(policy: P, surface: S) -> Self
    where
        P: PlotPolicy,
        S: PlotSurface<Fig = P::Fig>,
    {
        Self::build(policy, surface, MonitorConfig::default())
    }

    /// Pair a policy with a surface under a custom configuration.
    pub fn with_config<P, S>(
        policy: P,
        surface: S,
        config: MonitorConfig,
    ) -> Result<Self, MonitorError>
    where
        P: PlotPolicy,
        S: PlotSurface<Fig = P::Fig>,
    {
        config.validate()?;
        Ok(Self::build(policy, surface, config))
    }

    fn build<P, S>(policy: P, surface: S, config: MonitorConfig) -> Self
    where
        P: PlotPolicy,
        S: PlotSurface<Fig = P::Fig>,
    {
        // Type-erase here so the monitor itself stays non-generic; the
        // figure type never leaves the worker.
        let main = worker::erase(policy, surface, config.interval);
        Self {
            config,
            state: MonitorState::NotStarted,
            main: Some(main),
            slot: None,
            worker: None,
            outcome: None,
        }
    }

    /// Spawn the render worker and wait until it confirms it is alive.
    ///
    /// "Alive" is not "rendering": the plotting backend starts up
    /// asynchronously inside the worker after this returns.
    pub fn start(&mut self) -> Result<(), MonitorError> {
        match self.state {
            MonitorState::NotStarted => {}
            MonitorState::Running | MonitorState::Stopping => {
                return Err(MonitorError::AlreadyStarted)
            }
            MonitorState::Stopped => return Err(MonitorError::Stopped),
        }

        let main = self.main.take().ok_or(MonitorError::Stopped)?;
        let slot = SampleSlot::new();
        let worker = RenderWorker::spawn(main, slot.clone(), self.config.spawn_timeout)?;

        self.slot = Some(slot);
        self.worker = Some(worker);
        self.state = MonitorState::Running;
        log::info!(
            "data monitor started (tick interval {:?})",
            self.config.interval
        );
        Ok(())
    }

    /// Publish a `(x, y1, ..., yN)` row to the render worker.
    ///
    /// Fire-and-forget: returns in bounded time no matter how slow the
    /// current render tick is. The first accepted row fixes the channel
    /// count; later rows must match it.
    pub fn set_data(&self, row: &[f64]) -> Result<(), MonitorError> {
        let slot = match self.state {
            MonitorState::Running => self
                .slot
                .as_ref()
                .ok_or(MonitorError::NotStarted)?,
            MonitorState::NotStarted => return Err(MonitorError::NotStarted),
            MonitorState::Stopping | MonitorState::Stopped => return Err(MonitorError::Stopped),
        };

        let sample = Sample::from_row(row)?;
        slot.write(sample)?;
        Ok(())
    }

    /// Ask the worker to terminate, join it, release the slot.
    ///
    /// Idempotent: repeated calls return the recorded outcome without side
    /// effects, and calling it when the worker already exited on its own
    /// completes without error.
    pub fn stop(&mut self) -> StopOutcome {
        if self.state != MonitorState::Running {
            return self.outcome.unwrap_or(StopOutcome::NeverStarted);
        }

        self.state = MonitorState::Stopping;
        let outcome = match self.worker.take() {
            Some(worker) => worker.stop(self.config.stop_timeout),
            None => StopOutcome::Clean,
        };

        // Drop our handle on the shared cell; once the worker thread ends
        // the allocation is freed.
        self.slot = None;
        self.state = MonitorState::Stopped;
        self.outcome = Some(outcome);
        log::info!("data monitor stopped ({:?})", outcome);
        outcome
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Best-effort liveness: started, not stopped, and the worker thread
    /// has not exited on its own (window close, startup failure, panic).
    pub fn is_running(&self) -> bool {
        self.state == MonitorState::Running
            && self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }
}

impl Drop for DataMonitor {
    fn drop(&mut self) {
        if self.state == MonitorState::Running {
            let outcome = self.stop();
            if outcome != StopOutcome::Clean {
                log::warn!("render worker ended with {:?} during drop", outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LinePolicy;
    use crate::surface::HeadlessSurface;

    #[test]
    fn test_zero_interval_is_a_config_error() {
        let config = MonitorConfig {
            interval: Duration::ZERO,
            ..MonitorConfig::default()
        };
        let err = DataMonitor::with_config(LinePolicy::new(), HeadlessSurface::new(), config)
            .err()
            .unwrap();
        assert!(matches!(err, MonitorError::Config(_)));
    }

    #[test]
    fn test_set_data_before_start() {
        let monitor = DataMonitor::new(LinePolicy::new(), HeadlessSurface::new());
        assert!(matches!(
            monitor.set_data(&[0.0, 1.0]),
            Err(MonitorError::NotStarted)
        ));
    }

    #[test]
    fn test_stop_without_start_is_a_no_op() {
        let mut monitor = DataMonitor::new(LinePolicy::new(), HeadlessSurface::new());
        assert_eq!(monitor.stop(), StopOutcome::NeverStarted);
        assert_eq!(monitor.state(), MonitorState::NotStarted);
    }
}
