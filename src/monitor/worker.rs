//! Render worker - the isolated execution context that owns the plot
//!
//! The worker runs on its own named OS thread. It builds the figure once,
//! then blocks in the surface event loop; each tick it polls the shared
//! slot and folds the latest sample into the figure. Nothing rendered
//! ever crosses back to the producer - draw failures are logged and the
//! frame skipped, because there is no caller on the other side to catch
//! them.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{MonitorError, StopOutcome};
use crate::policy::PlotPolicy;
use crate::slot::SampleSlot;
use crate::surface::{PlotSurface, SurfaceExit, TickOutcome};

/// How the worker thread ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WorkerExit {
    /// Left the event loop because stop was requested
    Stopped,
    /// The surface ended on its own (window closed)
    Closed,
    /// Figure construction failed before the first tick
    Failed,
}

/// Type-erased worker entry point, built at monitor construction so the
/// monitor itself is not generic over policy and surface types
pub(crate) type WorkerMain =
    Box<dyn FnOnce(SampleSlot, Arc<AtomicBool>) -> WorkerExit + Send + 'static>;

/// Erase a policy/surface pair into a [`WorkerMain`].
pub(crate) fn erase<P, S>(policy: P, surface: S, interval: Duration) -> WorkerMain
where
    P: PlotPolicy,
    S: PlotSurface<Fig = P::Fig>,
{
    Box::new(move |slot, stop| render_loop(policy, surface, slot, stop, interval))
}

/// Build the figure, then drive the surface loop until told to stop.
fn render_loop<P, S>(
    mut policy: P,
    mut surface: S,
    slot: SampleSlot,
    stop: Arc<AtomicBool>,
    interval: Duration,
) -> WorkerExit
where
    P: PlotPolicy,
    S: PlotSurface<Fig = P::Fig>,
{
    let fig = match policy.make_fig() {
        Ok(fig) => fig,
        Err(e) => {
            log::error!("figure construction failed: {}", e);
            return WorkerExit::Failed;
        }
    };

    let exit = surface.show(fig, interval, &mut |fig| {
        if stop.load(Ordering::Acquire) {
            return TickOutcome::Stop;
        }

        // Clone the sample out and release the slot before drawing, so a
        // slow draw never holds up the producer.
        let Some(sample) = slot.read() else {
            return TickOutcome::Idle;
        };

        match catch_unwind(AssertUnwindSafe(|| policy.ax_plot(&sample, fig))) {
            Ok(Ok(())) => TickOutcome::Redraw,
            Ok(Err(e)) => {
                log::warn!("draw callback failed, skipping frame: {}", e);
                TickOutcome::Idle
            }
            Err(_) => {
                log::error!("draw callback panicked, skipping frame");
                TickOutcome::Idle
            }
        }
    });

    match exit {
        SurfaceExit::Stopped => WorkerExit::Stopped,
        SurfaceExit::Closed => {
            log::info!("plot surface closed, render worker exiting");
            WorkerExit::Closed
        }
    }
}

/// Handle to the spawned worker thread
pub(crate) struct RenderWorker {
    handle: Option<JoinHandle<WorkerExit>>,
    stop: Arc<AtomicBool>,
}

impl RenderWorker {
    /// Spawn the worker and wait for its readiness handshake.
    ///
    /// Readiness means "the thread is alive", not "the backend is
    /// rendering" - figure construction happens asynchronously after this
    /// returns.
    pub(crate) fn spawn(
        main: WorkerMain,
        slot: SampleSlot,
        spawn_timeout: Duration,
    ) -> Result<Self, MonitorError> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_worker = Arc::clone(&stop);
        let (ready_tx, ready_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("plotmon-render".into())
            .spawn(move || {
                let _ = ready_tx.send(());
                main(slot, stop_for_worker)
            })?;

        match ready_rx.recv_timeout(spawn_timeout) {
            Ok(()) => Ok(Self {
                handle: Some(handle),
                stop,
            }),
            Err(_) => {
                // Thread never came up; ask it to stop in case it is stuck
                // mid-startup and abandon the handle.
                stop.store(true, Ordering::Release);
                Err(MonitorError::SpawnTimeout(spawn_timeout))
            }
        }
    }

    /// Whether the worker thread has already exited on its own.
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Request termination and join within `grace`, detaching on timeout.
    ///
    /// Safe to call when the worker already exited on its own; that is a
    /// normal end state for an interactive display.
    pub(crate) fn stop(mut self, grace: Duration) -> StopOutcome {
        self.stop.store(true, Ordering::Release);

        let Some(handle) = self.handle.take() else {
            return StopOutcome::Clean;
        };

        let deadline = Instant::now() + grace;
        let poll = Duration::from_millis(10).min(grace);
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(poll);
        }

        if !handle.is_finished() {
            // Threads cannot be killed; leave it to exit on its own and
            // report the degraded teardown.
            log::warn!(
                "render worker ignored stop request for {:?}, detaching",
                grace
            );
            return StopOutcome::Unresponsive;
        }

        match handle.join() {
            Ok(WorkerExit::Stopped) => StopOutcome::Clean,
            Ok(WorkerExit::Closed) => StopOutcome::WindowClosed,
            Ok(WorkerExit::Failed) => StopOutcome::StartupFailed,
            Err(_) => {
                log::error!("render worker thread panicked");
                StopOutcome::Panicked
            }
        }
    }
}
