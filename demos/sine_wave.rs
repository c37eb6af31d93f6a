//! Noisy two-channel sine wave on a live monitor.
//!
//! The producer loop below stands in for any external data source; the
//! console surface stands in for a GUI backend and just prints the latest
//! point of each trace once per tick.
//!
//! Run with: `cargo run --example sine_wave`

use std::f64::consts::PI;
use std::thread;
use std::time::Duration;

use plotmon::{
    AxesStyle, ChannelStyle, DataMonitor, LineFigure, LinePolicy, MonitorConfig, PlotSurface,
    SurfaceExit, TickOutcome,
};

/// A "plot window" that renders to stdout.
struct ConsoleSurface;

impl PlotSurface for ConsoleSurface {
    type Fig = LineFigure;

    fn show(
        &mut self,
        mut fig: LineFigure,
        interval: Duration,
        tick: &mut dyn FnMut(&mut LineFigure) -> TickOutcome,
    ) -> SurfaceExit {
        loop {
            match tick(&mut fig) {
                TickOutcome::Stop => return SurfaceExit::Stopped,
                TickOutcome::Redraw => {
                    let mut line = String::new();
                    for series in fig.series() {
                        if let Some((x, y)) = series.latest() {
                            let label = series.style().label.as_deref().unwrap_or("y");
                            line.push_str(&format!("  {label}: ({x:.0}, {y:+.3})"));
                        }
                    }
                    println!("tick{line}");
                }
                TickOutcome::Idle => {}
            }
            thread::sleep(interval);
        }
    }
}

/// Small deterministic jitter so the traces look like real sensor data.
fn noise(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    ((*state >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 0.25
}

fn main() -> Result<(), plotmon::MonitorError> {
    env_logger::init();
    log::info!("starting sine wave demo");

    let policy = LinePolicy::new()
        .channels(vec![
            ChannelStyle::labeled("Channel 1"),
            ChannelStyle::labeled("Channel 2").with_color([255, 165, 0]),
        ])
        .axes(AxesStyle {
            x_label: Some("steps".into()),
            y_label: Some("values".into()),
            y_lim: Some((-2.5, 2.5)),
            ..AxesStyle::default()
        })
        .window(200);

    let mut monitor =
        DataMonitor::with_config(policy, ConsoleSurface, MonitorConfig::with_interval_ms(100))?;
    monitor.start()?;

    let mut rng = 0x5eed;
    for t in 0..150 {
        let x = t as f64;
        let y1 = (x * PI * 2.0 / 30.0).cos() + 1.0 + noise(&mut rng);
        let y2 = (x * PI * 2.0 / 30.0).sin() - 1.0 + noise(&mut rng);
        monitor.set_data(&[x, y1, y2])?;
        thread::sleep(Duration::from_millis(50));
    }

    monitor.stop();
    println!("done");
    Ok(())
}
