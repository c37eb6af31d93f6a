//! Default line policy - N line series on a single axes
//!
//! Mirrors the classic "one trace per channel" monitor: each y channel of
//! the sample becomes a line series, sharing the sample's x value. The
//! policy keeps a bounded trailing window of recent points per series (the
//! core hands it only the latest sample; history is the policy's own
//! business), so a surface can draw a scrolling trace instead of a single
//! dot.

use ringbuf::{
    traits::{Consumer, Observer, RingBuffer},
    HeapRb,
};

use super::{PlotPolicy, PolicyError};
use crate::sample::Sample;

/// Default number of trailing points kept per series
pub const DEFAULT_WINDOW: usize = 512;

/// Per-channel presentation metadata
#[derive(Clone, Debug, Default)]
pub struct ChannelStyle {
    /// Legend label
    pub label: Option<String>,
    /// Line color as RGB
    pub color: Option<[u8; 3]>,
}

impl ChannelStyle {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            color: None,
        }
    }

    pub fn with_color(mut self, rgb: [u8; 3]) -> Self {
        self.color = Some(rgb);
        self
    }
}

/// Axes-level formatting
#[derive(Clone, Debug, Default)]
pub struct AxesStyle {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Fixed x range, or autoscale when `None`
    pub x_lim: Option<(f64, f64)>,
    /// Fixed y range, or autoscale when `None`
    pub y_lim: Option<(f64, f64)>,
}

/// One line series with its trailing point window
pub struct LineSeries {
    style: ChannelStyle,
    points: HeapRb<(f64, f64)>,
}

impl LineSeries {
    fn new(style: ChannelStyle, window: usize) -> Self {
        Self {
            style,
            points: HeapRb::new(window),
        }
    }

    fn push(&mut self, x: f64, y: f64) {
        // Overwrites the oldest point once the window is full
        self.points.push_overwrite((x, y));
    }

    /// Buffered points, oldest first
    pub fn points(&self) -> impl Iterator<Item = &(f64, f64)> + '_ {
        self.points.iter()
    }

    /// Most recent point, if any
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.points.iter().last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn style(&self) -> &ChannelStyle {
        &self.style
    }
}

/// Figure state built by [`LinePolicy::make_fig`]
///
/// Series are created lazily on the first drawn sample, since the channel
/// count is only known once data arrives.
pub struct LineFigure {
    axes: AxesStyle,
    series: Vec<LineSeries>,
}

impl LineFigure {
    fn new(axes: AxesStyle) -> Self {
        Self {
            axes,
            series: Vec::new(),
        }
    }

    pub fn axes(&self) -> &AxesStyle {
        &self.axes
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }
}

/// The default policy: one line per y channel, trailing window per line
pub struct LinePolicy {
    channels: Vec<ChannelStyle>,
    axes: AxesStyle,
    window: usize,
}

impl Default for LinePolicy {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            axes: AxesStyle::default(),
            window: DEFAULT_WINDOW,
        }
    }
}

impl LinePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set per-channel labels and colors, in channel order.
    ///
    /// Channels beyond the styled ones fall back to a default style.
    pub fn channels(mut self, channels: Vec<ChannelStyle>) -> Self {
        self.channels = channels;
        self
    }

    /// Set axes labels and limits.
    pub fn axes(mut self, axes: AxesStyle) -> Self {
        self.axes = axes;
        self
    }

    /// Set the trailing window size (points kept per series, >= 1).
    pub fn window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    fn style_for(&self, index: usize) -> ChannelStyle {
        self.channels.get(index).cloned().unwrap_or_default()
    }
}

impl PlotPolicy for LinePolicy {
    type Fig = LineFigure;

    fn make_fig(&mut self) -> Result<LineFigure, PolicyError> {
        Ok(LineFigure::new(self.axes.clone()))
    }

    fn ax_plot(&mut self, sample: &Sample, fig: &mut LineFigure) -> Result<(), PolicyError> {
        if fig.series.is_empty() {
            for i in 0..sample.channel_count() {
                fig.series.push(LineSeries::new(self.style_for(i), self.window));
            }
        } else if fig.series.len() != sample.channel_count() {
            // The slot already pins arity; this guards custom callers
            // driving the policy directly.
            return Err(PolicyError::ChannelCount {
                expected: fig.series.len(),
                got: sample.channel_count(),
            });
        }

        let x = sample.x();
        for (series, &y) in fig.series.iter_mut().zip(sample.channels()) {
            series.push(x, y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(row: &[f64]) -> Sample {
        Sample::from_row(row).unwrap()
    }

    #[test]
    fn test_series_created_from_first_sample() {
        let mut policy = LinePolicy::new().channels(vec![
            ChannelStyle::labeled("Channel 1"),
            ChannelStyle::labeled("Channel 2").with_color([255, 165, 0]),
        ]);
        let mut fig = policy.make_fig().unwrap();
        assert!(fig.series().is_empty());

        policy.ax_plot(&sample(&[0.0, 1.0, -1.0]), &mut fig).unwrap();
        assert_eq!(fig.series().len(), 2);
        assert_eq!(fig.series()[0].style().label.as_deref(), Some("Channel 1"));
        assert_eq!(fig.series()[1].style().color, Some([255, 165, 0]));
        assert_eq!(fig.series()[0].latest(), Some((0.0, 1.0)));
        assert_eq!(fig.series()[1].latest(), Some((0.0, -1.0)));
    }

    #[test]
    fn test_trailing_window_overwrites_oldest() {
        let mut policy = LinePolicy::new().window(3);
        let mut fig = policy.make_fig().unwrap();

        for i in 0..5 {
            let v = i as f64;
            policy.ax_plot(&sample(&[v, v * 10.0]), &mut fig).unwrap();
        }

        let points: Vec<_> = fig.series()[0].points().copied().collect();
        assert_eq!(points, vec![(2.0, 20.0), (3.0, 30.0), (4.0, 40.0)]);
    }

    #[test]
    fn test_channel_count_guard() {
        let mut policy = LinePolicy::new();
        let mut fig = policy.make_fig().unwrap();
        policy.ax_plot(&sample(&[0.0, 1.0]), &mut fig).unwrap();

        let err = policy.ax_plot(&sample(&[1.0, 1.0, 2.0]), &mut fig).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::ChannelCount {
                expected: 1,
                got: 2
            }
        ));
    }
}
