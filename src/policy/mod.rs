//! Plot policy - injected figure construction and per-frame draw logic
//!
//! The monitor core does not know what is being plotted. A [`PlotPolicy`]
//! supplies the two halves of that knowledge:
//!
//! - `make_fig` builds the figure/axes state once, inside the render
//!   worker, before the first tick;
//! - `ax_plot` consumes one sample and mutates that state so the surface
//!   can redraw it.
//!
//! Policies can be written as a type implementing the trait, or as a pair
//! of closures via [`from_fns`]. The default N-channel line policy lives in
//! [`line`].

mod line;

pub use line::{AxesStyle, ChannelStyle, LineFigure, LinePolicy, LineSeries};

use std::marker::PhantomData;

use thiserror::Error;

use crate::sample::Sample;

/// Errors raised by a plot policy
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to build figure: {0}")]
    Figure(String),

    #[error("failed to draw sample: {0}")]
    Draw(String),

    #[error("sample has {got} channels but the figure was built for {expected}")]
    ChannelCount { expected: usize, got: usize },
}

/// What to draw and how to draw it
///
/// The policy is moved into the render worker at start; the figure state it
/// builds lives entirely inside the worker and never crosses back out.
/// `ax_plot` only ever sees the latest sample - a policy that wants history
/// must buffer it itself (as [`LinePolicy`] does with its trailing window).
pub trait PlotPolicy: Send + 'static {
    /// The figure/axes state mutated on each tick
    type Fig: 'static;

    /// Build the figure once, before the first tick.
    fn make_fig(&mut self) -> Result<Self::Fig, PolicyError>;

    /// Fold the latest sample into the figure.
    ///
    /// Called repeatedly, possibly with the same sample more than once.
    /// An error skips the current frame but keeps the worker alive.
    fn ax_plot(&mut self, sample: &Sample, fig: &mut Self::Fig) -> Result<(), PolicyError>;
}

/// A policy assembled from two closures
///
/// See [`from_fns`].
pub struct FnPolicy<F, M, A> {
    make_fig: M,
    ax_plot: A,
    _fig: PhantomData<fn() -> F>,
}

/// Build a [`PlotPolicy`] from a `make_fig` and an `ax_plot` closure.
pub fn from_fns<F, M, A>(make_fig: M, ax_plot: A) -> FnPolicy<F, M, A>
where
    F: 'static,
    M: FnMut() -> Result<F, PolicyError> + Send + 'static,
    A: FnMut(&Sample, &mut F) -> Result<(), PolicyError> + Send + 'static,
{
    FnPolicy {
        make_fig,
        ax_plot,
        _fig: PhantomData,
    }
}

impl<F, M, A> PlotPolicy for FnPolicy<F, M, A>
where
    F: 'static,
    M: FnMut() -> Result<F, PolicyError> + Send + 'static,
    A: FnMut(&Sample, &mut F) -> Result<(), PolicyError> + Send + 'static,
{
    type Fig = F;

    fn make_fig(&mut self) -> Result<F, PolicyError> {
        (self.make_fig)()
    }

    fn ax_plot(&mut self, sample: &Sample, fig: &mut F) -> Result<(), PolicyError> {
        (self.ax_plot)(sample, fig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_policy_round() {
        let mut policy = from_fns(
            || Ok(Vec::<f64>::new()),
            |sample, fig: &mut Vec<f64>| {
                fig.push(sample.x());
                Ok(())
            },
        );

        let mut fig = policy.make_fig().unwrap();
        let sample = Sample::from_row(&[3.0, 4.0]).unwrap();
        policy.ax_plot(&sample, &mut fig).unwrap();
        policy.ax_plot(&sample, &mut fig).unwrap();
        assert_eq!(fig, vec![3.0, 3.0]);
    }
}
