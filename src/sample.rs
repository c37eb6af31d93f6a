//! Sample value type - one time-series observation
//!
//! A sample is an ordered numeric tuple `(x, y1, ..., yN)`: one x value
//! followed by at least one y channel. The channel count is fixed by the
//! first sample a monitor accepts; later samples must match it (see
//! [`crate::slot::SampleSlot`]).

use std::sync::Arc;

use thiserror::Error;

/// Errors describing a malformed sample row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("a sample needs an x value and at least one channel, got {0} value(s)")]
    TooFewValues(usize),

    #[error("expected samples with {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

/// One observation: an x value plus N y channels
///
/// Samples are immutable and cheap to clone: the values live in a shared
/// allocation, so publishing a sample across threads never copies the data
/// and a reader always sees a whole value, never a partial update.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    values: Arc<[f64]>,
}

impl Sample {
    /// Build a sample from a `(x, y1, ..., yN)` row.
    ///
    /// Rows with fewer than two values (no channel to plot) are rejected.
    pub fn from_row(row: &[f64]) -> Result<Self, ShapeError> {
        if row.len() < 2 {
            return Err(ShapeError::TooFewValues(row.len()));
        }
        Ok(Self { values: row.into() })
    }

    /// The x value (first element of the row)
    pub fn x(&self) -> f64 {
        self.values[0]
    }

    /// The y channels (everything after x)
    pub fn channels(&self) -> &[f64] {
        &self.values[1..]
    }

    /// Number of y channels
    pub fn channel_count(&self) -> usize {
        self.values.len() - 1
    }

    /// Total tuple length, x included (always >= 2)
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// The full `(x, y1, ..., yN)` row
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = ShapeError;

    fn try_from(row: &[f64]) -> Result<Self, ShapeError> {
        Self::from_row(row)
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = ShapeError;

    fn try_from(row: Vec<f64>) -> Result<Self, ShapeError> {
        if row.len() < 2 {
            return Err(ShapeError::TooFewValues(row.len()));
        }
        Ok(Self { values: row.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row() {
        let sample = Sample::from_row(&[0.0, 1.5, -2.5]).unwrap();
        assert_eq!(sample.x(), 0.0);
        assert_eq!(sample.channels(), &[1.5, -2.5]);
        assert_eq!(sample.channel_count(), 2);
        assert_eq!(sample.arity(), 3);
    }

    #[test]
    fn test_rejects_short_rows() {
        assert_eq!(Sample::from_row(&[]), Err(ShapeError::TooFewValues(0)));
        assert_eq!(Sample::from_row(&[1.0]), Err(ShapeError::TooFewValues(1)));
    }

    #[test]
    fn test_clone_shares_values() {
        let sample = Sample::from_row(&[1.0, 2.0]).unwrap();
        let copy = sample.clone();
        assert_eq!(copy, sample);
        assert_eq!(copy.values(), &[1.0, 2.0]);
    }
}
