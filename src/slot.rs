//! Shared sample slot - last-write-wins handoff cell
//!
//! This is the only state shared between the producer and the render
//! worker. It holds at most one sample: writes replace the previous value
//! unconditionally, reads return the most recent fully-written sample.
//! There is no queue and no history - for a live display, staleness beats
//! backlog, so intermediate samples are allowed to be dropped.
//!
//! The cell swaps whole immutable [`Sample`] values under a short lock, so
//! a reader can never observe a torn or half-updated sample, and neither
//! side ever blocks for longer than a pointer-sized swap.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::sample::{Sample, ShapeError};

/// Arity value meaning "no sample accepted yet"
const ARITY_UNSET: usize = 0;

/// Cloneable handle to the single-value handoff cell
///
/// Each side of the handoff keeps its own clone; the underlying cell is
/// freed once the last clone is dropped.
pub struct SampleSlot {
    inner: Arc<SlotInner>,
}

struct SlotInner {
    cell: Mutex<Option<Sample>>,
    /// Tuple length pinned by the first accepted write
    arity: AtomicUsize,
}

impl SampleSlot {
    /// Create an empty slot with no pinned arity.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SlotInner {
                cell: Mutex::new(None),
                arity: AtomicUsize::new(ARITY_UNSET),
            }),
        }
    }

    /// Publish a sample, replacing whatever was there before.
    ///
    /// The first accepted sample pins the arity for the lifetime of the
    /// slot; a later sample with a different arity is rejected and the
    /// slot keeps its previous value.
    pub fn write(&self, sample: Sample) -> Result<(), ShapeError> {
        let arity = sample.arity();
        match self.inner.arity.compare_exchange(
            ARITY_UNSET,
            arity,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {}
            Err(pinned) if pinned == arity => {}
            Err(pinned) => {
                return Err(ShapeError::ArityMismatch {
                    expected: pinned,
                    got: arity,
                })
            }
        }

        *self.inner.cell.lock().unwrap() = Some(sample);
        Ok(())
    }

    /// Read the most recent fully-written sample, if any.
    ///
    /// Non-blocking in practice: the critical section on either side is a
    /// single value swap or clone, never a draw or a render tick.
    pub fn read(&self) -> Option<Sample> {
        self.inner.cell.lock().unwrap().clone()
    }

    /// Arity pinned by the first accepted write, if any
    pub fn arity(&self) -> Option<usize> {
        match self.inner.arity.load(Ordering::Acquire) {
            ARITY_UNSET => None,
            arity => Some(arity),
        }
    }
}

impl Clone for SampleSlot {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(row: &[f64]) -> Sample {
        Sample::from_row(row).unwrap()
    }

    #[test]
    fn test_empty_reads_none() {
        let slot = SampleSlot::new();
        assert!(slot.read().is_none());
        assert_eq!(slot.arity(), None);
    }

    #[test]
    fn test_latest_write_wins() {
        let slot = SampleSlot::new();
        slot.write(sample(&[0.0, 1.0])).unwrap();
        slot.write(sample(&[1.0, 2.0])).unwrap();
        slot.write(sample(&[2.0, 3.0])).unwrap();

        let seen = slot.read().unwrap();
        assert_eq!(seen.values(), &[2.0, 3.0]);
    }

    #[test]
    fn test_arity_pinned_by_first_write() {
        let slot = SampleSlot::new();
        slot.write(sample(&[0.0, 1.0, 2.0])).unwrap();
        assert_eq!(slot.arity(), Some(3));

        let err = slot.write(sample(&[1.0, 1.0])).unwrap_err();
        assert_eq!(
            err,
            ShapeError::ArityMismatch {
                expected: 3,
                got: 2
            }
        );

        // Rejected write must not disturb the stored value
        let seen = slot.read().unwrap();
        assert_eq!(seen.values(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_concurrent_reads_never_tear() {
        use std::thread;

        let slot = SampleSlot::new();
        let writer = slot.clone();

        let handle = thread::spawn(move || {
            for i in 0..2000 {
                let v = i as f64;
                writer.write(sample(&[v, v])).unwrap();
            }
        });

        // Whole-value publication: x and y always agree
        for _ in 0..2000 {
            if let Some(s) = slot.read() {
                assert_eq!(s.x(), s.channels()[0]);
            }
        }

        handle.join().unwrap();
    }
}
