//! Animation clock — a free-running timer thread advancing the shared
//! bob phase.
//!
//! RULES:
//!   - The thread mutates exactly one word: the phase, stored as f64 bits
//!     in an AtomicU64. Readers never lock and never see a torn value.
//!   - stop() joins the thread, so once it returns the phase is frozen.
//!   - The phase is cosmetic. Nothing downstream may derive logic from it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One clock tick. Wraps by explicit reset to 0° on reaching 360°, so any
/// sub-step overshoot is discarded rather than carried forward. With the
/// default 5° step the overshoot is always zero; with a step that does not
/// divide 360 this drifts slightly, which is acceptable for a bob effect.
pub fn advance_phase(phase: f64, step: f64) -> f64 {
    let next = phase + step;
    if next >= 360.0 {
        0.0
    } else {
        next
    }
}

pub struct AnimationClock {
    phase_bits: Arc<AtomicU64>,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationClock {
    /// Spawn the timer thread and start ticking immediately.
    pub fn start(period: Duration, step_degrees: f64) -> Self {
        let phase_bits = Arc::new(AtomicU64::new(0.0f64.to_bits()));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_bits = Arc::clone(&phase_bits);

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                // Stop signal, or the clock handle was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    let phase = f64::from_bits(thread_bits.load(Ordering::Relaxed));
                    let next = advance_phase(phase, step_degrees);
                    thread_bits.store(next.to_bits(), Ordering::Relaxed);
                }
            }
        });

        Self {
            phase_bits,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Current phase in degrees, always in [0, 360).
    pub fn phase_degrees(&self) -> f64 {
        f64::from_bits(self.phase_bits.load(Ordering::Relaxed))
    }

    /// Halt the timer thread. Idempotent. Joins, so no tick can land after
    /// this returns.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // Wakes the thread out of its recv_timeout immediately.
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AnimationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_by_fixed_amount() {
        assert_eq!(advance_phase(0.0, 5.0), 5.0);
        assert_eq!(advance_phase(90.0, 5.0), 95.0);
    }

    #[test]
    fn advance_resets_to_zero_at_wrap() {
        // 355 + 5 reaches 360 exactly and resets.
        assert_eq!(advance_phase(355.0, 5.0), 0.0);
        // Overshoot past 360 is discarded, not preserved as a remainder.
        assert_eq!(advance_phase(357.0, 5.0), 0.0);
    }

    #[test]
    fn phase_stays_in_range_over_many_ticks() {
        let mut phase = 0.0;
        for _ in 0..10_000 {
            phase = advance_phase(phase, 5.0);
            assert!((0.0..360.0).contains(&phase), "phase out of range: {phase}");
        }
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut phase = 0.0;
        for _ in 0..72 {
            phase = advance_phase(phase, 5.0);
        }
        assert_eq!(phase, 0.0);
    }
}
