//! Admission control for record emission.
//!
//! [`BurstLimiter`] decides, for every emission attempt, how long the caller
//! has to wait. Two independent rules apply:
//!
//! - a duty cycle ([`BurstSchedule`]) alternating between a *bursting*
//!   window, during which records may flow, and a *sleeping* window, during
//!   which nothing is emitted;
//! - a steady cap: while bursting, consecutive emissions are at least
//!   `1 / rate` seconds apart.
//!
//! ```text
//!  phase:   |<-- generate -->|<-- sleep -->|<-- generate -->| ...
//!           | Bursting       | Sleeping    | Bursting       |
//!  emits:   x   x   x   x    |             x   x   x   x    |
//!               ^ gaps >= 1/rate
//! ```
//!
//! The sleeping window always starts where the bursting window ended, not at
//! the instant of the attempt that noticed it. An attempt that arrives after
//! the sleeping window is already over starts a fresh bursting window at the
//! attempt instant.
//!
//! The limiter is single-owner: [`BurstLimiter::wait_time`] takes `&mut self`
//! and is a pure function of the supplied instant, which makes it testable
//! without a clock. [`BurstLimiter::acquire`] performs the wait on the tokio
//! timer and can be interrupted through a [`CancellationToken`].

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Upper bound for the gap between emissions under a steady cap.
pub const MAX_INTERVAL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Lengths of the two windows of the duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSchedule {
    pub generate: Duration,
    pub sleep: Duration,
}

impl BurstSchedule {
    /// Returns `None` when either window is zero, which disables bursting.
    pub fn new(generate: Duration, sleep: Duration) -> Option<Self> {
        if generate.is_zero() || sleep.is_zero() {
            None
        } else {
            Some(Self { generate, sleep })
        }
    }
}

/// Current window of the duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bursting,
    Sleeping,
}

/// Returned by [`BurstLimiter::acquire`] when the wait was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Wait for emission slot was cancelled")]
pub struct Cancelled;

/// Burst/sleep duty cycle with an optional steady rate cap.
#[derive(Debug)]
pub struct BurstLimiter {
    interval: Option<Duration>,
    schedule: Option<BurstSchedule>,
    phase: Phase,
    phase_start: Instant,
    last_emit: Option<Instant>,
}

impl BurstLimiter {
    /// Create a limiter whose first bursting window starts now.
    ///
    /// A `rate` that is zero, negative or not finite disables the steady cap.
    /// A positive rate too small to express as an interval is capped at
    /// [`MAX_INTERVAL`].
    pub fn new(rate: f64, schedule: Option<BurstSchedule>) -> Self {
        Self::starting_at(rate, schedule, Instant::now())
    }

    /// Create a limiter whose first bursting window starts at `start`.
    pub fn starting_at(rate: f64, schedule: Option<BurstSchedule>, start: Instant) -> Self {
        let interval = if rate.is_finite() && rate > 0.0 {
            let interval = Duration::try_from_secs_f64(1.0 / rate).unwrap_or(MAX_INTERVAL);
            Some(interval.min(MAX_INTERVAL))
        } else {
            None
        };
        Self {
            interval,
            schedule,
            phase: Phase::Bursting,
            phase_start: start,
            last_emit: None,
        }
    }

    /// Phase of the duty cycle as of the latest attempt. An attempt told to
    /// wait out the sleeping window leaves the limiter in [`Phase::Sleeping`]
    /// until an attempt arrives at or after the end of that window.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schedule(&self) -> Option<BurstSchedule> {
        self.schedule
    }

    /// Minimum gap between emissions, if a steady cap is configured.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Compute how long an attempt made at `now` must wait, and reserve the
    /// emission slot at `now + wait`.
    ///
    /// A reservation that lies in the future of `now` was not honored (its
    /// wait was cancelled). It is handed to this attempt, which only waits
    /// for the remainder.
    pub fn wait_time(&mut self, now: Instant) -> Duration {
        if let Some(schedule) = self.schedule {
            if self.phase == Phase::Bursting {
                let burst_end = self.phase_start + schedule.generate;
                if now >= burst_end {
                    debug!("Burst window over, sleeping for {:?}", schedule.sleep);
                    self.phase = Phase::Sleeping;
                    self.phase_start = burst_end;
                }
            }

            if self.phase == Phase::Sleeping {
                let sleep_end = self.phase_start + schedule.sleep;
                if now < sleep_end {
                    self.last_emit = Some(sleep_end);
                    return sleep_end - now;
                }
                self.phase = Phase::Bursting;
                // A slot reserved at the end of the sleep opened the new burst
                if self.last_emit.is_some_and(|last| last >= sleep_end) {
                    self.phase_start = sleep_end;
                } else {
                    debug!("Sleep window already over, starting a new burst");
                    self.phase_start = now;
                }
            }
        }

        match self.last_emit {
            Some(last) if last > now => last - now,
            Some(last) => {
                let wait = (last + self.interval.unwrap_or_default()).saturating_duration_since(now);
                self.last_emit = Some(now + wait);
                wait
            }
            None => {
                self.last_emit = Some(now);
                Duration::ZERO
            }
        }
    }

    /// Wait for the next emission slot.
    ///
    /// Returns the time spent waiting. When `cancel` fires first the wait is
    /// abandoned and [`Cancelled`] is returned. The next call then only waits
    /// for whatever is left of the abandoned wait.
    pub async fn acquire(&mut self, cancel: &CancellationToken) -> Result<Duration, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let wait = self.wait_time(Instant::now());
        if wait.is_zero() {
            return Ok(wait);
        }

        debug!("Waiting {:?} for next emission slot", wait);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Cancelled),
            _ = tokio::time::sleep(wait) => Ok(wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn schedule(generate: u64, sleep: u64) -> Option<BurstSchedule> {
        BurstSchedule::new(ms(generate), ms(sleep))
    }

    #[test]
    fn test_schedule_disabled_by_zero_window() {
        assert!(BurstSchedule::new(ms(100), Duration::ZERO).is_none());
        assert!(BurstSchedule::new(Duration::ZERO, ms(100)).is_none());
        assert!(schedule(150, 100).is_some());
    }

    #[test]
    fn test_no_limits_never_waits() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(0.0, None, start);
        for _ in 0..10 {
            assert_eq!(limiter.wait_time(start), Duration::ZERO);
        }
        assert_eq!(limiter.interval(), None);
        assert_eq!(limiter.schedule(), None);
    }

    #[test]
    fn test_invalid_rates_disable_cap() {
        for rate in [-1.0, f64::NAN, f64::INFINITY] {
            let limiter = BurstLimiter::new(rate, None);
            assert_eq!(limiter.interval(), None, "rate {rate}");
        }
    }

    #[test]
    fn test_tiny_rate_keeps_cap() {
        for rate in [1e-320, 1e-12] {
            let start = Instant::now();
            let mut limiter = BurstLimiter::starting_at(rate, None, start);
            assert_eq!(limiter.interval(), Some(MAX_INTERVAL), "rate {rate}");

            assert_eq!(limiter.wait_time(start), Duration::ZERO);
            assert_eq!(limiter.wait_time(start), MAX_INTERVAL);
        }
    }

    #[test]
    fn test_steady_rate_spacing() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(20.0, None, start);

        assert_eq!(limiter.wait_time(start), Duration::ZERO);
        assert_eq!(limiter.wait_time(start), ms(50));
        // Reservation at 50ms, attempt at 80ms
        assert_eq!(limiter.wait_time(start + ms(80)), ms(20));
        // Long idle gap
        assert_eq!(limiter.wait_time(start + ms(500)), Duration::ZERO);
    }

    #[test]
    fn test_burst_then_sleep() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(0.0, schedule(150, 100), start);
        assert_eq!(limiter.schedule(), schedule(150, 100));

        assert_eq!(limiter.wait_time(start), Duration::ZERO);
        assert_eq!(limiter.phase(), Phase::Bursting);

        // Sleep window runs from 150ms to 250ms
        assert_eq!(limiter.wait_time(start + ms(160)), ms(90));
        assert_eq!(limiter.phase(), Phase::Sleeping);

        assert_eq!(limiter.wait_time(start + ms(260)), Duration::ZERO);
        assert_eq!(limiter.phase(), Phase::Bursting);
    }

    #[test]
    fn test_retry_after_cancelled_sleep_waits_remainder() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(20.0, schedule(150, 100), start);

        assert_eq!(limiter.wait_time(start), Duration::ZERO);
        // Sleep window runs from 150ms to 250ms, the wait is abandoned
        assert_eq!(limiter.wait_time(start + ms(160)), ms(90));
        assert_eq!(limiter.wait_time(start + ms(170)), ms(80));
        assert_eq!(limiter.phase(), Phase::Sleeping);

        // Retry emitted at 250ms, which opened the new burst
        assert_eq!(limiter.wait_time(start + ms(250)), ms(50));
        assert_eq!(limiter.phase(), Phase::Bursting);
        // Burst ends at 400ms
        assert_eq!(limiter.wait_time(start + ms(410)), ms(90));
    }

    #[test]
    fn test_retry_after_cancelled_steady_wait() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(20.0, None, start);

        assert_eq!(limiter.wait_time(start), Duration::ZERO);
        assert_eq!(limiter.wait_time(start), ms(50));
        // Wait abandoned, retried 10ms later
        assert_eq!(limiter.wait_time(start + ms(10)), ms(40));
        assert_eq!(limiter.wait_time(start + ms(50)), ms(50));
    }

    #[test]
    fn test_attempt_after_whole_sleep_window() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(0.0, schedule(150, 100), start);

        assert_eq!(limiter.wait_time(start), Duration::ZERO);
        assert_eq!(limiter.wait_time(start + ms(260)), Duration::ZERO);

        // New burst started at 260ms, so 400ms is still inside it
        assert_eq!(limiter.wait_time(start + ms(400)), Duration::ZERO);
        // Burst ends at 410ms, sleep until 510ms
        assert_eq!(limiter.wait_time(start + ms(420)), ms(90));
    }

    #[test]
    fn test_burst_with_steady_cap() {
        let start = Instant::now();
        let mut limiter = BurstLimiter::starting_at(20.0, schedule(150, 100), start);

        let mut now = start;
        let mut attempt = |limiter: &mut BurstLimiter, idle: u64| {
            now += ms(idle);
            let wait = limiter.wait_time(now);
            now += wait;
            wait
        };

        assert_eq!(attempt(&mut limiter, 0), Duration::ZERO);
        assert_eq!(attempt(&mut limiter, 0), ms(50));
        assert_eq!(attempt(&mut limiter, 50), Duration::ZERO);
        assert_eq!(attempt(&mut limiter, 25), ms(25));
        // 150ms: burst over, sleep until 250ms
        assert_eq!(attempt(&mut limiter, 0), ms(100));
        assert_eq!(attempt(&mut limiter, 0), ms(50));
        // 450ms: burst ended at 400ms, sleep until 500ms
        assert_eq!(attempt(&mut limiter, 150), ms(50));
    }
}
