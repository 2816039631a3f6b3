//! Tick sources for running the cast outside a Bevy schedule.
//!
//! A [`TickSource`] blocks until the next frame is due and reports whether
//! the caller should keep going. Cancellation goes through a shared
//! [`CancelHandle`] that can be flipped from any thread; sources observe it
//! between ticks only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::CastError;

/// Shared flag that stops a tick source.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that no further ticks be issued.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Source of frame ticks.
pub trait TickSource {
    /// Waits for the next tick.
    ///
    /// Returns `false` once the source is exhausted or cancelled.
    fn request_tick(&mut self) -> bool;

    /// Handle that cancels this source.
    fn cancel_handle(&self) -> CancelHandle;
}

/// Wall-clock ticker sleeping between fixed-period ticks.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    next_due: Option<Instant>,
    limit: Option<u64>,
    issued: u64,
    cancel: CancelHandle,
}

impl IntervalTicker {
    /// Creates a ticker firing `hz` times per second.
    ///
    /// # Errors
    /// Returns [`CastError::InvalidTickRate`] unless `hz` is positive and
    /// finite.
    pub fn from_hz(hz: f64) -> Result<Self, CastError> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(CastError::InvalidTickRate { hz });
        }
        let period = Duration::try_from_secs_f64(hz.recip())
            .map_err(|_| CastError::InvalidTickRate { hz })?;
        Ok(Self {
            period,
            next_due: None,
            limit: None,
            issued: 0,
            cancel: CancelHandle::new(),
        })
    }

    /// Stops after `ticks` ticks.
    #[must_use]
    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.limit = Some(ticks);
        self
    }

    /// Time between ticks.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Ticks issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.issued >= limit)
    }
}

impl TickSource for IntervalTicker {
    fn request_tick(&mut self) -> bool {
        if self.cancel.is_cancelled() || self.exhausted() {
            return false;
        }
        let now = Instant::now();
        let due = self.next_due.unwrap_or(now);
        if due > now {
            thread::sleep(due - now);
        }
        if self.cancel.is_cancelled() {
            return false;
        }
        // Late ticks reschedule from now rather than bursting to catch up.
        self.next_due = Some(due.max(Instant::now()) + self.period);
        self.issued += 1;
        true
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

/// Ticker that fires a fixed number of times without waiting.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    remaining: u64,
    cancel: CancelHandle,
}

impl ManualTicker {
    /// Creates a ticker that fires `ticks` times.
    #[must_use]
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: ticks,
            cancel: CancelHandle::new(),
        }
    }

    /// Ticks still available.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSource for ManualTicker {
    fn request_tick(&mut self) -> bool {
        if self.cancel.is_cancelled() || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

/// Calls `on_tick` for every tick `source` issues and returns the count.
pub fn drive(source: &mut dyn TickSource, mut on_tick: impl FnMut()) -> u64 {
    let mut ticks = 0_u64;
    while source.request_tick() {
        on_tick();
        ticks += 1;
    }
    debug!("tick source stopped after {ticks} ticks");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn manual_ticker_counts_down() {
        let mut ticker = ManualTicker::new(3);
        let mut seen = 0;
        assert_eq!(drive(&mut ticker, || seen += 1), 3);
        assert_eq!(seen, 3);
        assert_eq!(ticker.remaining(), 0);
        assert!(!ticker.request_tick());
    }

    #[test]
    fn cancel_stops_between_ticks() {
        let mut ticker = ManualTicker::new(10);
        let handle = ticker.cancel_handle();
        let mut seen = 0;
        let ticks = drive(&mut ticker, || {
            seen += 1;
            if seen == 4 {
                handle.cancel();
            }
        });
        assert_eq!(ticks, 4);
        assert_eq!(ticker.remaining(), 6);
    }

    #[test]
    fn interval_ticker_honours_limit() {
        let mut ticker = IntervalTicker::from_hz(1_000.0).unwrap().with_limit(5);
        let started = Instant::now();
        assert_eq!(drive(&mut ticker, || {}), 5);
        assert_eq!(ticker.issued(), 5);
        assert!(started.elapsed() >= ticker.period() * 4);
    }

    #[test]
    fn interval_ticker_cancels_from_another_thread() {
        let mut ticker = IntervalTicker::from_hz(200.0).unwrap();
        let handle = ticker.cancel_handle();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            handle.cancel();
        });
        let ticks = drive(&mut ticker, || {});
        canceller.join().unwrap();
        assert!(ticks > 0);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-60.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_bad_rates(#[case] hz: f64) {
        assert!(matches!(
            IntervalTicker::from_hz(hz),
            Err(CastError::InvalidTickRate { .. })
        ));
    }
}
