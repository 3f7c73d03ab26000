//! Timer scheduling behind a trait so playback can run on a virtual clock.
//!
//! The session never blocks on a timer. Instead it asks the scheduler which
//! timers are due up to a point in time and handles them one by one, which
//! keeps every state change inside a single event handler.

use std::collections::HashMap;

/// Opaque identifier of a started timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of periodic ticks and one-shot deadlines.
pub trait Scheduler {
    /// Current clock value in milliseconds.
    fn now_ms(&self) -> u64;

    /// Start a timer firing every `period_ms` until cancelled.
    fn start_periodic(&mut self, period_ms: u64) -> TimerHandle;

    /// Start a timer firing once, `delay_ms` from now.
    fn start_once(&mut self, delay_ms: u64) -> TimerHandle;

    /// Cancel a timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the fire time of the returned timer. When nothing is
    /// due the clock moves to `until_ms` and `None` is returned. Timers due at
    /// the same instant fire in the order they were started.
    fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle>;
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    period_ms: Option<u64>,
}

/// Manually driven clock.
///
/// Tests advance it in exact steps; the terminal front end advances it with
/// measured wall-clock time.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u64,
    timers: HashMap<TimerHandle, Pending>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not yet fired or cancelled) timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    fn start(&mut self, delay_ms: u64, period_ms: Option<u64>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            Pending {
                due_ms: self.now_ms + delay_ms,
                period_ms,
            },
        );
        handle
    }
}

impl Scheduler for VirtualScheduler {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn start_periodic(&mut self, period_ms: u64) -> TimerHandle {
        // a zero period would fire forever at the same instant
        let period_ms = period_ms.max(1);
        self.start(period_ms, Some(period_ms))
    }

    fn start_once(&mut self, delay_ms: u64) -> TimerHandle {
        self.start(delay_ms, None)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let next = self
            .timers
            .iter()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(h, p)| (p.due_ms, **h))
            .map(|(h, p)| (*h, *p));

        let Some((handle, pending)) = next else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        self.now_ms = self.now_ms.max(pending.due_ms);
        match pending.period_ms {
            Some(period) => {
                if let Some(p) = self.timers.get_mut(&handle) {
                    p.due_ms += period;
                }
            }
            None => {
                self.timers.remove(&handle);
            }
        }
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut s = VirtualScheduler::new();
        let h = s.start_once(50);
        assert_eq!(s.pop_due(49), None);
        assert_eq!(s.now_ms(), 49);
        assert_eq!(s.pop_due(100), Some(h));
        assert_eq!(s.now_ms(), 50);
        assert_eq!(s.pop_due(100), None);
        assert_eq!(s.now_ms(), 100);
        assert!(!s.is_active(h));
    }

    #[test]
    fn periodic_repeats_until_cancelled() {
        let mut s = VirtualScheduler::new();
        let h = s.start_periodic(100);
        let mut fired = Vec::new();
        while let Some(x) = s.pop_due(350) {
            fired.push((x, s.now_ms()));
        }
        assert_eq!(fired, vec![(h, 100), (h, 200), (h, 300)]);
        s.cancel(h);
        assert_eq!(s.pop_due(1_000), None);
        assert_eq!(s.active_timers(), 0);
    }

    #[test]
    fn same_instant_fires_in_start_order() {
        let mut s = VirtualScheduler::new();
        let tick = s.start_periodic(100);
        let once = s.start_once(100);
        assert_eq!(s.pop_due(100), Some(tick));
        assert_eq!(s.pop_due(100), Some(once));
        assert_eq!(s.pop_due(100), None);
    }

    #[test]
    fn cancel_unknown_handle_is_harmless() {
        let mut s = VirtualScheduler::new();
        let h = s.start_once(10);
        s.cancel(h);
        s.cancel(h);
        assert_eq!(s.pop_due(20), None);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut s = VirtualScheduler::new();
        s.pop_due(500);
        s.pop_due(100);
        assert_eq!(s.now_ms(), 500);
    }
}
