//! Playback modes and the cooldown cycle.
//!
//! `Playback` holds the mode and the cooldown as one tagged pair, so a
//! cooldown can only be active outside `Normal`. A cycle consists of a
//! periodic tick that counts the cooldown down and, in `AutoPlay`, a one-shot
//! deadline that asks the session to advance. Both timers are always
//! cancelled together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::BrowseError;
use crate::scheduler::{Scheduler, TimerHandle};

/// Default cooldown length.
pub const DEFAULT_COOLDOWN_MS: u64 = 10_000;

/// Default countdown tick period.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Mutually exclusive browsing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free navigation, no timers
    #[default]
    Normal,
    /// Each displayed entry locks navigation for one cooldown
    Timer,
    /// Like `Timer`, and the cursor advances on its own when the cooldown ends
    AutoPlay,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Timer => "timer",
            Mode::AutoPlay => "autoplay",
        }
    }

    /// Whether entering this mode starts cooldown cycles.
    pub fn is_timed(&self) -> bool {
        !matches!(self, Mode::Normal)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "timer" => Ok(Mode::Timer),
            "autoplay" | "auto-play" | "auto" => Ok(Mode::AutoPlay),
            _ => Err(BrowseError::InvalidMode(s.to_string())),
        }
    }
}

/// Countdown state of the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cooldown {
    #[default]
    Inactive,
    Active { remaining_ms: u64 },
}

impl Cooldown {
    pub fn is_active(&self) -> bool {
        matches!(self, Cooldown::Active { .. })
    }

    /// Remaining time, 0 when inactive.
    pub fn remaining_ms(&self) -> u64 {
        match self {
            Cooldown::Active { remaining_ms } => *remaining_ms,
            Cooldown::Inactive => 0,
        }
    }
}

/// What a fired timer means for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Stale or foreign handle, nothing changed
    Ignored,
    /// Countdown decremented
    Tick { remaining_ms: u64 },
    /// Countdown reached zero, navigation is unlocked
    Expired,
    /// Auto-play deadline: the session should advance and display
    AutoAdvance,
}

/// Mode plus cooldown state machine.
#[derive(Debug, Clone)]
pub struct Playback {
    mode: Mode,
    cooldown: Cooldown,
    duration_ms: u64,
    tick_ms: u64,
    tick: Option<TimerHandle>,
    deadline: Option<TimerHandle>,
}

impl Playback {
    /// Both periods are raised to at least 1 ms; a zero-length cycle would
    /// re-arm at the same instant forever.
    pub fn new(duration_ms: u64, tick_ms: u64) -> Self {
        Self {
            mode: Mode::Normal,
            cooldown: Cooldown::Inactive,
            duration_ms: duration_ms.max(1),
            tick_ms: tick_ms.max(1),
            tick: None,
            deadline: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// External navigation is only accepted outside a cooldown.
    pub fn allows_navigation(&self) -> bool {
        !self.cooldown.is_active()
    }

    /// Remaining cooldown as a percentage of the full duration.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.cooldown.remaining_ms() as f64 / self.duration_ms as f64 * 100.0
    }

    /// Switch to `mode`.
    ///
    /// Returns `false` without touching any timer when `mode` is already
    /// active. Otherwise the running cycle is cancelled; the caller displays
    /// the current entry, which arms a new cycle for timed modes.
    pub fn set_mode<S: Scheduler>(&mut self, mode: Mode, scheduler: &mut S) -> bool {
        if mode == self.mode {
            return false;
        }
        self.cancel_cycle(scheduler);
        info!(from = %self.mode, to = %mode, "playback mode changed");
        self.mode = mode;
        true
    }

    /// Return to `Normal` and drop any cycle. Idempotent.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel_cycle(scheduler);
        if self.mode != Mode::Normal {
            info!(from = %self.mode, "playback stopped");
        }
        self.mode = Mode::Normal;
    }

    /// Start a fresh cooldown cycle, cancelling the previous one.
    ///
    /// Does nothing in `Normal`.
    pub fn arm<S: Scheduler>(&mut self, scheduler: &mut S) {
        if !self.mode.is_timed() {
            return;
        }
        self.cancel_cycle(scheduler);
        self.cooldown = Cooldown::Active {
            remaining_ms: self.duration_ms,
        };
        self.tick = Some(scheduler.start_periodic(self.tick_period()));
        if self.mode == Mode::AutoPlay {
            self.deadline = Some(scheduler.start_once(self.duration_ms));
        }
        debug!(mode = %self.mode, duration_ms = self.duration_ms, "cooldown armed");
    }

    /// Handle a fired timer.
    pub fn on_timer<S: Scheduler>(&mut self, handle: TimerHandle, scheduler: &mut S) -> TimerOutcome {
        if self.tick == Some(handle) {
            let remaining_ms = self.cooldown.remaining_ms().saturating_sub(self.tick_period());
            if remaining_ms == 0 {
                if let Some(tick) = self.tick.take() {
                    scheduler.cancel(tick);
                }
                self.cooldown = Cooldown::Inactive;
                debug!(mode = %self.mode, "cooldown expired");
                return TimerOutcome::Expired;
            }
            self.cooldown = Cooldown::Active { remaining_ms };
            return TimerOutcome::Tick { remaining_ms };
        }

        if self.deadline == Some(handle) {
            self.deadline = None;
            if self.mode == Mode::AutoPlay {
                return TimerOutcome::AutoAdvance;
            }
        }

        TimerOutcome::Ignored
    }

    /// A tick never spans more than the whole cooldown.
    fn tick_period(&self) -> u64 {
        self.tick_ms.min(self.duration_ms)
    }

    fn cancel_cycle<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(tick) = self.tick.take() {
            scheduler.cancel(tick);
        }
        if let Some(deadline) = self.deadline.take() {
            scheduler.cancel(deadline);
        }
        self.cooldown = Cooldown::Inactive;
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS, DEFAULT_TICK_MS)
    }
}
