//! Input commands accepted by a browse session.
//!
//! Front ends map buttons, keys and gestures onto these; the mapping itself
//! lives with the front end.

use crate::playback::Mode;

/// Discrete user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the next entry (wraps around)
    Next,
    /// Show the previous entry (wraps around)
    Previous,
    /// Jump to the best match for a raw query
    Search(String),
    /// Jump to an entry picked from the result list, by entry index
    SelectResult(usize),
    /// Switch playback mode
    SetMode(Mode),
    /// Leave timer/auto-play and return to normal
    Stop,
}

/// Result of a successfully processed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cursor now points at `index` and the entry was displayed
    Moved { index: usize },
    /// Rejected because a cooldown is running; nothing changed
    Blocked,
    /// The playback mode changed
    ModeChanged(Mode),
    /// Accepted but nothing changed (e.g. selecting the active mode)
    Unchanged,
}

/// Something that happened while the clock advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Countdown step
    Tick { remaining_ms: u64 },
    /// Countdown reached zero
    CooldownEnded,
    /// Auto-play moved to `index`
    AutoAdvanced { index: usize },
}
