//! Presentation snapshot for front ends.
//!
//! `DisplayContext` is plain data. After every command or clock advance the
//! front end reads a fresh snapshot and renders it; the core never renders
//! anything itself.

use serde::Serialize;

use crate::playback::Mode;
use crate::search::SearchHit;

/// Everything a front end needs to draw the card, the progress bar and the
/// result dropdown.
///
/// # Fields
///
/// - `index` / `total`: position of the shown entry
/// - `word`, `kind`, `definition`: the shown entry
/// - `mode`: current playback mode
/// - `cooldown_remaining_ms` / `cooldown_percent`: progress bar state, zero
///   when no cooldown runs
/// - `interaction_locked`: navigation controls should be disabled
/// - `stop_visible`: the stop control applies (auto-play only)
/// - `results_visible` / `results`: dropdown state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayContext {
    pub index: usize,
    pub total: usize,
    pub word: String,
    pub kind: String,
    pub definition: String,
    pub mode: Mode,
    pub cooldown_remaining_ms: u64,
    pub cooldown_percent: f64,
    pub interaction_locked: bool,
    pub stop_visible: bool,
    pub results_visible: bool,
    pub results: Vec<SearchHit>,
}

impl DisplayContext {
    /// The word wrapped in quotes, as shown on the card.
    pub fn quoted_word(&self) -> String {
        format!("\"{}\"", self.word)
    }

    /// Text progress bar of `width` cells, empty when no cooldown runs.
    pub fn progress_bar(&self, width: usize) -> String {
        if !self.interaction_locked || width == 0 {
            return String::new();
        }
        let filled = ((self.cooldown_percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}
