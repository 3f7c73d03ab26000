//! worddeck-core
//!
//! Word list browsing core shared by the `worddeck` front end and tools:
//! tiered fuzzy search, a wraparound cursor, and a timer/auto-play state
//! machine driven through an injectable scheduler.
//!
//! Public API:
//! - `BrowseSession` - The controller owning all browsing state
//! - `WordList` / `Entry` - Loaded dictionary records
//! - `Searcher` - Ranking search with an LRU result cache
//! - `Playback` / `Mode` / `Cooldown` - Timed browsing state machine
//! - `Scheduler` / `VirtualScheduler` - Timer abstraction
//! - `CursorStore` - Cursor persistence (in-memory or redb)
//! - `Config` - Configuration loaded from TOML
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{BrowseError, Result};

pub mod distance;
pub use distance::{edit_distance, within_distance};

pub mod entry;
pub use entry::{Entry, WordList};

pub mod search;
pub use search::{
    best_match, highlight_ranges, normalize_query, search_hits, MatchResult, SearchHit, Searcher,
};

pub mod cursor;
pub use cursor::Cursor;

pub mod scheduler;
pub use scheduler::{Scheduler, TimerHandle, VirtualScheduler};

pub mod playback;
pub use playback::{Cooldown, Mode, Playback, TimerOutcome};

pub mod store;
pub use store::{CursorStore, InMemoryStore, RedbStore, StoreError, DEFAULT_CURSOR_KEY};

pub mod results;
pub use results::ResultList;

pub mod command;
pub use command::{Command, Outcome, PlaybackEvent};

pub mod context;
pub use context::DisplayContext;

pub mod session;
pub use session::BrowseSession;

/// Browsing configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Length of one timer/auto-play cooldown in milliseconds.
    pub cooldown_ms: u64,
    /// Countdown tick period in milliseconds.
    pub tick_ms: u64,

    /// Largest edit distance still accepted by the fuzzy tier.
    pub max_fuzzy_distance: usize,
    /// Maximum number of hits in the result list.
    pub result_limit: usize,
    /// Hits shown per result page.
    pub page_size: usize,
    /// Maximum number of queries kept in the search cache.
    pub max_cache_size: usize,

    /// Key the cursor is persisted under.
    pub store_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown_ms: playback::DEFAULT_COOLDOWN_MS,
            tick_ms: playback::DEFAULT_TICK_MS,
            max_fuzzy_distance: search::DEFAULT_MAX_DISTANCE,
            result_limit: search::DEFAULT_RESULT_LIMIT,
            page_size: 10,
            // word lists are small; a few hundred queries is plenty
            max_cache_size: 256,
            store_key: DEFAULT_CURSOR_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    // ========== Timing ==========

    /// Set the cooldown length; zero is raised to 1 ms. Applies to sessions
    /// created afterwards.
    pub fn set_cooldown_ms(&mut self, ms: u64) {
        self.cooldown_ms = ms.max(1);
    }

    pub fn get_cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Set the tick period; zero is raised to 1 ms.
    pub fn set_tick_ms(&mut self, ms: u64) {
        self.tick_ms = ms.max(1);
    }

    pub fn get_tick_ms(&self) -> u64 {
        self.tick_ms
    }

    // ========== Search ==========

    pub fn set_max_fuzzy_distance(&mut self, distance: usize) {
        self.max_fuzzy_distance = distance;
    }

    pub fn get_max_fuzzy_distance(&self) -> usize {
        self.max_fuzzy_distance
    }

    pub fn set_result_limit(&mut self, limit: usize) {
        self.result_limit = limit;
    }

    pub fn get_result_limit(&self) -> usize {
        self.result_limit
    }

    // ========== Result list ==========

    /// Set the page size; zero is raised to 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    // ========== Cache ==========

    pub fn set_max_cache_size(&mut self, size: usize) {
        self.max_cache_size = size;
    }

    pub fn get_max_cache_size(&self) -> usize {
        self.max_cache_size
    }

    // ========== Persistence ==========

    pub fn set_store_key(&mut self, key: impl Into<String>) {
        self.store_key = key.into();
    }

    pub fn get_store_key(&self) -> &str {
        &self.store_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.cooldown_ms, 10_000);
        assert_eq!(cfg.tick_ms, 100);
        assert_eq!(cfg.max_fuzzy_distance, 3);
        assert_eq!(cfg.result_limit, 50);
        assert_eq!(cfg.store_key, "currentWordIndex");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("cooldown_ms = 3000\nstore_key = \"deck\"\n").unwrap();
        assert_eq!(cfg.cooldown_ms, 3_000);
        assert_eq!(cfg.store_key, "deck");
        assert_eq!(cfg.tick_ms, 100);
    }

    #[test]
    fn toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worddeck.toml");
        let mut cfg = Config::default();
        cfg.set_cooldown_ms(5_000);
        cfg.set_tick_ms(0);
        cfg.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.get_tick_ms(), 1);
    }

    #[test]
    fn setters_clamp_and_store() {
        let mut cfg = Config::default();
        cfg.set_cooldown_ms(0);
        assert_eq!(cfg.get_cooldown_ms(), 1);
        cfg.set_page_size(0);
        assert_eq!(cfg.get_page_size(), 1);
        cfg.set_max_cache_size(16);
        assert_eq!(cfg.get_max_cache_size(), 16);
        cfg.set_store_key("deck");
        assert_eq!(cfg.get_store_key(), "deck");
    }

    #[test]
    fn rejects_bad_types() {
        assert!(Config::from_toml_str("cooldown_ms = \"soon\"").is_err());
    }
}
