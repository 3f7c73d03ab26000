//! Browse session management.
//!
//! `BrowseSession` is the single controller that owns the word list, the
//! cursor, the playback state machine, the searcher, the result list, the
//! cursor store and the scheduler. All state changes go through its methods,
//! one event at a time.

use tracing::{debug, info, warn};

use crate::command::{Command, Outcome, PlaybackEvent};
use crate::context::DisplayContext;
use crate::cursor::Cursor;
use crate::entry::{Entry, WordList};
use crate::error::{BrowseError, Result};
use crate::playback::{Cooldown, Mode, Playback, TimerOutcome};
use crate::results::ResultList;
use crate::scheduler::{Scheduler, VirtualScheduler};
use crate::search::{normalize_query, Searcher};
use crate::store::CursorStore;
use crate::Config;

/// Browsing state for one word list.
#[derive(Debug)]
pub struct BrowseSession<S = VirtualScheduler> {
    words: WordList,
    cursor: Cursor,
    playback: Playback,
    searcher: Searcher,
    results: ResultList,
    store: CursorStore,
    store_key: String,
    scheduler: S,
}

impl<S: Scheduler> BrowseSession<S> {
    /// Create a session, restoring the saved cursor.
    ///
    /// A missing, unreadable or out-of-range saved position starts at 0. The
    /// restored entry is displayed (and persisted) right away.
    pub fn new(words: WordList, store: CursorStore, scheduler: S, config: &Config) -> Self {
        let len = words.len();
        let saved = store.load_cursor(&config.store_key);
        let cursor = match saved.map(|index| Cursor::with_index(len, index)) {
            Some(Ok(cursor)) => cursor,
            Some(Err(e)) => {
                warn!(error = %e, "saved cursor does not fit the word list, starting over");
                Cursor::at_start(&words)
            }
            None => Cursor::at_start(&words),
        };
        info!(entries = len, index = cursor.index(), "browse session started");

        let mut session = Self {
            words,
            cursor,
            playback: Playback::new(config.cooldown_ms, config.tick_ms),
            searcher: Searcher::new(
                config.max_fuzzy_distance,
                config.result_limit,
                config.max_cache_size,
            ),
            results: ResultList::with_page_size(config.page_size),
            store,
            store_key: config.store_key.clone(),
            scheduler,
        };
        session.display();
        session
    }

    // ========== Accessors ==========

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn current(&self) -> &Entry {
        &self.words[self.cursor.index()]
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true; a session always has entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.playback.mode()
    }

    pub fn cooldown(&self) -> Cooldown {
        self.playback.cooldown()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultList {
        &mut self.results
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn store(&self) -> &CursorStore {
        &self.store
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Snapshot for rendering.
    pub fn context(&self) -> DisplayContext {
        let entry = self.current();
        let cooldown = self.playback.cooldown();
        DisplayContext {
            index: self.cursor.index(),
            total: self.words.len(),
            word: entry.word.clone(),
            kind: entry.kind.clone(),
            definition: entry.definition.clone(),
            mode: self.playback.mode(),
            cooldown_remaining_ms: cooldown.remaining_ms(),
            cooldown_percent: self.playback.progress_percent(),
            interaction_locked: cooldown.is_active(),
            stop_visible: self.playback.mode() == Mode::AutoPlay,
            results_visible: self.results.is_visible(),
            results: if self.results.is_visible() {
                self.results.hits().to_vec()
            } else {
                Vec::new()
            },
        }
    }

    // ========== Commands ==========

    /// Dispatch an input command.
    pub fn process(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "processing command");
        match command {
            Command::Next => Ok(self.next()),
            Command::Previous => Ok(self.previous()),
            Command::Search(query) => self.search(&query),
            Command::SelectResult(index) => self.select_result(index),
            Command::SetMode(mode) => Ok(self.set_mode(mode)),
            Command::Stop => Ok(self.stop()),
        }
    }

    /// Show the next entry.
    pub fn next(&mut self) -> Outcome {
        if !self.playback.allows_navigation() {
            return Outcome::Blocked;
        }
        let index = self.cursor.advance();
        self.display();
        Outcome::Moved { index }
    }

    /// Show the previous entry.
    pub fn previous(&mut self) -> Outcome {
        if !self.playback.allows_navigation() {
            return Outcome::Blocked;
        }
        let index = self.cursor.retreat();
        self.display();
        Outcome::Moved { index }
    }

    /// Jump to the best match for `raw_query`.
    ///
    /// Fills the result list with the prefix/substring listing. An empty query
    /// or no candidate yields `NoMatch` and leaves everything as it was.
    pub fn search(&mut self, raw_query: &str) -> Result<Outcome> {
        if !self.playback.allows_navigation() {
            return Ok(Outcome::Blocked);
        }
        let query = normalize_query(raw_query);
        let Some(found) = self.searcher.best_match(&query, &self.words) else {
            debug!(query = %query, "search found nothing");
            return Err(BrowseError::NoMatch { query });
        };

        let index = self.cursor.jump_to(found.index)?;
        let hits = self.searcher.hits(&query, &self.words);
        self.results.set_hits(hits);
        self.display();
        Ok(Outcome::Moved { index })
    }

    /// Jump to entry `index`, as picked from the result list.
    pub fn select_result(&mut self, index: usize) -> Result<Outcome> {
        if !self.playback.allows_navigation() {
            return Ok(Outcome::Blocked);
        }
        let index = self.cursor.jump_to(index)?;
        self.results.hide();
        self.display();
        Ok(Outcome::Moved { index })
    }

    /// Switch playback mode. Selecting the active mode changes nothing.
    pub fn set_mode(&mut self, mode: Mode) -> Outcome {
        if !self.playback.set_mode(mode, &mut self.scheduler) {
            return Outcome::Unchanged;
        }
        if mode.is_timed() {
            self.display();
        }
        Outcome::ModeChanged(mode)
    }

    /// Parse and apply a mode name from the input boundary.
    pub fn set_mode_str(&mut self, mode: &str) -> Result<Outcome> {
        let mode: Mode = mode.parse()?;
        Ok(self.set_mode(mode))
    }

    /// Return to normal mode. The cursor stays where it is.
    pub fn stop(&mut self) -> Outcome {
        let was = self.playback.mode();
        self.playback.stop(&mut self.scheduler);
        if was == Mode::Normal {
            Outcome::Unchanged
        } else {
            Outcome::ModeChanged(Mode::Normal)
        }
    }

    // ========== Clock ==========

    /// Advance the clock by `elapsed_ms`, handling every timer that comes due.
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> Vec<PlaybackEvent> {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut events = Vec::new();
        while let Some(handle) = self.scheduler.pop_due(until) {
            match self.playback.on_timer(handle, &mut self.scheduler) {
                TimerOutcome::Ignored => {}
                TimerOutcome::Tick { remaining_ms } => {
                    events.push(PlaybackEvent::Tick { remaining_ms });
                }
                TimerOutcome::Expired => events.push(PlaybackEvent::CooldownEnded),
                TimerOutcome::AutoAdvance => {
                    let index = self.cursor.advance();
                    debug!(index, "auto-play advanced");
                    self.display();
                    events.push(PlaybackEvent::AutoAdvanced { index });
                }
            }
        }
        events
    }

    /// Persist the cursor and, in timed modes, start a fresh cooldown.
    fn display(&mut self) {
        if let Err(e) = self.store.save_cursor(&self.store_key, self.cursor.index()) {
            warn!(error = %e, index = self.cursor.index(), "could not save cursor");
        }
        if self.playback.mode().is_timed() {
            self.playback.arm(&mut self.scheduler);
            // locked interaction closes the dropdown
            self.results.hide();
        }
    }
}
