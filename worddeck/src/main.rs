//! worddeck: browse a word list in the terminal.
//!
//! Usage:
//!   cargo run -p worddeck -- words.csv
//!   cargo run -p worddeck -- words.csv --mode autoplay --config worddeck.toml
//!   RUST_LOG=worddeck_core=debug cargo run -p worddeck -- words.csv --json

mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use worddeck_core::{
    BrowseError, BrowseSession, Config, CursorStore, Outcome, PlaybackEvent, VirtualScheduler,
    WordList,
};

use crate::input::{parse_line, Input, HELP};

#[derive(Parser, Debug)]
#[command(name = "worddeck")]
#[command(about = "Browse a word list with fuzzy search, timer and auto-play modes")]
struct Args {
    /// CSV word list (word, type, definition per line)
    dict: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cursor database (defaults to ~/.worddeck/state.redb)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Do not persist the cursor
    #[arg(long)]
    no_store: bool,

    /// Initial mode: normal, timer or autoplay
    #[arg(short, long)]
    mode: Option<String>,

    /// Print display snapshots as JSON lines
    #[arg(long)]
    json: bool,
}

type Session = BrowseSession<VirtualScheduler>;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => Config::default(),
    };

    let words = WordList::load(&args.dict)
        .with_context(|| format!("Failed to load word list {}", args.dict.display()))?;

    let store = if args.no_store {
        CursorStore::new_in_memory()
    } else {
        open_store(args.store.clone().unwrap_or_else(default_store_path))
    };

    let mut session = BrowseSession::new(words, store, VirtualScheduler::new(), &config);
    if let Some(mode) = &args.mode {
        session.set_mode_str(mode)?;
    }

    let ui = Ui { json: args.json };
    if !ui.json {
        println!("worddeck: {} words, type `help` for commands", session.len());
    }
    ui.card(&session);

    run(&mut session, &ui, config.tick_ms)
}

fn default_store_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".worddeck").join("state.redb")
}

/// Open the redb store, falling back to memory so browsing still works.
fn open_store(path: PathBuf) -> CursorStore {
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(error = %e, dir = %dir.display(), "could not create store directory");
        }
    }
    match CursorStore::new_redb(&path) {
        Ok(store) => {
            info!(path = %path.display(), "cursor store opened");
            store
        }
        Err(e) => {
            eprintln!(
                "warning: cannot open cursor store {}: {} (position will not be saved)",
                path.display(),
                e
            );
            CursorStore::new_in_memory()
        }
    }
}

/// Read stdin on a thread and drive the session clock from the main loop.
///
/// The virtual clock is kept equal to the wall time since start, so timers
/// fire at their real deadlines however the loop wakes up.
fn run(session: &mut Session, ui: &Ui, tick_ms: u64) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let start = Instant::now();
    let wait = Duration::from_millis(tick_ms.max(1));
    loop {
        let received = rx.recv_timeout(wait);

        let wall_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let events = session.advance_clock(wall_ms.saturating_sub(session.now_ms()));
        ui.events(session, &events);

        match received {
            Ok(line) => match parse_line(&line) {
                Ok(Some(Input::Quit)) => break,
                Ok(Some(input)) => handle(session, ui, input),
                Ok(None) => {}
                Err(msg) => ui.message(&msg),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        io::stdout().flush().context("Failed to flush stdout")?;
    }
    Ok(())
}

fn handle(session: &mut Session, ui: &Ui, input: Input) {
    match input {
        Input::Session(command) => match session.process(command) {
            Ok(outcome) => ui.outcome(session, outcome),
            Err(BrowseError::NoMatch { query }) => ui.message(&format!("no match for {query:?}")),
            Err(e) => ui.message(&e.to_string()),
        },
        Input::Pick(n) => {
            if !session.results().is_visible() {
                ui.message("no result list, search first");
                return;
            }
            let Some(index) = session.results_mut().select_by_index(n - 1).map(|h| h.index) else {
                ui.message(&format!("no result {n} on this page"));
                return;
            };
            match session.select_result(index) {
                Ok(outcome) => ui.outcome(session, outcome),
                Err(e) => ui.message(&e.to_string()),
            }
        }
        Input::PageDown => {
            session.results_mut().page_down();
            ui.results(session);
        }
        Input::PageUp => {
            session.results_mut().page_up();
            ui.results(session);
        }
        Input::Show => ui.card(session),
        Input::Results => ui.results(session),
        Input::Help => ui.message(HELP),
        Input::Quit => {}
    }
}

/// Output sink: human-readable text or JSON snapshots.
struct Ui {
    json: bool,
}

impl Ui {
    fn card(&self, session: &Session) {
        let ctx = session.context();
        if self.json {
            match serde_json::to_string(&ctx) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "could not serialize display context"),
            }
        } else {
            println!("{}", render::card(&ctx));
        }
    }

    fn results(&self, session: &Session) {
        if self.json {
            self.card(session);
        } else {
            println!("{}", render::results(session.results()));
        }
    }

    fn message(&self, msg: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": msg }));
        } else {
            println!("{msg}");
        }
    }

    fn outcome(&self, session: &Session, outcome: Outcome) {
        match outcome {
            Outcome::Moved { .. } => {
                self.card(session);
                if session.results().is_visible() {
                    self.results(session);
                }
            }
            Outcome::Blocked => self.message("locked until the cooldown ends"),
            Outcome::ModeChanged(_) => self.card(session),
            Outcome::Unchanged => self.message(&format!("already in {} mode", session.mode())),
        }
    }

    fn events(&self, session: &Session, events: &[PlaybackEvent]) {
        let mut last_second = None;
        for event in events {
            match event {
                PlaybackEvent::AutoAdvanced { .. } => self.card(session),
                PlaybackEvent::CooldownEnded if session.playback().allows_navigation() => {
                    self.message("ready");
                }
                PlaybackEvent::Tick { remaining_ms } if !self.json => {
                    // one progress line per whole second
                    let second = remaining_ms / 1000;
                    if remaining_ms % 1000 == 0 && last_second != Some(second) {
                        last_second = Some(second);
                        println!("{}", render::progress(&session.context()));
                    }
                }
                _ => {}
            }
        }
    }
}
