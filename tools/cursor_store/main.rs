//! Inspect or edit the persisted word deck cursor
//!
//! Usage:
//!   cargo run -p cursor_store -- --db ~/.worddeck/state.redb show
//!   cargo run -p cursor_store -- --db ~/.worddeck/state.redb show --json
//!   cargo run -p cursor_store -- --db ~/.worddeck/state.redb set 12
//!   cargo run -p cursor_store -- --db ~/.worddeck/state.redb clear

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use worddeck_core::{CursorStore, DEFAULT_CURSOR_KEY};

#[derive(Parser, Debug)]
#[command(name = "cursor_store")]
#[command(about = "Inspect or edit the saved word deck position")]
struct Args {
    /// Path to the cursor database
    #[arg(short, long)]
    db: PathBuf,

    /// Key the cursor is stored under
    #[arg(short, long, default_value = DEFAULT_CURSOR_KEY)]
    key: String,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print the saved position
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the saved position
    Set { index: usize },
    /// Remove the saved position
    Clear,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut store = CursorStore::new_redb(&args.db)
        .map_err(|e| anyhow::anyhow!("Failed to open cursor store: {}", e))?;

    match args.action {
        Action::Show { json } => {
            let raw = store.get(&args.key)?;
            let index = store.load_cursor(&args.key);
            if json {
                let value = serde_json::json!({
                    "key": args.key,
                    "raw": raw,
                    "index": index,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                match (raw, index) {
                    (None, _) => println!("{}: (not set)", args.key),
                    (Some(_), Some(index)) => println!("{}: {}", args.key, index),
                    (Some(raw), None) => println!("{}: {:?} (unreadable)", args.key, raw),
                }
            }
        }
        Action::Set { index } => {
            store.save_cursor(&args.key, index)?;
            println!("{} = {}", args.key, index);
        }
        Action::Clear => {
            if store.remove(&args.key)? {
                println!("removed {}", args.key);
            } else {
                println!("{} was not set", args.key);
            }
        }
    }

    Ok(())
}
