//! Text commands typed at the prompt.

use worddeck_core::{Command, Mode};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forwarded to the session as is
    Session(Command),
    /// Pick row `n` (1-based) of the visible result page
    Pick(usize),
    /// Next result page
    PageDown,
    /// Previous result page
    PageUp,
    /// Print the current card again
    Show,
    /// Print the result list of the last search
    Results,
    Help,
    Quit,
}

/// Parse a line. Returns `Ok(None)` for blank input.
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(query) = line.strip_prefix('/') {
        return Ok(Some(Input::Session(Command::Search(query.to_string()))));
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "n" | "next" => Input::Session(Command::Next),
        "p" | "prev" | "previous" => Input::Session(Command::Previous),
        "s" | "search" => {
            if rest.is_empty() {
                return Err("search needs a query".to_string());
            }
            Input::Session(Command::Search(rest.to_string()))
        }
        "select" | "pick" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("not a result number: {rest:?}"))?;
            if n == 0 {
                return Err("results are numbered from 1".to_string());
            }
            Input::Pick(n)
        }
        "mode" => {
            let mode: Mode = rest.parse().map_err(|e| format!("{e}"))?;
            Input::Session(Command::SetMode(mode))
        }
        "stop" => Input::Session(Command::Stop),
        "]" => Input::PageDown,
        "[" => Input::PageUp,
        "show" => Input::Show,
        "results" | "r" => Input::Results,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        // bare digits pick a result
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Input::Pick(n),
            _ => return Err(format!("unknown command: {head}")),
        },
    };
    Ok(Some(input))
}

pub const HELP: &str = "\
commands:
  n, next            next word
  p, prev            previous word
  /QUERY             jump to the best match for QUERY
  search QUERY       same as /QUERY
  select N, N        pick result N of the visible page
  ], [               next / previous result page
  mode normal|timer|autoplay
  stop               back to normal mode
  show               print the current word
  results            print the last result list
  quit";
