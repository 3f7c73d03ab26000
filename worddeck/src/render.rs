//! Plain-text rendering of display snapshots.

use std::fmt::Write;

use worddeck_core::{DisplayContext, Mode, ResultList, SearchHit};

const BAR_WIDTH: usize = 20;

/// The card: position, quoted word, kind, definition and mode line.
pub fn card(ctx: &DisplayContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}/{}] {}", ctx.index + 1, ctx.total, ctx.quoted_word());
    if !ctx.kind.is_empty() {
        let _ = writeln!(out, "  ({})", ctx.kind);
    }
    if !ctx.definition.is_empty() {
        let _ = writeln!(out, "  {}", ctx.definition);
    }
    let _ = write!(out, "  mode: {}", ctx.mode);
    if ctx.interaction_locked {
        let _ = write!(
            out,
            " {} {:.1}s",
            ctx.progress_bar(BAR_WIDTH),
            ctx.cooldown_remaining_ms as f64 / 1000.0
        );
    }
    if ctx.stop_visible {
        out.push_str("  (type `stop` to end auto-play)");
    }
    out
}

/// Compact progress line printed while a cooldown runs.
pub fn progress(ctx: &DisplayContext) -> String {
    match ctx.mode {
        Mode::Normal => String::new(),
        _ => format!(
            "{} {:>5.1}s",
            ctx.progress_bar(BAR_WIDTH),
            ctx.cooldown_remaining_ms as f64 / 1000.0
        ),
    }
}

/// Word with highlighted spans wrapped in `*`.
pub fn highlighted(hit: &SearchHit) -> String {
    let mut out = String::with_capacity(hit.word.len() + 2 * hit.highlights.len());
    let mut pos = 0;
    for range in &hit.highlights {
        if range.start < pos || range.end > hit.word.len() {
            continue;
        }
        out.push_str(&hit.word[pos..range.start]);
        out.push('*');
        out.push_str(&hit.word[range.clone()]);
        out.push('*');
        pos = range.end;
    }
    out.push_str(&hit.word[pos..]);
    out
}

/// Visible page of the result list, numbered from 1.
pub fn results(list: &ResultList) -> String {
    if list.is_empty() {
        return "  no matching words".to_string();
    }
    let mut out = String::new();
    for (row, hit) in list.current_page_hits().iter().enumerate() {
        let marker = if row == list.cursor() { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {}. {}", row + 1, highlighted(hit));
    }
    let _ = write!(
        out,
        "  page {}/{} ({} hits)",
        list.current_page() + 1,
        list.num_pages(),
        list.len()
    );
    out
}
