//! Failure and error free-text cleanup.

/// Lines of raw message text inspected for readable content.
const SCAN_WINDOW: usize = 10;

/// Characters kept when no readable line survives the filter.
const FALLBACK_CHARS: usize = 200;

/// Reduce a raw failure/error message to its first `max_lines` readable
/// lines, dropping blank lines, stack frames (`at ...`) and `Caused by`
/// chains. Returns `None` for messages with no content at all.
pub fn truncate_message(raw: &str, max_lines: usize) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let kept: Vec<&str> = raw
        .lines()
        .take(SCAN_WINDOW)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_stack_line(line))
        .take(max_lines)
        .collect();

    if kept.is_empty() {
        Some(raw.chars().take(FALLBACK_CHARS).collect())
    } else {
        Some(kept.join("\n"))
    }
}

fn is_stack_line(line: &str) -> bool {
    line.starts_with("at ") || line.to_lowercase().starts_with("caused by")
}
