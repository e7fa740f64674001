use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a datetime according to the configured date format.
///
/// If `date_format` is `"relative"` (or empty), displays relative times like
/// `"2h"`, `"3d"`, `"1w"`. Otherwise, uses `strftime`-style formatting.
pub(crate) fn format_date(dt: &DateTime<Utc>, date_format: &str) -> String {
    if date_format.is_empty() || date_format == "relative" {
        format_relative_time(dt)
    } else {
        dt.format(date_format).to_string()
    }
}

/// Format a datetime as relative time (e.g., `"2h"`, `"3d"`, `"1w"`).
fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(dt);
    let (minutes, hours, days) = (
        elapsed.num_minutes(),
        elapsed.num_hours(),
        elapsed.num_days(),
    );

    let (count, unit) = if minutes < 1 {
        return "now".to_owned();
    } else if minutes < 60 {
        (minutes, "m")
    } else if hours < 24 {
        (hours, "h")
    } else if days < 7 {
        (days, "d")
    } else if days < 30 {
        (days / 7, "w")
    } else if days < 365 {
        (days / 30, "mo")
    } else {
        (days / 365, "y")
    };
    format!("{count}{unit}")
}

/// Truncate a string to at most `max_width` display columns, appending an
/// ellipsis when something was cut. Width-aware so wide (CJK) characters
/// don't overflow their table cell.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}
