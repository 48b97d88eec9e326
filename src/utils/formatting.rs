//! Formatting utilities used for CLI and report outputs.

use unicode_width::UnicodeWidthStr;

/// Render a duration in seconds as `HHh MMm` (seconds are dropped).
pub fn secs2readable(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let abs = secs.abs();
    format!("{}{:02}h {:02}m", sign, abs / 3600, (abs % 3600) / 60)
}

/// Seconds expressed as working days of `hours_per_day` hours.
pub fn secs2days(secs: i64, hours_per_day: u32) -> f64 {
    if hours_per_day == 0 {
        return 0.0;
    }
    secs as f64 / 3600.0 / f64::from(hours_per_day)
}

/// Cut `s` to at most `max` display columns, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
