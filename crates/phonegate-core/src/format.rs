//! Display formatting for countdowns and phone numbers.

/// Render a remaining block duration for display.
///
/// At least one hour left renders as `H ч M мин`; anything shorter renders as
/// `M:SS`. Sub-second remainders and zero render as `0:00`. Hours are the
/// total hour count, so a full 24 hour block reads `24 ч 0 мин`.
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours} ч {minutes} мин")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Group national phone digits as `XXX XXX XX XX`.
///
/// Non-digit characters are dropped. Groups appear as soon as their first
/// digit is typed, and anything past the tenth digit is ignored.
pub fn format_phone_number(value: &str) -> String {
    const GROUPS: [(usize, usize); 4] = [(0, 3), (3, 6), (6, 8), (8, 10)];

    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    let mut formatted = String::with_capacity(13);
    for (start, end) in GROUPS {
        let Some(group) = digits.get(start..end.min(digits.len())) else {
            break;
        };
        if group.is_empty() {
            break;
        }
        if !formatted.is_empty() {
            formatted.push(' ');
        }
        formatted.push_str(group);
    }
    formatted
}
