// ABOUTME: Duration string normalization for podcast episode lengths.
// ABOUTME: Accepts HH:MM:SS, MM:SS, or bare seconds; anything else is 0.

/// Parses an episode duration string into seconds.
///
/// Dispatch is on the number of `:`-separated parts: three parts are
/// `HH:MM:SS`, two are `MM:SS`, anything else is an integer count of
/// seconds. The order matters and is part of the contract: `"90"` is 90
/// seconds, never 1:30. Any parse failure yields 0.
pub fn parse_duration_seconds(s: &str) -> u32 {
    let s = s.trim();
    let parts: Vec<&str> = s.split(':').collect();

    let parsed = match parts.len() {
        3 => hms_seconds(parts[0], parts[1], parts[2]),
        2 => hms_seconds("0", parts[0], parts[1]),
        _ => s.parse::<u32>().ok(),
    };

    parsed.unwrap_or(0)
}

fn hms_seconds(h: &str, m: &str, s: &str) -> Option<u32> {
    let hours: u32 = h.trim().parse().ok()?;
    let mins: u32 = m.trim().parse().ok()?;
    let secs: u32 = s.trim().parse().ok()?;
    hours
        .checked_mul(3600)?
        .checked_add(mins.checked_mul(60)?)?
        .checked_add(secs)
}
