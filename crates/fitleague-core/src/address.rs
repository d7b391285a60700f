// Venue address shortening for display.

/// Administrative units dropped from geocoded addresses.
const ADMIN_WORDS: &[&str] = &[
    "county",
    "parish",
    "district",
    "township",
    "municipality",
    "borough",
    "province",
    "prefecture",
];

const COUNTRIES: &[&str] = &[
    "united states",
    "united states of america",
    "usa",
    "us",
    "united kingdom",
    "uk",
    "great britain",
    "england",
    "scotland",
    "wales",
    "northern ireland",
    "canada",
    "australia",
    "new zealand",
    "ireland",
];

/// Shorten a long geocoded address to `"<venue>, <city>, <region>"`.
///
/// Addresses with three or fewer comma-separated segments come back
/// unchanged. Otherwise postal codes, house numbers, administrative units and
/// country names are dropped, and the first, second-to-last and last of the
/// remaining segments are kept.
///
/// ```
/// use fitleague_core::address::format_short_address;
///
/// let full = "Riverside Courts, 12, Park Lane, Springfield, Greene County, Ohio, 45501, United States";
/// assert_eq!(format_short_address(full), "Riverside Courts, Springfield, Ohio");
/// assert_eq!(format_short_address("Gym, Leeds, UK"), "Gym, Leeds, UK");
/// ```
pub fn format_short_address(address: &str) -> String {
    let segments: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() <= 3 {
        return address.to_string();
    }

    let kept: Vec<&str> = segments.into_iter().filter(|s| !is_skipped(s)).collect();
    match kept.as_slice() {
        [] => address.to_string(),
        [_] | [_, _] | [_, _, _] => kept.join(", "),
        [venue, .., city, region] => format!("{venue}, {city}, {region}"),
    }
}

fn is_skipped(segment: &str) -> bool {
    is_postal_or_number(segment) || is_administrative(segment) || is_country(segment)
}

/// House numbers and postal codes: every whitespace-separated token carries a
/// digit ("45501", "12-14", "SW1A 1AA", "M5V 3L9").
fn is_postal_or_number(segment: &str) -> bool {
    let mut tokens = segment.split_whitespace().peekable();
    tokens.peek().is_some()
        && tokens.all(|t| {
            t.chars().any(|c| c.is_ascii_digit())
                && t.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn is_administrative(segment: &str) -> bool {
    segment
        .split_whitespace()
        .any(|word| ADMIN_WORDS.contains(&word.to_lowercase().as_str()))
}

fn is_country(segment: &str) -> bool {
    let lower = segment.to_lowercase();
    COUNTRIES.contains(&lower.trim_end_matches('.'))
}
