use chrono::{DateTime, Utc};

enum Phrase {
    Counted { unit: &'static str, divisor: f64 },
    Fixed(&'static str),
}

// Ascending by threshold; the first row whose threshold exceeds the elapsed
// seconds wins.
const FORMATS: [(f64, Phrase); 9] = [
    (60.0, Phrase::Counted { unit: "seconds", divisor: 1.0 }),
    (120.0, Phrase::Fixed("1 minute ago")),
    (3_600.0, Phrase::Counted { unit: "minutes", divisor: 60.0 }),
    (7_200.0, Phrase::Fixed("1 hour ago")),
    (86_400.0, Phrase::Counted { unit: "hours", divisor: 3_600.0 }),
    (172_800.0, Phrase::Fixed("Yesterday")),
    (604_800.0, Phrase::Counted { unit: "days", divisor: 86_400.0 }),
    (1_209_600.0, Phrase::Fixed("1 week ago")),
    (2_678_400.0, Phrase::Counted { unit: "weeks", divisor: 604_800.0 }),
];

const FALLBACK: &str = "a while ago";

/// Formats an elapsed duration in seconds. Negative input counts as zero.
pub fn pretty_date(elapsed_seconds: f64) -> String {
    if elapsed_seconds.is_nan() {
        return FALLBACK.to_string();
    }
    let seconds = elapsed_seconds.max(0.0);

    for (threshold, phrase) in &FORMATS {
        if seconds < *threshold {
            return match phrase {
                Phrase::Counted { unit, divisor } => {
                    format!("{} {unit} ago", (seconds / divisor).floor() as u64)
                }
                Phrase::Fixed(text) => (*text).to_string(),
            };
        }
    }
    FALLBACK.to_string()
}

/// Relative phrase for `then` as seen from `now`; an unparseable time reads
/// as "a while ago".
pub fn relative_time(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match then {
        Some(then) => pretty_date((now - then).num_milliseconds() as f64 / 1000.0),
        None => FALLBACK.to_string(),
    }
}
