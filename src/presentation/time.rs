//! Relative timestamp formatting
//!
//! Formatting depends on "now", so the current time is read through a
//! [`Clock`] that tests replace with a [`FixedClock`]. The wording itself is
//! behind [`RelativeTimeFormatter`] so other locales can plug in their own.

use chrono::{DateTime, Datelike, Months, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Clock reading the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats an instant relative to a reference instant
pub trait RelativeTimeFormatter: Send + Sync {
    /// Describe `date` as seen from `relative_to` (e.g. "2 days ago")
    fn format(&self, date: DateTime<Utc>, relative_to: DateTime<Utc>) -> String;
}

/// English relative time formatting using the largest whole unit
///
/// Years and months follow the calendar; weeks and smaller units are fixed
/// lengths.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use feed_comments::presentation::time::{EnglishRelativeTimeFormatter, RelativeTimeFormatter};
///
/// let now = Utc.with_ymd_and_hms(2020, 5, 20, 12, 0, 0).unwrap();
/// let formatter = EnglishRelativeTimeFormatter;
///
/// assert_eq!(formatter.format(now - Duration::days(2), now), "2 days ago");
/// assert_eq!(formatter.format(now - Duration::minutes(1), now), "1 minute ago");
/// assert_eq!(formatter.format(now + Duration::hours(5), now), "in 5 hours");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishRelativeTimeFormatter;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

impl RelativeTimeFormatter for EnglishRelativeTimeFormatter {
    fn format(&self, date: DateTime<Utc>, relative_to: DateTime<Utc>) -> String {
        let (earlier, later, past) = if date <= relative_to {
            (date, relative_to, true)
        } else {
            (relative_to, date, false)
        };

        let seconds = (later - earlier).num_seconds();
        if seconds == 0 {
            return "now".to_string();
        }

        let months = whole_months_between(earlier, later);
        let (amount, unit) = if months >= 12 {
            (i64::from(months / 12), "year")
        } else if months >= 1 {
            (i64::from(months), "month")
        } else if seconds >= WEEK {
            (seconds / WEEK, "week")
        } else if seconds >= DAY {
            (seconds / DAY, "day")
        } else if seconds >= HOUR {
            (seconds / HOUR, "hour")
        } else if seconds >= MINUTE {
            (seconds / MINUTE, "minute")
        } else {
            (seconds, "second")
        };

        let plural = if amount == 1 { "" } else { "s" };
        if past {
            format!("{} {}{} ago", amount, unit, plural)
        } else {
            format!("in {} {}{}", amount, unit, plural)
        }
    }
}

/// Number of whole calendar months from `earlier` to `later`
fn whole_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u32 {
    let span = (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32;
    let mut months = u32::try_from(span).unwrap_or(0);

    while months > 0 {
        match earlier.checked_add_months(Months::new(months)) {
            Some(shifted) if shifted <= later => break,
            _ => months -= 1,
        }
    }
    months
}
