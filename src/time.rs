use std::fmt;
use hifitime::{Epoch, Weekday};
use serde_json::Value;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Unix time in seconds, as the open-notify endpoints report it.
///
/// Displays in the `ctime` layout (`Tue Nov 14 22:13:20 2023`), always in UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Timestamp(pub(crate) i64);

impl Timestamp {
    /// Accepts integral and fractional JSON numbers; fractions are truncated.
    pub(crate) fn from_json(value: &Value) -> Option<Timestamp> {
        value.as_i64()
            .or_else(|| value.as_f64().map(|seconds| seconds.trunc() as i64))
            .map(Timestamp)
    }

    pub(crate) fn epoch(self) -> Epoch {
        Epoch::from_unix_seconds(self.0 as f64)
    }
}

fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let epoch = self.epoch();
        let (year, month, day, hour, minute, second, _) = epoch.to_gregorian_utc();
        let month_name = MONTHS[usize::from(month.clamp(1, 12)) - 1];

        write!(f, "{} {month_name} {day:>2} {hour:02}:{minute:02}:{second:02} {year}",
               short_weekday(epoch.weekday_utc()))
    }
}
