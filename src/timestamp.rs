//! Wall-clock stamps for log lines and fallback file names.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How the month field of a stamp is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStyle {
    /// Calendar month, 01 through 12.
    #[default]
    Calendar,
    /// Month counted from zero, 00 through 11. Matches log files written by
    /// older tooling that forgot to add one.
    ZeroBased,
}

impl MonthStyle {
    fn month_number(self, at: &OffsetDateTime) -> u8 {
        let month = u8::from(at.month());
        match self {
            Self::Calendar => month,
            Self::ZeroBased => month - 1,
        }
    }
}

/// Current local time, or UTC when the local offset is unknown.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Render the line prefix `"[YYYY-MM-DD HH:MM:SS] "`.
pub fn line_stamp(at: &OffsetDateTime, style: MonthStyle) -> String {
    format!(
        "[{:04}-{:02}-{:02} {:02}:{:02}:{:02}] ",
        at.year(),
        style.month_number(at),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Render the fallback file suffix `"-YYYYMMDDHHMMSS.out"`.
pub fn file_suffix(at: &OffsetDateTime, style: MonthStyle) -> String {
    format!(
        "-{:04}{:02}{:02}{:02}{:02}{:02}.out",
        at.year(),
        style.month_number(at),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

#[cfg(test)]
pub(crate) fn looks_like_line_stamp(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 22
        && b[0] == b'['
        && b[5] == b'-'
        && b[8] == b'-'
        && b[11] == b' '
        && b[14] == b':'
        && b[17] == b':'
        && b[20] == b']'
        && b[21] == b' '
        && [1..5, 6..8, 9..11, 12..14, 15..17, 18..20]
            .into_iter()
            .all(|r| b[r].iter().all(u8::is_ascii_digit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_line_stamp_calendar() {
        let at = datetime!(2024-03-07 09:05:01 UTC);
        assert_eq!(
            line_stamp(&at, MonthStyle::Calendar),
            "[2024-03-07 09:05:01] "
        );
    }

    #[test]
    fn test_line_stamp_zero_based() {
        let at = datetime!(2024-03-07 09:05:01 UTC);
        assert_eq!(
            line_stamp(&at, MonthStyle::ZeroBased),
            "[2024-02-07 09:05:01] "
        );

        let january = datetime!(2024-01-31 23:59:59 UTC);
        assert_eq!(
            line_stamp(&january, MonthStyle::ZeroBased),
            "[2024-00-31 23:59:59] "
        );
    }

    #[test]
    fn test_file_suffix() {
        let at = datetime!(2023-12-25 18:30:00 UTC);
        assert_eq!(
            file_suffix(&at, MonthStyle::Calendar),
            "-20231225183000.out"
        );
        assert_eq!(
            file_suffix(&at, MonthStyle::ZeroBased),
            "-20231125183000.out"
        );
    }

    #[test]
    fn test_now_produces_well_formed_stamp() {
        let stamp = line_stamp(&now(), MonthStyle::default());
        assert!(looks_like_line_stamp(&stamp), "bad stamp: {stamp:?}");
    }

    #[test]
    fn test_month_style_deserialize() {
        let style: MonthStyle = serde_yaml::from_str("zero_based").unwrap();
        assert_eq!(style, MonthStyle::ZeroBased);
        let style: MonthStyle = serde_yaml::from_str("calendar").unwrap();
        assert_eq!(style, MonthStyle::Calendar);
    }
}
