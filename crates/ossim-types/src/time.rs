//! Wall-clock timestamps for nodes, processes and `date`.

use std::fmt;

/// Milliseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp { millis: 0 };

    /// Current wall-clock time.
    pub fn now() -> Self {
        let dur = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            millis: dur.as_millis() as u64,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Broken-down UTC calendar fields: (year, month, day, hour, minute, second).
    pub fn civil(self) -> (u16, u8, u8, u8, u8, u8) {
        let secs = self.millis / 1000;
        let days = secs / 86400;
        let time_of_day = secs % 86400;
        let hour = (time_of_day / 3600) as u8;
        let minute = ((time_of_day % 3600) / 60) as u8;
        let second = (time_of_day % 60) as u8;
        let (year, month, day) = days_to_ymd(days);
        (year, month, day, hour, minute, second)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day, hour, minute, second) = self.civil();
        write!(
            f,
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        )
    }
}

/// Convert days since Unix epoch to (year, month, day).
fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let feb = if is_leap(year) { 29 } else { 28 };
    let month_days: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 12u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    (year, month, (days + 1) as u8)
}

fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: u64 = 86_400_000;

    #[test]
    fn epoch_display() {
        assert_eq!(Timestamp::EPOCH.to_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn time_of_day_fields() {
        let ts = Timestamp::from_millis(DAY_MS + 3_723_000 + 999);
        assert_eq!(ts.to_string(), "1970-01-02 01:02:03");
    }

    #[test]
    fn days_to_ymd_first_of_february() {
        assert_eq!(days_to_ymd(31), (1970, 2, 1));
    }

    #[test]
    fn days_to_ymd_leap_year_feb_29() {
        // 2024-02-29 is day 19782.
        assert_eq!(days_to_ymd(19782), (2024, 2, 29));
    }

    #[test]
    fn days_to_ymd_december_31() {
        assert_eq!(days_to_ymd(364), (1970, 12, 31));
    }

    #[test]
    fn is_leap_centuries() {
        assert!(is_leap(2000));
        assert!(!is_leap(1900));
        assert!(is_leap(2024));
        assert!(!is_leap(2023));
    }

    #[test]
    fn now_is_after_2024() {
        let (year, month, day, ..) = Timestamp::now().civil();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
    }

    #[test]
    fn ordering_follows_millis() {
        assert!(Timestamp::from_millis(5) < Timestamp::from_millis(6));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_is_fixed_width(millis in 0u64..4_102_444_800_000) {
                let text = Timestamp::from_millis(millis).to_string();
                prop_assert_eq!(text.len(), 19);
            }

            #[test]
            fn civil_fields_in_range(millis in 0u64..4_102_444_800_000) {
                let (_, month, day, hour, minute, second) = Timestamp::from_millis(millis).civil();
                prop_assert!((1..=12).contains(&month));
                prop_assert!((1..=31).contains(&day));
                prop_assert!(hour < 24 && minute < 60 && second < 60);
            }
        }
    }
}
