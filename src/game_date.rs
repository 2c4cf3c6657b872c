use crate::settings::AppSettings;
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone};
use log::warn;

/// The calendar day the scoreboard is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDate {
    pub date: NaiveDate,
}

impl GameDate {
    /// Shift `now` by the debug offsets and take its calendar date in `now`'s
    /// own time zone. Rollover hours do not move the date.
    pub fn resolve<Tz: TimeZone>(now: &DateTime<Tz>, settings: &AppSettings) -> Self {
        let offset = TimeDelta::hours(i64::from(settings.debug_hours))
            + TimeDelta::minutes(i64::from(settings.debug_minutes));
        let shifted = now.clone().checked_add_signed(offset).unwrap_or_else(|| {
            warn!("debug offset {offset} is out of range, using the current time");
            now.clone()
        });
        Self { date: shifted.date_naive() }
    }

    /// `YYYYMMDD`, as the scoreboard query expects.
    pub fn compact(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// `YYYY-MM-DD`
    pub fn display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn settings(debug_hours: i32, debug_minutes: i32) -> AppSettings {
        AppSettings { debug_hours, debug_minutes, ..Default::default() }
    }

    #[test]
    fn renders_compact_and_display_forms() {
        let now = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap();
        let game_date = GameDate::resolve(&now, &settings(0, 0));
        assert_eq!(game_date.compact(), "20250603");
        assert_eq!(game_date.display(), "2025-06-03");
    }

    #[test]
    fn debug_offsets_can_cross_midnight_both_ways() {
        let now = Utc.with_ymd_and_hms(2025, 6, 30, 22, 30, 0).unwrap();
        assert_eq!(GameDate::resolve(&now, &settings(1, 30)).display(), "2025-07-01");
        assert_eq!(GameDate::resolve(&now, &settings(1, 29)).display(), "2025-06-30");
        assert_eq!(GameDate::resolve(&now, &settings(-23, 0)).display(), "2025-06-29");
        assert_eq!(GameDate::resolve(&now, &settings(0, -1351)).display(), "2025-06-29");
    }

    #[test]
    fn resolution_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap();
        let a = GameDate::resolve(&now, &settings(2, 0));
        let b = GameDate::resolve(&now, &settings(2, 0));
        assert_eq!(a, b);
        assert_eq!(a.compact(), "20260101");
    }

    #[test]
    fn date_is_taken_in_the_clock_zone_without_conversion() {
        // 01:00 on July 1st at UTC-4 is 05:00 UTC; the local date wins.
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let now = eastern.with_ymd_and_hms(2025, 7, 1, 1, 0, 0).unwrap();
        assert_eq!(GameDate::resolve(&now, &settings(0, 0)).display(), "2025-07-01");
        assert_eq!(GameDate::resolve(&now, &settings(-2, 0)).display(), "2025-06-30");
    }

    #[test]
    fn rollover_hours_do_not_move_the_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 30, 1, 0, 0).unwrap();
        let late_rollover = AppSettings { rollover_hours: 6, ..Default::default() };
        assert_eq!(GameDate::resolve(&now, &late_rollover).display(), "2025-06-30");
    }
}
