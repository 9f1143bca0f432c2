//! Time handling for TROPOSINEX epochs.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// TROPOSINEX epoch fields for one timestamp.
///
/// `seconds_of_day` is derived from the hour alone (`hour * 3600`);
/// minutes are carried separately and only appear in the filename.
/// This matches the exchange convention of hourly model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroEpoch {
    pub year: i32,
    pub day_of_year: u32,
    pub seconds_of_day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl TroEpoch {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            day_of_year: dt.ordinal(),
            seconds_of_day: dt.hour() * 3600,
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }

    /// `YYYY:DDD:SSSSS` epoch string used in TROP/SOLUTION rows.
    pub fn epoch_string(&self) -> String {
        format!(
            "{}:{:03}:{:05}",
            self.year, self.day_of_year, self.seconds_of_day
        )
    }

    /// `YYYYDDDHHMM` stamp used in the output filename.
    pub fn file_stamp(&self) -> String {
        format!(
            "{}{:03}{:02}{:02}",
            self.year, self.day_of_year, self.hour, self.minute
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_fields() {
        let dt = Utc.with_ymd_and_hms(2019, 1, 15, 12, 30, 0).unwrap();
        let epoch = TroEpoch::from_datetime(dt);
        assert_eq!(epoch.year, 2019);
        assert_eq!(epoch.day_of_year, 15);
        // Seconds of day come from the hour only
        assert_eq!(epoch.seconds_of_day, 43200);
        assert_eq!(epoch.minute, 30);
    }

    #[test]
    fn test_epoch_string_padding() {
        let dt = Utc.with_ymd_and_hms(2019, 1, 5, 3, 0, 0).unwrap();
        let epoch = TroEpoch::from_datetime(dt);
        assert_eq!(epoch.epoch_string(), "2019:005:10800");
        assert_eq!(epoch.file_stamp(), "20190050300");
    }

    #[test]
    fn test_day_of_year_end_of_year() {
        let dt = Utc.with_ymd_and_hms(2020, 12, 31, 23, 0, 0).unwrap();
        let epoch = TroEpoch::from_datetime(dt);
        assert_eq!(epoch.day_of_year, 366);
        assert_eq!(epoch.epoch_string(), "2020:366:82800");
    }
}
