// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil (Gregorian, UT) date-time ⇄ Julian Day conversion.
//!
//! The forward direction is the integer Gregorian day-number formula with
//! the fractional day appended, so it extends smoothly over proleptic
//! dates.  The inverse goes through `chrono` at millisecond resolution.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LunarError, LunarResult};
use crate::Instant;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Gregorian leap-year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1–12) of `year`; `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// A broken-down civil date and time on the Universal Time axis.
///
/// `month` is 1-based. Fields are public for pattern matching, but values
/// built through [`CivilDateTime::new`] are guaranteed to name a real
/// calendar instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl CivilDateTime {
    /// Validated constructor.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> LunarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LunarError::invalid_argument(format!(
                "month {month} outside 1..=12"
            )));
        }
        let last_day = days_in_month(year, month);
        if day == 0 || day > last_day {
            return Err(LunarError::invalid_argument(format!(
                "day {day} outside 1..={last_day} for {year:04}-{month:02}"
            )));
        }
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return Err(LunarError::invalid_argument(format!(
                "time of day {hour:02}:{minute:02}:{second:02}.{millisecond:03} is not valid"
            )));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// 00:00:00.000 UT on the given day.
    pub fn midnight(year: i32, month: u32, day: u32) -> LunarResult<Self> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Julian Day of this civil instant.
    ///
    /// ```
    /// use lunar_ephem::CivilDateTime;
    ///
    /// let noon = CivilDateTime::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
    /// assert_eq!(noon.to_julian_day().value(), 2_451_545.0);
    /// ```
    pub fn to_julian_day(&self) -> Instant {
        let month = i64::from(self.month);
        let a = (14 - month).div_euclid(12);
        let y = i64::from(self.year) + 4800 - a;
        let m = month + 12 * a - 3;

        let jdn = i64::from(self.day) + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
            - y.div_euclid(100)
            + y.div_euclid(400)
            - 32_045;

        let fraction = (f64::from(self.hour) - 12.0) / 24.0
            + f64::from(self.minute) / 1_440.0
            + f64::from(self.second) / 86_400.0
            + f64::from(self.millisecond) / MILLIS_PER_DAY;

        Instant::new(jdn as f64 + fraction)
    }

    /// Civil date-time of a Julian Day, rounded to the nearest millisecond.
    pub fn from_julian_day(instant: Instant) -> LunarResult<Self> {
        let instant = instant.checked()?;
        let millis = ((instant.value() - crate::instant::UNIX_EPOCH_JD.value()) * MILLIS_PER_DAY)
            .round();
        if millis.abs() >= i64::MAX as f64 {
            return Err(LunarError::invalid_argument(format!(
                "{instant} is outside the representable calendar range"
            )));
        }
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .map(Self::from)
            .ok_or_else(|| {
                LunarError::invalid_argument(format!(
                    "{instant} is outside the representable calendar range"
                ))
            })
    }

    /// The same instant as a `chrono` timestamp.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
            .map(|naive| naive.and_utc())
    }
}

impl From<DateTime<Utc>> for CivilDateTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            // chrono encodes a leap second as nanosecond >= 1e9
            second: datetime.second(),
            millisecond: (datetime.nanosecond() / 1_000_000).min(999),
        }
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_j2000_noon() {
        let noon = CivilDateTime::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
        assert_eq!(noon.to_julian_day().value(), 2_451_545.0);
    }

    #[test]
    fn test_midnight_is_half_day_before_noon() {
        let midnight = CivilDateTime::midnight(2000, 1, 1).unwrap();
        assert_eq!(midnight.to_julian_day().value(), 2_451_544.5);
    }

    #[test]
    fn test_reference_new_moon_epoch() {
        let epoch = CivilDateTime::midnight(2000, 1, 6).unwrap();
        assert_eq!(epoch.to_julian_day().value(), 2_451_549.5);
    }

    #[test]
    fn test_agrees_with_chrono_path() {
        let civil = CivilDateTime::new(2024, 4, 8, 18, 17, 0, 0).unwrap();
        let via_chrono = Instant::from_utc(civil.to_datetime().unwrap());
        assert!((civil.to_julian_day().value() - via_chrono.value()).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_within_one_millisecond() {
        for civil in [
            CivilDateTime::new(2024, 2, 29, 23, 59, 59, 500).unwrap(),
            CivilDateTime::new(1999, 12, 31, 0, 0, 0, 0).unwrap(),
            CivilDateTime::new(1582, 10, 15, 6, 30, 15, 250).unwrap(),
            CivilDateTime::new(2100, 3, 1, 12, 0, 0, 1).unwrap(),
        ] {
            let back = CivilDateTime::from_julian_day(civil.to_julian_day()).unwrap();
            assert_eq!(back, civil, "roundtrip of {civil}");
        }
    }

    #[test]
    fn test_rejects_impossible_fields() {
        assert!(CivilDateTime::new(2023, 2, 29, 0, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2023, 0, 1, 0, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2023, 13, 1, 0, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2023, 1, 1, 24, 0, 0, 0).is_err());
        assert!(CivilDateTime::new(2023, 1, 1, 0, 0, 0, 1000).is_err());
    }

    #[test]
    fn test_from_julian_day_rejects_nan() {
        assert!(CivilDateTime::from_julian_day(Instant::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_display_is_iso_like() {
        let civil = CivilDateTime::new(2024, 3, 25, 7, 0, 0, 0).unwrap();
        assert_eq!(civil.to_string(), "2024-03-25T07:00:00.000Z");
    }
}
