// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Monthly phase calendar.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::civil::{days_in_month, CivilDateTime};
use crate::error::{LunarError, LunarResult};
use crate::phase::{phase_at, PhaseName};
use crate::Instant;

/// Phase readout for one calendar day, evaluated at 00:00 UT.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDay {
    /// Day of month, 1-based.
    pub day: u32,
    pub instant: Instant,
    pub phase: f64,
    pub illumination: f64,
    pub phase_name: PhaseName,
}

/// One [`CalendarDay`] per day of the month, in day order.
///
/// `month_index` is 0-based (0 = January). Anything above 11 is rejected
/// rather than rolled into the next year.
///
/// ```
/// use lunar_ephem::month_calendar;
///
/// assert_eq!(month_calendar(2024, 1).unwrap().len(), 29);
/// assert!(month_calendar(2024, 12).is_err());
/// ```
pub fn month_calendar(year: i32, month_index: u32) -> LunarResult<Vec<CalendarDay>> {
    if month_index > 11 {
        return Err(LunarError::invalid_argument(format!(
            "month index {month_index} outside 0..=11"
        )));
    }
    let month = month_index + 1;

    let days = (1..=days_in_month(year, month))
        .map(|day| {
            let instant = CivilDateTime::midnight(year, month, day)?.to_julian_day();
            let phase = phase_at(instant);
            Ok(CalendarDay {
                day,
                instant,
                phase: phase.phase,
                illumination: phase.illumination,
                phase_name: phase.name,
            })
        })
        .collect::<LunarResult<Vec<_>>>()?;

    debug!("calendar {year:04}-{month:02}: {} day(s)", days.len());
    Ok(days)
}
