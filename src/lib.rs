// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar ephemeris toolkit
//!
//! Approximate lunar phase, position, eclipse and tide computations for
//! astronomy dashboards.  Every model here is a low-precision mean-element
//! approximation, good for display and rough planning, not for occultation
//! timing or navigation.
//!
//! # Time
//!
//! All computations take an [`Instant`], a Julian Day on the UT axis
//! (`Time<JD>`).  The generic [`Time<S>`] carries the same instant on other
//! scales:
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date (UT) |
//! | [`TT`] | Terrestrial Time, `UT + ΔT` |
//!
//! [`CivilDateTime`] converts proleptic-Gregorian UTC dates to and from
//! Julian Days with millisecond resolution.
//!
//! # Lunar models
//!
//! - [`phase_at`] / [`next_phase`]: mean-synodic-month phase and the next
//!   principal phase.
//! - [`geocentric_position`] / [`position_at`]: simplified lunar theory plus
//!   provider-supplied horizontal coordinates.
//! - [`find_eclipses`] / [`predict_eclipses_with`]: a fixed 2024 catalog and
//!   a randomised near-syzygy scan.
//! - [`tides_for`]: a fixed-phase high/low tide window.
//! - [`month_calendar`]: one phase readout per day of a month.
//! - [`LunarSnapshot`]: all of the above for one observer and instant.
//!
//! Topocentric quantities come from an [`EphemerisProvider`];
//! [`LowPrecisionEphemeris`] is the bundled one.
//!
//! ```
//! use lunar_ephem::{phase_at, CivilDateTime, PhaseName};
//!
//! let full = CivilDateTime::new(2000, 1, 21, 4, 40, 0, 0).unwrap().to_julian_day();
//! assert_eq!(phase_at(full).name, PhaseName::FullMoon);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every public value type.

mod calendar;
mod civil;
pub mod constants;
mod delta_t;
mod eclipse;
mod ephemeris;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
mod location;
mod period;
mod phase;
mod position;
pub(crate) mod scales;
#[cfg(feature = "serde")]
mod serde_units;
mod snapshot;
mod tides;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{month_calendar, CalendarDay};
pub use civil::{days_in_month, is_leap_year, CivilDateTime};
pub use delta_t::delta_t_seconds;
pub use eclipse::{
    find_eclipses, predict_eclipses, predict_eclipses_with, Contacts, EclipseClass, EclipseEvent,
    EclipseKind, SearchConfig,
};
pub use ephemeris::{
    EphemerisProvider, HorizontalPosition, LowPrecisionEphemeris, MoonIllumination, RiseSet,
};
pub use error::{LunarError, LunarResult};
pub use instant::{Time, TimeScale};
pub use julian_date_ext::TimeData;
pub use location::GeographicLocation;
pub use period::{Period, Samples};
pub use phase::{
    illumination_percent, lunar_age, next_phase, phase_at, phase_fraction, LunarPhase, NextPhase,
    PhaseName,
};
pub use position::{geocentric_position, position_at, GeocentricPosition, Libration, LunarPosition};
pub use scales::{JD, TT};
pub use snapshot::{distance_history, DistanceSample, LunarSnapshot};
pub use tides::{tides_for, TideEvent, TideKind, TideWindow};

// ── Type aliases ──────────────────────────────────────────────────────────

/// A point on the JD(UT) axis.
///
/// This is a type alias for [`Time<JD>`]; every lunar computation in the
/// crate takes and returns this type.
pub type Instant = Time<JD>;

/// Terrestrial Time, the dynamical scale offset from UT by ΔT.
///
/// This is a type alias for [`Time<TT>`].
pub type TerrestrialTime = Time<TT>;
