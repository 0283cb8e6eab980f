// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Physical and model constants shared by the lunar models.

use qtty::Days;

/// Mean synodic month (New Moon to New Moon).
pub const SYNODIC_MONTH: Days = Days::new(29.530_588_853);

/// Julian Day of the reference New Moon used for lunar age (2000-01-06 00:00 UT).
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_549.5;

/// Mean Earth radius, km.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Mean Moon radius, km.
pub const MOON_RADIUS_KM: f64 = 1_737.4;

/// Astronomical unit, km.
pub const ASTRONOMICAL_UNIT_KM: f64 = 149_597_870.7;

/// Mean Earth–Moon distance, km.
pub const MEAN_MOON_DISTANCE_KM: f64 = 384_400.0;

/// Amplitude of the phase-locked distance wobble used by the phase model, km.
pub const PHASE_DISTANCE_AMPLITUDE_KM: f64 = 20_000.0;

/// Arcseconds per degree.
pub const ARCSEC_PER_DEGREE: f64 = 3_600.0;
