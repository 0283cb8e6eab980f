// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Approximate lunar position.
//!
//! The geocentric part uses the mean longitude, mean anomaly and argument of
//! latitude with a single periodic term each.  Right ascension and
//! declination are **taken directly** from the ecliptic longitude and
//! latitude: the ecliptic→equatorial rotation is skipped, so declination
//! errors reach the obliquity (≈23°).  Treat RA/Dec as an ecliptic-aligned
//! readout, not as equatorial coordinates for pointing.
//!
//! Topocentric azimuth and altitude come from an
//! [`EphemerisProvider`](crate::EphemerisProvider).  Libration is not
//! modelled and is always reported as zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{ARCSEC_PER_DEGREE, EARTH_RADIUS_KM};
use crate::ephemeris::EphemerisProvider;
use crate::location::GeographicLocation;
use crate::Instant;

/// Geocentric readout of the simplified lunar theory. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeocentricPosition {
    pub ecliptic_longitude_deg: f64,
    pub ecliptic_latitude_deg: f64,
    /// `[0, 360)`, equal to the ecliptic longitude.
    pub right_ascension_deg: f64,
    /// Equal to the ecliptic latitude.
    pub declination_deg: f64,
    pub distance_km: f64,
    pub parallax_deg: f64,
}

/// Optical libration. Always zero in this model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Libration {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

/// Lunar position for an observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarPosition {
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
    /// From north through east, `[0, 360)`.
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    /// Geocentric distance, whole kilometres.
    pub distance_km: f64,
    pub parallax_arcsec: f64,
    pub libration: Libration,
}

/// Evaluate the simplified geocentric lunar theory.
pub fn geocentric_position(instant: Instant) -> GeocentricPosition {
    let t = instant.julian_centuries().value();

    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let mean_anomaly = (134.963_396_4 + 477_198.867_505_5 * t).to_radians();
    let argument_of_latitude = (93.272_095_0 + 483_202.017_523_3 * t).to_radians();

    let longitude = mean_longitude + 6.288_774 * mean_anomaly.sin();
    let latitude = 5.128_122 * argument_of_latitude.sin();
    let distance_km = 385_000.0 - 20_905.0 * mean_anomaly.cos();

    GeocentricPosition {
        ecliptic_longitude_deg: longitude.rem_euclid(360.0),
        ecliptic_latitude_deg: latitude,
        right_ascension_deg: longitude.rem_euclid(360.0),
        declination_deg: latitude,
        distance_km,
        parallax_deg: (EARTH_RADIUS_KM / distance_km).asin().to_degrees(),
    }
}

/// Combine the geocentric model with the provider's horizontal coordinates.
pub fn position_at<P>(
    instant: Instant,
    location: &GeographicLocation,
    provider: &P,
) -> LunarPosition
where
    P: EphemerisProvider + ?Sized,
{
    let geo = geocentric_position(instant);
    let horizontal = provider.position_at(instant, location);

    LunarPosition {
        right_ascension_deg: geo.right_ascension_deg,
        declination_deg: geo.declination_deg,
        azimuth_deg: horizontal.azimuth_rad.to_degrees().rem_euclid(360.0),
        altitude_deg: horizontal.altitude_rad.to_degrees(),
        distance_km: geo.distance_km.round(),
        parallax_arcsec: geo.parallax_deg * ARCSEC_PER_DEGREE,
        libration: Libration::default(),
    }
}
