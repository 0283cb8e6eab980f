// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Topocentric ephemeris collaborator.
//!
//! The phase and position models of this crate are geocentric and coarse.
//! Anything that depends on where the observer stands (azimuth, altitude,
//! rise and set) or on the true Sun–Moon geometry (illuminated fraction) is
//! delegated to an [`EphemerisProvider`].  Every method is a pure function
//! of its arguments, so a provider can be shared freely across threads.
//!
//! [`LowPrecisionEphemeris`] is the bundled provider.  It evaluates the
//! classic truncated lunar and solar series (principal periodic term only,
//! fixed obliquity 23.4397°) and is good to a few tenths of a degree in
//! position and a few minutes in rise/set time.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::ASTRONOMICAL_UNIT_KM;
use crate::location::GeographicLocation;
use crate::Instant;
use qtty::Days;

/// Sun–Moon illumination geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonIllumination {
    /// Lunation fraction in `[0, 1)`: 0 New, 0.25 First Quarter, 0.5 Full.
    pub phase_fraction: f64,
    /// Illuminated fraction of the disk, `[0, 1]`.
    pub illuminated_fraction: f64,
    /// Sun–Moon–Earth angle, degrees: 180 at New Moon, 0 at Full Moon.
    pub phase_angle_deg: f64,
}

/// Horizontal coordinates of the Moon for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizontalPosition {
    /// Azimuth from north through east, radians in `[0, 2π)`.
    pub azimuth_rad: f64,
    /// Altitude above the horizon including refraction, radians.
    pub altitude_rad: f64,
    pub distance_km: f64,
    pub parallactic_angle_rad: f64,
}

/// Moonrise and moonset during one UT day.
///
/// When neither event happens the Moon stayed on one side of the horizon;
/// exactly one of `always_up` / `always_down` is then set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseSet {
    pub rise: Option<Instant>,
    pub set: Option<Instant>,
    pub always_up: bool,
    pub always_down: bool,
}

/// Source of topocentric lunar quantities.
pub trait EphemerisProvider {
    fn illumination_at(&self, instant: Instant) -> MoonIllumination;

    fn position_at(&self, instant: Instant, location: &GeographicLocation) -> HorizontalPosition;

    /// Rise and set during the UT day containing `instant`.
    fn rise_set_at(&self, instant: Instant, location: &GeographicLocation) -> RiseSet;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn illumination_at(&self, instant: Instant) -> MoonIllumination {
        (**self).illumination_at(instant)
    }

    fn position_at(&self, instant: Instant, location: &GeographicLocation) -> HorizontalPosition {
        (**self).position_at(instant, location)
    }

    fn rise_set_at(&self, instant: Instant, location: &GeographicLocation) -> RiseSet {
        (**self).rise_set_at(instant, location)
    }
}

// ---------------------------------------------------------------------------
// Low-precision series
// ---------------------------------------------------------------------------

const OBLIQUITY_RAD: f64 = 23.4397 * PI / 180.0;

/// Horizon depression used for rise/set: apparent radius minus parallax
/// plus refraction, folded into one constant.
const RISE_SET_HORIZON_RAD: f64 = 0.133 * PI / 180.0;

#[derive(Debug, Clone, Copy)]
struct Equatorial {
    ra: f64,
    dec: f64,
    distance_km: f64,
}

#[inline]
fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY_RAD.cos() - b.tan() * OBLIQUITY_RAD.sin()).atan2(l.cos())
}

#[inline]
fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY_RAD.cos() + b.cos() * OBLIQUITY_RAD.sin() * l.sin()).asin()
}

/// Local sidereal angle; `lw` is the west longitude in radians.
#[inline]
fn sidereal_time(d: f64, lw: f64) -> f64 {
    (280.16 + 360.985_623_5 * d).to_radians() - lw
}

#[inline]
fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Azimuth measured from south, westward.
#[inline]
fn azimuth_from_south(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

/// Bennett-style refraction for an altitude in radians; negative altitudes
/// are treated as the horizon.
#[inline]
fn refraction(h: f64) -> f64 {
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn sun_coords(d: f64) -> Equatorial {
    let m = (357.5291 + 0.985_600_28 * d).to_radians();
    let c = (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    let perihelion = 102.9372_f64.to_radians();
    let l = m + c + perihelion + PI;
    Equatorial {
        ra: right_ascension(l, 0.0),
        dec: declination(l, 0.0),
        distance_km: ASTRONOMICAL_UNIT_KM,
    }
}

fn moon_coords(d: f64) -> Equatorial {
    let l = (218.316 + 13.176_396 * d).to_radians();
    let m = (134.963 + 13.064_993 * d).to_radians();
    let f = (93.272 + 13.229_350 * d).to_radians();

    let lon = l + 6.289_f64.to_radians() * m.sin();
    let lat = 5.128_f64.to_radians() * f.sin();
    Equatorial {
        ra: right_ascension(lon, lat),
        dec: declination(lon, lat),
        distance_km: 385_001.0 - 20_905.0 * m.cos(),
    }
}

/// Bundled provider built on the truncated analytical series.
///
/// Stateless and `Copy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowPrecisionEphemeris;

impl LowPrecisionEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn altitude_above_horizon(&self, instant: Instant, location: &GeographicLocation) -> f64 {
        self.position_at(instant, location).altitude_rad - RISE_SET_HORIZON_RAD
    }
}

impl EphemerisProvider for LowPrecisionEphemeris {
    fn illumination_at(&self, instant: Instant) -> MoonIllumination {
        let d = instant.days_since_j2000();
        let sun = sun_coords(d);
        let moon = moon_coords(d);

        let elongation = (sun.dec.sin() * moon.dec.sin()
            + sun.dec.cos() * moon.dec.cos() * (sun.ra - moon.ra).cos())
        .clamp(-1.0, 1.0)
        .acos();
        let inc = (sun.distance_km * elongation.sin())
            .atan2(moon.distance_km - sun.distance_km * elongation.cos());
        let limb = (sun.dec.cos() * (sun.ra - moon.ra).sin()).atan2(
            sun.dec.sin() * moon.dec.cos()
                - sun.dec.cos() * moon.dec.sin() * (sun.ra - moon.ra).cos(),
        );
        let sign = if limb < 0.0 { -1.0 } else { 1.0 };

        MoonIllumination {
            phase_fraction: (0.5 + 0.5 * inc * sign / PI).rem_euclid(1.0),
            illuminated_fraction: (1.0 + inc.cos()) / 2.0,
            phase_angle_deg: inc.to_degrees(),
        }
    }

    fn position_at(&self, instant: Instant, location: &GeographicLocation) -> HorizontalPosition {
        let lw = -location.longitude_deg().to_radians();
        let phi = location.latitude_deg().to_radians();
        let d = instant.days_since_j2000();

        let c = moon_coords(d);
        let h = sidereal_time(d, lw) - c.ra;
        let geometric_alt = altitude(h, phi, c.dec);
        let parallactic = h
            .sin()
            .atan2(phi.tan() * c.dec.cos() - c.dec.sin() * h.cos());

        HorizontalPosition {
            azimuth_rad: (azimuth_from_south(h, phi, c.dec) + PI).rem_euclid(TAU),
            altitude_rad: (geometric_alt + refraction(geometric_alt)).min(FRAC_PI_2),
            distance_km: c.distance_km,
            parallactic_angle_rad: parallactic,
        }
    }

    /// Scan the UT day in two-hour windows, fitting a parabola through
    /// three hourly altitude samples and solving for horizon crossings.
    fn rise_set_at(&self, instant: Instant, location: &GeographicLocation) -> RiseSet {
        let midnight = Instant::new((instant.value() - 0.5).floor() + 0.5);
        let at_hour = |hour: f64| midnight + Days::new(hour / 24.0);

        let mut result = RiseSet::default();
        let mut rise_hour = None;
        let mut set_hour = None;

        let mut h0 = self.altitude_above_horizon(midnight, location);
        let mut ye = h0;

        let mut hour = 1.0;
        while hour <= 24.0 {
            let h1 = self.altitude_above_horizon(at_hour(hour), location);
            let h2 = self.altitude_above_horizon(at_hour(hour + 1.0), location);

            let a = (h0 + h2) / 2.0 - h1;
            let b = (h2 - h0) / 2.0;

            if a == 0.0 {
                ye = h1;
            } else {
                let xe = -b / (2.0 * a);
                ye = (a * xe + b) * xe + h1;
                let discriminant = b * b - 4.0 * a * h1;

                if discriminant >= 0.0 {
                    let dx = discriminant.sqrt() / (a.abs() * 2.0);
                    let mut x1 = xe - dx;
                    let x2 = xe + dx;
                    let mut roots = 0;
                    if x1.abs() <= 1.0 {
                        roots += 1;
                    }
                    if x2.abs() <= 1.0 {
                        roots += 1;
                    }
                    if x1 < -1.0 {
                        x1 = x2;
                    }

                    match roots {
                        1 if h0 < 0.0 => rise_hour = Some(hour + x1),
                        1 => set_hour = Some(hour + x1),
                        2 => {
                            let (r, s) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                            rise_hour = Some(hour + r);
                            set_hour = Some(hour + s);
                        }
                        _ => {}
                    }
                }
            }

            if rise_hour.is_some() && set_hour.is_some() {
                break;
            }
            h0 = h2;
            hour += 2.0;
        }

        result.rise = rise_hour.map(at_hour);
        result.set = set_hour.map(at_hour);
        if result.rise.is_none() && result.set.is_none() {
            if ye > 0.0 {
                result.always_up = true;
            } else {
                result.always_down = true;
            }
        }
        result
    }
}
