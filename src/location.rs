// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location on the Earth's surface.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LunarError, LunarResult};

/// Geographic site of an observer.
///
/// Latitude and longitude are geodetic degrees, east and north positive.
/// Elevation, name and timezone are carried for the caller; the models only
/// read latitude and longitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLocation"))]
pub struct GeographicLocation {
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: f64,
    name: String,
    timezone: String,
}

/// Unchecked wire form; every deserialized site goes through
/// [`GeographicLocation::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLocation {
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: f64,
    name: String,
    timezone: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLocation> for GeographicLocation {
    type Error = LunarError;

    fn try_from(raw: RawLocation) -> LunarResult<Self> {
        Self::new(
            raw.latitude_deg,
            raw.longitude_deg,
            raw.elevation_m,
            raw.name,
            raw.timezone,
        )
    }
}

impl GeographicLocation {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        name: impl Into<String>,
        timezone: impl Into<String>,
    ) -> LunarResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(LunarError::invalid_argument(format!(
                "latitude {latitude_deg} outside [-90, 90]"
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(LunarError::invalid_argument(format!(
                "longitude {longitude_deg} outside [-180, 180]"
            )));
        }
        if !elevation_m.is_finite() {
            return Err(LunarError::invalid_argument(format!(
                "elevation {elevation_m} is not finite"
            )));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
            name: name.into(),
            timezone: timezone.into(),
        })
    }

    /// Sea-level site at latitude 0°, longitude 0°.
    pub fn null_island() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            elevation_m: 0.0,
            name: "Null Island".to_owned(),
            timezone: "UTC".to_owned(),
        }
    }

    /// Royal Observatory, Greenwich.
    pub fn greenwich() -> Self {
        Self {
            latitude_deg: 51.4769,
            longitude_deg: 0.0,
            elevation_m: 46.0,
            name: "Greenwich".to_owned(),
            timezone: "Europe/London".to_owned(),
        }
    }

    #[inline]
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    #[inline]
    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    #[inline]
    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}
