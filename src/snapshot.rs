// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Aggregated lunar readouts for one observer and instant.

use log::debug;
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisProvider, HorizontalPosition, MoonIllumination, RiseSet};
use crate::location::GeographicLocation;
use crate::period::Period;
use crate::phase::{next_phase, phase_at, LunarPhase, NextPhase, PhaseName};
use crate::position::{position_at, LunarPosition};
use crate::tides::{tides_for, TideWindow};
use crate::Instant;

/// Everything a dashboard shows for one moment.
///
/// `phase` and `position` come from the crate's own mean-element models;
/// `illumination`, `horizontal` and `rise_set` are the provider's. The two
/// phase readouts can differ by a few percent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarSnapshot {
    pub instant: Instant,
    pub phase: LunarPhase,
    pub next_phase: NextPhase,
    pub illumination: MoonIllumination,
    /// Phase name derived from the provider's phase fraction.
    pub provider_phase_name: PhaseName,
    pub position: LunarPosition,
    pub horizontal: HorizontalPosition,
    pub rise_set: RiseSet,
    pub tides: TideWindow,
}

impl LunarSnapshot {
    pub fn capture<P>(instant: Instant, location: &GeographicLocation, provider: &P) -> Self
    where
        P: EphemerisProvider + ?Sized,
    {
        let illumination = provider.illumination_at(instant);
        let snapshot = Self {
            instant,
            phase: phase_at(instant),
            next_phase: next_phase(instant),
            provider_phase_name: PhaseName::from_phase(illumination.phase_fraction),
            illumination,
            position: position_at(instant, location, provider),
            horizontal: provider.position_at(instant, location),
            rise_set: provider.rise_set_at(instant, location),
            tides: tides_for(instant, location, provider),
        };
        debug!(
            "snapshot at {instant} for {}: {} ({:.1}%)",
            location.name(),
            snapshot.phase.name,
            snapshot.phase.illumination
        );
        snapshot
    }
}

/// Provider distance and altitude for one day of a [`distance_history`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceSample {
    pub instant: Instant,
    pub distance_km: f64,
    pub altitude_deg: f64,
}

/// Daily samples from `end - days` to `end` inclusive, oldest first, taken
/// at latitude 0, longitude 0.
pub fn distance_history<P>(provider: &P, end: Instant, days: u32) -> Vec<DistanceSample>
where
    P: EphemerisProvider + ?Sized,
{
    let origin = GeographicLocation::null_island();
    let start = end - Days::new(f64::from(days));

    Period::new(start, end)
        .samples(Days::new(1.0))
        .map(|instant| {
            let horizontal = provider.position_at(instant, &origin);
            DistanceSample {
                instant,
                distance_km: horizontal.distance_km,
                altitude_deg: horizontal.altitude_rad.to_degrees(),
            }
        })
        .collect()
}
