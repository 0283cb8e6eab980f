// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar phase from the mean synodic month.
//!
//! The phase model is purely arithmetic: lunar age is the time elapsed since
//! a reference New Moon, folded into one synodic month.  It ignores the
//! ±14 h irregularity of real lunations, so phase times are good to roughly
//! half a day.
//!
//! | phase      | name            |
//! |------------|-----------------|
//! | [0, 1/16)  | New Moon        |
//! | [1/16, 3/16) | Waxing Crescent |
//! | [3/16, 5/16) | First Quarter |
//! | [5/16, 7/16) | Waxing Gibbous |
//! | [7/16, 9/16) | Full Moon     |
//! | [9/16, 11/16) | Waning Gibbous |
//! | [11/16, 13/16) | Last Quarter |
//! | [13/16, 15/16) | Waning Crescent |
//! | [15/16, 1) | New Moon        |

use qtty::Days;
use std::f64::consts::TAU;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    ARCSEC_PER_DEGREE, MEAN_MOON_DISTANCE_KM, MOON_RADIUS_KM, PHASE_DISTANCE_AMPLITUDE_KM,
    REFERENCE_NEW_MOON_JD, SYNODIC_MONTH,
};
use crate::Instant;

/// The eight canonical phase names, in waxing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    /// The four principal phases, in the order they occur.
    pub const CARDINAL: [PhaseName; 4] = [
        PhaseName::NewMoon,
        PhaseName::FirstQuarter,
        PhaseName::FullMoon,
        PhaseName::LastQuarter,
    ];

    /// Bin a phase fraction into one of eight 1/8-wide buckets centred on
    /// the named phase. Values outside `[0, 1)` are folded first.
    pub fn from_phase(phase: f64) -> Self {
        let p = phase.rem_euclid(1.0);
        if !(0.0625..0.9375).contains(&p) {
            PhaseName::NewMoon
        } else if p < 0.1875 {
            PhaseName::WaxingCrescent
        } else if p < 0.3125 {
            PhaseName::FirstQuarter
        } else if p < 0.4375 {
            PhaseName::WaxingGibbous
        } else if p < 0.5625 {
            PhaseName::FullMoon
        } else if p < 0.6875 {
            PhaseName::WaningGibbous
        } else if p < 0.8125 {
            PhaseName::LastQuarter
        } else {
            PhaseName::WaningCrescent
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    pub const fn is_cardinal(&self) -> bool {
        matches!(
            self,
            PhaseName::NewMoon
                | PhaseName::FirstQuarter
                | PhaseName::FullMoon
                | PhaseName::LastQuarter
        )
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase state of the Moon at one instant.
///
/// `distance_km` and `angular_size_arcsec` come from a phase-locked
/// approximation (mean distance ± 20 000 km over the lunation), not from the
/// anomalistic cycle; use [`geocentric_position`](crate::geocentric_position)
/// for a distance that follows perigee and apogee.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarPhase {
    pub name: PhaseName,
    /// Illuminated percentage of the disk, `[0, 100]`, one decimal.
    pub illumination: f64,
    /// Days since the last mean New Moon, one decimal.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_units::days"))]
    pub age: Days,
    /// Fraction of the lunation elapsed, `[0, 1)`, three decimals.
    pub phase: f64,
    pub distance_km: f64,
    pub angular_size_arcsec: f64,
}

/// The next principal phase after an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NextPhase {
    pub name: PhaseName,
    pub instant: Instant,
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Days since the reference New Moon, folded into `[0, SYNODIC_MONTH)`.
pub fn lunar_age(instant: Instant) -> Days {
    let period = SYNODIC_MONTH.value();
    let age = (instant.value() - REFERENCE_NEW_MOON_JD).rem_euclid(period);
    // rem_euclid can return `period` itself for tiny negative inputs
    Days::new(if age >= period { 0.0 } else { age })
}

/// Unrounded phase fraction in `[0, 1)`.
pub fn phase_fraction(instant: Instant) -> f64 {
    lunar_age(instant).value() / SYNODIC_MONTH.value()
}

/// Illuminated percentage for a phase fraction, unrounded.
///
/// Symmetric about Full Moon: `illumination_percent(p) == illumination_percent(1 - p)`.
#[inline]
pub fn illumination_percent(phase: f64) -> f64 {
    (1.0 - (TAU * phase).cos()) / 2.0 * 100.0
}

/// Phase, illumination, age and apparent size of the Moon at `instant`.
pub fn phase_at(instant: Instant) -> LunarPhase {
    let age = lunar_age(instant);
    let phase = age.value() / SYNODIC_MONTH.value();

    let distance_km = MEAN_MOON_DISTANCE_KM + PHASE_DISTANCE_AMPLITUDE_KM * (TAU * phase).sin();
    let angular_size_arcsec =
        2.0 * (MOON_RADIUS_KM / distance_km).atan().to_degrees() * ARCSEC_PER_DEGREE;

    let mut rounded_phase = round_to(phase, 3);
    if rounded_phase >= 1.0 {
        rounded_phase = 0.0;
    }

    LunarPhase {
        name: PhaseName::from_phase(phase),
        illumination: round_to(illumination_percent(phase), 1).clamp(0.0, 100.0),
        age: Days::new(round_to(age.value(), 1)),
        phase: rounded_phase,
        distance_km: distance_km.round(),
        angular_size_arcsec: round_to(angular_size_arcsec, 1),
    }
}

/// Next New, First Quarter, Full or Last Quarter Moon strictly after `instant`.
///
/// The boundary is the next multiple of a quarter lunation, `ceil(4·phase)/4`;
/// an instant sitting exactly on a boundary advances to the following one.
pub fn next_phase(instant: Instant) -> NextPhase {
    let phase = phase_fraction(instant);
    let mut quarter = (phase * 4.0).ceil();
    if quarter <= phase * 4.0 {
        quarter += 1.0;
    }
    let days_ahead = (quarter / 4.0 - phase) * SYNODIC_MONTH.value();
    NextPhase {
        name: PhaseName::CARDINAL[(quarter as usize) % 4],
        instant: instant + Days::new(days_ahead),
    }
}
