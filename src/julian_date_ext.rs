// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day (`Time<JD>`) specific extensions.

use qtty::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::civil::CivilDateTime;
use super::delta_t::delta_t_seconds;
use super::error::LunarResult;
use super::instant::Time;
use super::scales::{JD, TT};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0, the argument of the lunar mean elements.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Days elapsed since J2000.0.
    #[inline]
    pub fn days_since_j2000(&self) -> f64 {
        (*self - Self::J2000).value()
    }

    /// Instant of a civil UT date-time.
    #[inline]
    pub fn from_civil(civil: &CivilDateTime) -> Self {
        civil.to_julian_day()
    }

    /// Civil UT date-time of this instant, to the millisecond.
    #[inline]
    pub fn to_civil(&self) -> LunarResult<CivilDateTime> {
        CivilDateTime::from_julian_day(*self)
    }

    /// ΔT = TT − UT at this instant.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(self.quantity())
    }

    /// The same instant on the Terrestrial Time scale.
    #[inline]
    pub fn to_tt(&self) -> Time<TT> {
        self.to::<TT>()
    }
}

/// Time readout of a single instant: the UT instant itself, its raw Julian
/// Day and the ΔT correction a dynamical ephemeris would need.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeData {
    pub utc: Time<JD>,
    pub jd: f64,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_units::seconds"))]
    pub delta_t: Seconds,
}

impl TimeData {
    pub fn at(instant: Time<JD>) -> Self {
        Self {
            utc: instant,
            jd: instant.value(),
            delta_t: instant.delta_t(),
        }
    }
}
