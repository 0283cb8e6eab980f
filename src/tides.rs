// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coarse tide window.
//!
//! This is a fixed-phase placeholder, not a harmonic tide model: over the 24
//! hours following the reference instant, samples are taken every 6 hours;
//! samples on a 12-hour boundary are tagged high water and the others low
//! water.  The Moon's altitude at each sample is read from the provider and
//! reported for display, but it does not move the tide times.

use log::trace;
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ephemeris::EphemerisProvider;
use crate::location::GeographicLocation;
use crate::period::Period;
use crate::Instant;

const SAMPLE_STEP_HOURS: f64 = 6.0;
const WINDOW_HOURS: f64 = 24.0;
const HIGH_TIDE_PERIOD_HOURS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TideKind {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TideEvent {
    pub kind: TideKind,
    pub instant: Instant,
    /// Moon altitude at `instant`, degrees. Informational only.
    pub moon_altitude_deg: f64,
}

/// High and low tides over one day, in time order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TideWindow {
    pub reference: Instant,
    pub events: Vec<TideEvent>,
    /// First high tide strictly after `reference`.
    pub next_high: Option<Instant>,
    /// First low tide strictly after `reference`.
    pub next_low: Option<Instant>,
}

impl TideWindow {
    pub fn highs(&self) -> impl Iterator<Item = Instant> + '_ {
        self.of_kind(TideKind::High)
    }

    pub fn lows(&self) -> impl Iterator<Item = Instant> + '_ {
        self.of_kind(TideKind::Low)
    }

    fn of_kind(&self, kind: TideKind) -> impl Iterator<Item = Instant> + '_ {
        self.events
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.instant)
    }

    /// Events are strictly increasing in time and alternate high/low.
    pub fn alternates(&self) -> bool {
        self.events
            .windows(2)
            .all(|w| w[0].kind != w[1].kind && w[0].instant < w[1].instant)
    }
}

/// Tide window for the 24 hours starting at `instant`.
pub fn tides_for<P>(instant: Instant, location: &GeographicLocation, provider: &P) -> TideWindow
where
    P: EphemerisProvider + ?Sized,
{
    let step = Days::new(SAMPLE_STEP_HOURS / 24.0);
    // half-open window: the sample at +24 h belongs to the next day
    let last = instant + Days::new((WINDOW_HOURS - SAMPLE_STEP_HOURS) / 24.0);

    let events: Vec<TideEvent> = Period::new(instant, last)
        .samples(step)
        .enumerate()
        .map(|(i, sample)| {
            let offset_hours = i as f64 * SAMPLE_STEP_HOURS;
            let kind = if offset_hours % HIGH_TIDE_PERIOD_HOURS == 0.0 {
                TideKind::High
            } else {
                TideKind::Low
            };
            let moon_altitude_deg = provider
                .position_at(sample, location)
                .altitude_rad
                .to_degrees();
            trace!("tide sample +{offset_hours}h: {kind:?}, moon altitude {moon_altitude_deg:.1}°");
            TideEvent {
                kind,
                instant: sample,
                moon_altitude_deg,
            }
        })
        .collect();

    let first_after = |kind: TideKind| {
        events
            .iter()
            .find(|e| e.kind == kind && e.instant > instant)
            .map(|e| e.instant)
    };

    TideWindow {
        reference: instant,
        next_high: first_after(TideKind::High),
        next_low: first_after(TideKind::Low),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::LowPrecisionEphemeris;

    fn window() -> TideWindow {
        tides_for(
            Instant::new(2_460_400.5),
            &GeographicLocation::greenwich(),
            &LowPrecisionEphemeris,
        )
    }

    #[test]
    fn test_four_samples_two_of_each() {
        let w = window();
        assert_eq!(w.events.len(), 4);
        assert_eq!(w.highs().count(), 2);
        assert_eq!(w.lows().count(), 2);
        assert_eq!(w.events[0].kind, TideKind::High);
        assert_eq!(w.events[1].kind, TideKind::Low);
    }

    #[test]
    fn test_strictly_alternating() {
        assert!(window().alternates());
    }

    #[test]
    fn test_next_pointers_are_after_reference() {
        let w = window();
        let high = w.next_high.unwrap();
        let low = w.next_low.unwrap();
        assert!(high > w.reference && low > w.reference);
        assert!(((high - w.reference).value() - 0.5).abs() < 1e-9);
        assert!(((low - w.reference).value() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_altitudes_are_physical() {
        for e in window().events {
            assert!((-90.0..=90.0).contains(&e.moon_altitude_deg));
        }
    }

    #[test]
    fn test_window_stays_within_one_day() {
        let w = window();
        let span = w.events.last().unwrap().instant - w.reference;
        assert!(span.value() < 1.0);
    }
}
