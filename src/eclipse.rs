// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Eclipse search.
//!
//! Two independent modes share one output shape, [`EclipseEvent`]:
//!
//! * **Catalog** ([`find_eclipses`]): a fixed table of known events is
//!   filtered by civil year.  Contact times are nominal offsets around the
//!   central instant (±60 min for C1/C4, ±30 min for C2/C3 on total
//!   eclipses) and visibility regions are canned labels.
//! * **Heuristic** ([`predict_eclipses`], [`predict_eclipses_with`]): the
//!   range is sampled every 14 days and samples lying close to New or Full
//!   Moon become solar or lunar candidates.  Magnitude and duration are
//!   **drawn at random** (magnitude in [0.5, 1.0], duration in
//!   [60, 240] s).  These fields carry no physical meaning; the mode exists
//!   for demonstration and load testing.  Real predictions need syzygy
//!   search plus shadow geometry (Besselian elements), behind the same
//!   output type.
//!
//! New Moon proximity is measured around the lunation boundary, so a phase
//! of 0.97 is as close to New Moon as 0.03; a check on `phase` alone would
//! miss the waning side.
//!
//! Both modes return events sorted by central instant, lunar before solar on
//! ties, and an empty list when the range is reversed.

use log::{debug, trace};
use qtty::{Days, Seconds};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::civil::CivilDateTime;
use crate::ephemeris::{EphemerisProvider, LowPrecisionEphemeris};
use crate::error::{LunarError, LunarResult};
use crate::period::Period;
use crate::Instant;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which body is eclipsed. `Lunar` orders before `Solar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EclipseKind {
    Lunar,
    Solar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EclipseClass {
    Total,
    Partial,
    /// Solar only.
    Annular,
    /// Solar only.
    Hybrid,
    /// Lunar only.
    Penumbral,
}

impl EclipseClass {
    /// Whether this classification can describe an eclipse of `kind`.
    pub const fn is_valid_for(self, kind: EclipseKind) -> bool {
        match self {
            EclipseClass::Total | EclipseClass::Partial => true,
            EclipseClass::Annular | EclipseClass::Hybrid => matches!(kind, EclipseKind::Solar),
            EclipseClass::Penumbral => matches!(kind, EclipseKind::Lunar),
        }
    }
}

impl fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EclipseKind::Lunar => "lunar",
            EclipseKind::Solar => "solar",
        })
    }
}

impl fmt::Display for EclipseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EclipseClass::Total => "total",
            EclipseClass::Partial => "partial",
            EclipseClass::Annular => "annular",
            EclipseClass::Hybrid => "hybrid",
            EclipseClass::Penumbral => "penumbral",
        })
    }
}

/// Contact instants C1 (first) through C4 (last).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contacts {
    pub c1: Option<Instant>,
    pub c2: Option<Instant>,
    pub c3: Option<Instant>,
    pub c4: Option<Instant>,
}

/// Outer contacts, minutes from the central instant.
const OUTER_CONTACT_MINUTES: f64 = 60.0;
/// Inner contacts (totality), minutes from the central instant.
const INNER_CONTACT_MINUTES: f64 = 30.0;

impl Contacts {
    /// Nominal contacts around `central`: C1/C4 always, C2/C3 for totals only.
    pub fn around(central: Instant, class: EclipseClass) -> Self {
        let minutes = |m: f64| Days::new(m / 1_440.0);
        let total = matches!(class, EclipseClass::Total);
        Self {
            c1: Some(central - minutes(OUTER_CONTACT_MINUTES)),
            c2: total.then(|| central - minutes(INNER_CONTACT_MINUTES)),
            c3: total.then(|| central + minutes(INNER_CONTACT_MINUTES)),
            c4: Some(central + minutes(OUTER_CONTACT_MINUTES)),
        }
    }

    /// The contacts that are present are strictly increasing.
    pub fn is_ordered(&self) -> bool {
        let present: Vec<Instant> = [self.c1, self.c2, self.c3, self.c4]
            .into_iter()
            .flatten()
            .collect();
        present.windows(2).all(|w| w[0] < w[1])
    }
}

/// One solar or lunar eclipse.
///
/// Fields are read-only so the kind/class pairing and the non-negative
/// magnitude and duration checked by [`EclipseEvent::new`] always hold.
/// Deserialization goes through the same checks and recomputes the
/// contacts from the central instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEclipseEvent"))]
pub struct EclipseEvent {
    id: String,
    kind: EclipseKind,
    class: EclipseClass,
    central: Instant,
    magnitude: f64,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_units::seconds"))]
    duration: Seconds,
    visibility: Vec<String>,
    contacts: Contacts,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawEclipseEvent {
    id: String,
    kind: EclipseKind,
    class: EclipseClass,
    central: Instant,
    magnitude: f64,
    #[serde(with = "crate::serde_units::seconds")]
    duration: Seconds,
    visibility: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEclipseEvent> for EclipseEvent {
    type Error = LunarError;

    fn try_from(raw: RawEclipseEvent) -> LunarResult<Self> {
        Self::new(
            raw.id,
            raw.kind,
            raw.class,
            raw.central,
            raw.magnitude,
            raw.duration,
            raw.visibility,
        )
    }
}

impl EclipseEvent {
    /// Build an event with nominal contacts, rejecting a classification that
    /// does not fit the kind or a negative magnitude or duration.
    pub fn new(
        id: impl Into<String>,
        kind: EclipseKind,
        class: EclipseClass,
        central: Instant,
        magnitude: f64,
        duration: Seconds,
        visibility: Vec<String>,
    ) -> LunarResult<Self> {
        let id = id.into();
        if !class.is_valid_for(kind) {
            return Err(LunarError::invalid_argument(format!(
                "{id}: a {kind} eclipse cannot be {class}"
            )));
        }
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(LunarError::invalid_argument(format!(
                "{id}: magnitude {magnitude} must be finite and >= 0"
            )));
        }
        if !duration.value().is_finite() || duration.value() < 0.0 {
            return Err(LunarError::invalid_argument(format!(
                "{id}: duration {duration} must be finite and >= 0"
            )));
        }
        let central = central.checked()?;
        Ok(Self {
            contacts: Contacts::around(central, class),
            id,
            kind,
            class,
            central,
            magnitude,
            duration,
            visibility,
        })
    }

    /// Stable identifier, unique within one result list.
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn kind(&self) -> EclipseKind {
        self.kind
    }

    #[inline]
    pub fn class(&self) -> EclipseClass {
        self.class
    }

    /// Instant of greatest eclipse.
    #[inline]
    pub fn central(&self) -> Instant {
        self.central
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn duration(&self) -> Seconds {
        self.duration
    }

    pub fn visibility(&self) -> &[String] {
        &self.visibility
    }

    #[inline]
    pub fn contacts(&self) -> Contacts {
        self.contacts
    }
}

/// Sort by central instant, lunar before solar on ties.
fn sort_events(events: &mut [EclipseEvent]) {
    events.sort_by(|a, b| {
        a.central
            .value()
            .total_cmp(&b.central.value())
            .then_with(|| a.kind.cmp(&b.kind))
    });
}

// ---------------------------------------------------------------------------
// Catalog mode
// ---------------------------------------------------------------------------

struct CatalogEntry {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    kind: EclipseKind,
    class: EclipseClass,
    magnitude: f64,
    duration_s: f64,
}

#[rustfmt::skip]
const CATALOG: [CatalogEntry; 4] = [
    CatalogEntry { year: 2024, month: 3,  day: 25, hour: 7,  minute: 0,  kind: EclipseKind::Lunar, class: EclipseClass::Penumbral, magnitude: 0.95,  duration_s: 280.0 },
    CatalogEntry { year: 2024, month: 4,  day: 8,  hour: 18, minute: 17, kind: EclipseKind::Solar, class: EclipseClass::Total,     magnitude: 1.057, duration_s: 268.0 },
    CatalogEntry { year: 2024, month: 9,  day: 18, hour: 2,  minute: 44, kind: EclipseKind::Lunar, class: EclipseClass::Partial,   magnitude: 0.083, duration_s: 183.0 },
    CatalogEntry { year: 2024, month: 10, day: 2,  hour: 18, minute: 45, kind: EclipseKind::Solar, class: EclipseClass::Annular,   magnitude: 0.932, duration_s: 445.0 },
];

fn catalog_regions(kind: EclipseKind) -> Vec<String> {
    let regions: &[&str] = match kind {
        EclipseKind::Solar => &["North America", "Pacific"],
        EclipseKind::Lunar => &["Global"],
    };
    regions.iter().map(|r| (*r).to_owned()).collect()
}

/// Catalog events whose civil year lies within the years of `start` and `end`.
///
/// Returns an empty list when `start > end`.
pub fn find_eclipses(start: Instant, end: Instant) -> LunarResult<Vec<EclipseEvent>> {
    let range = Period::new(start, end).checked()?;
    if range.is_reversed() {
        debug!("eclipse catalog: reversed range {range}, nothing to search");
        return Ok(Vec::new());
    }

    let first_year = range.start.to_civil()?.year;
    let last_year = range.end.to_civil()?.year;

    let mut events = Vec::new();
    for (index, entry) in CATALOG.iter().enumerate() {
        if entry.year < first_year || entry.year > last_year {
            continue;
        }
        let central =
            CivilDateTime::new(entry.year, entry.month, entry.day, entry.hour, entry.minute, 0, 0)?
                .to_julian_day();
        events.push(EclipseEvent::new(
            format!("eclipse-{}", index + 1),
            entry.kind,
            entry.class,
            central,
            entry.magnitude,
            Seconds::new(entry.duration_s),
            catalog_regions(entry.kind),
        )?);
    }

    sort_events(&mut events);
    debug!(
        "eclipse catalog: {} event(s) for years {first_year}..={last_year}",
        events.len()
    );
    Ok(events)
}

// ---------------------------------------------------------------------------
// Heuristic mode
// ---------------------------------------------------------------------------

/// Tuning of the heuristic scan.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Spacing between samples.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_units::days"))]
    pub step: Days,
    /// Largest distance, in lunation fraction, from New or Full Moon that
    /// still makes a candidate. Must lie in `(0, 0.5]`.
    pub tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step: Days::new(14.0),
            tolerance: 0.05,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> LunarResult<()> {
        if !(self.step.value().is_finite() && self.step.value() > 0.0) {
            return Err(LunarError::invalid_argument(format!(
                "search step {} must be positive",
                self.step
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance <= 0.5) {
            return Err(LunarError::invalid_argument(format!(
                "search tolerance {} outside (0, 0.5]",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Magnitude at or above which a heuristic candidate is labelled total.
const HEURISTIC_TOTAL_MAGNITUDE: f64 = 0.95;

/// Candidate kind for a lunation fraction, Full Moon checked first.
fn candidate_kind(phase: f64, tolerance: f64) -> Option<EclipseKind> {
    let from_full = (phase - 0.5).abs();
    let from_new = phase.min(1.0 - phase);
    if from_full < tolerance {
        Some(EclipseKind::Lunar)
    } else if from_new < tolerance {
        Some(EclipseKind::Solar)
    } else {
        None
    }
}

/// Heuristic scan with an explicit provider, random source and tuning.
///
/// Evaluates at most `⌊(end − start) / step⌋ + 1` samples.  Magnitude and
/// duration of every event are drawn from `rng`; seed it for reproducible
/// output.
pub fn predict_eclipses_with<P, R>(
    start: Instant,
    end: Instant,
    provider: &P,
    rng: &mut R,
    config: &SearchConfig,
) -> LunarResult<Vec<EclipseEvent>>
where
    P: EphemerisProvider + ?Sized,
    R: Rng,
{
    config.validate()?;
    let range = Period::new(start, end).checked()?;
    if range.is_reversed() {
        debug!("eclipse heuristic: reversed range {range}, nothing to search");
        return Ok(Vec::new());
    }

    let samples = range.samples(config.step);
    debug!(
        "eclipse heuristic: scanning {range} with {} sample(s)",
        samples.len()
    );

    let mut events = Vec::new();
    for instant in samples {
        let phase = provider.illumination_at(instant).phase_fraction;
        let Some(kind) = candidate_kind(phase, config.tolerance) else {
            continue;
        };
        trace!("eclipse heuristic: {kind} candidate at {instant} (phase {phase:.3})");

        let magnitude = rng.random_range(0.5..=1.0);
        let duration = Seconds::new(rng.random_range(60.0..=240.0));
        let class = if magnitude >= HEURISTIC_TOTAL_MAGNITUDE {
            EclipseClass::Total
        } else {
            EclipseClass::Partial
        };
        let visibility = match kind {
            EclipseKind::Lunar => vec!["Global".to_owned()],
            EclipseKind::Solar => vec!["Regional".to_owned()],
        };

        events.push(EclipseEvent::new(
            format!("predicted-{}", events.len() + 1),
            kind,
            class,
            instant,
            magnitude,
            duration,
            visibility,
        )?);
    }

    sort_events(&mut events);
    debug!("eclipse heuristic: {} candidate(s)", events.len());
    Ok(events)
}

/// Heuristic scan with the bundled provider, the thread-local RNG and the
/// default 14-day / 0.05 tuning.
pub fn predict_eclipses(start: Instant, end: Instant) -> LunarResult<Vec<EclipseEvent>> {
    predict_eclipses_with(
        start,
        end,
        &LowPrecisionEphemeris,
        &mut rand::rng(),
        &SearchConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ymd(year: i32, month: u32, day: u32) -> Instant {
        CivilDateTime::midnight(year, month, day).unwrap().to_julian_day()
    }

    #[test]
    fn test_class_domain() {
        use EclipseClass::*;
        use EclipseKind::*;
        assert!(Total.is_valid_for(Lunar) && Total.is_valid_for(Solar));
        assert!(Partial.is_valid_for(Lunar) && Partial.is_valid_for(Solar));
        assert!(Penumbral.is_valid_for(Lunar) && !Penumbral.is_valid_for(Solar));
        assert!(Annular.is_valid_for(Solar) && !Annular.is_valid_for(Lunar));
        assert!(Hybrid.is_valid_for(Solar) && !Hybrid.is_valid_for(Lunar));
    }

    #[test]
    fn test_new_rejects_inconsistent_class() {
        let err = EclipseEvent::new(
            "x",
            EclipseKind::Lunar,
            EclipseClass::Annular,
            ymd(2024, 1, 1),
            0.5,
            Seconds::new(10.0),
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("lunar eclipse cannot be annular"));
    }

    #[test]
    fn test_new_rejects_negative_values() {
        let t = ymd(2024, 1, 1);
        let build = |magnitude: f64, duration: f64| {
            EclipseEvent::new(
                "x",
                EclipseKind::Solar,
                EclipseClass::Partial,
                t,
                magnitude,
                Seconds::new(duration),
                vec![],
            )
        };
        assert!(build(-0.1, 1.0).is_err());
        assert!(build(0.1, -1.0).is_err());
        assert!(build(f64::NAN, 1.0).is_err());
        assert!(build(0.1, 1.0).is_ok());
    }

    #[test]
    fn test_contacts_for_total_are_ordered() {
        let c = Contacts::around(ymd(2024, 4, 8), EclipseClass::Total);
        assert!(c.c1.is_some() && c.c2.is_some() && c.c3.is_some() && c.c4.is_some());
        assert!(c.is_ordered());
        let c1_to_c4 = c.c4.unwrap() - c.c1.unwrap();
        assert!((c1_to_c4.value() - 120.0 / 1_440.0).abs() < 1e-9);
    }

    #[test]
    fn test_contacts_for_partial_skip_inner() {
        let c = Contacts::around(ymd(2024, 9, 18), EclipseClass::Partial);
        assert!(c.c2.is_none() && c.c3.is_none());
        assert!(c.is_ordered());
    }

    #[test]
    fn test_catalog_2024() {
        let events = find_eclipses(ymd(2024, 1, 1), ymd(2024, 12, 31)).unwrap();
        let dates: Vec<(i32, u32, u32)> = events
            .iter()
            .map(|e| {
                let c = e.central().to_civil().unwrap();
                (c.year, c.month, c.day)
            })
            .collect();
        assert_eq!(
            dates,
            vec![(2024, 3, 25), (2024, 4, 8), (2024, 9, 18), (2024, 10, 2)]
        );
        assert_eq!(events[1].id(), "eclipse-2");
        assert_eq!(events[1].visibility(), ["North America", "Pacific"]);
        assert_eq!(events[0].visibility(), ["Global"]);
        assert!(events.iter().all(|e| e.contacts().is_ordered()));
    }

    #[test]
    fn test_catalog_outside_years_is_empty() {
        assert!(find_eclipses(ymd(2025, 1, 1), ymd(2030, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_reversed_is_empty() {
        assert!(find_eclipses(ymd(2024, 12, 31), ymd(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_rejects_nan() {
        assert!(find_eclipses(Instant::new(f64::NAN), ymd(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_candidate_kinds() {
        assert_eq!(candidate_kind(0.5, 0.05), Some(EclipseKind::Lunar));
        assert_eq!(candidate_kind(0.01, 0.05), Some(EclipseKind::Solar));
        assert_eq!(candidate_kind(0.98, 0.05), Some(EclipseKind::Solar));
        assert_eq!(candidate_kind(0.25, 0.05), None);
    }

    #[test]
    fn test_heuristic_values_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let events = predict_eclipses_with(
            ymd(2020, 1, 1),
            ymd(2030, 1, 1),
            &LowPrecisionEphemeris,
            &mut rng,
            &SearchConfig::default(),
        )
        .unwrap();
        assert!(!events.is_empty());
        for e in &events {
            assert!((0.5..=1.0).contains(&e.magnitude()));
            assert!((60.0..=240.0).contains(&e.duration().value()));
            assert!(e.class().is_valid_for(e.kind()));
            assert!(e.contacts().is_ordered());
        }
        assert!(events.windows(2).all(|w| w[0].central() <= w[1].central()));
    }

    #[test]
    fn test_heuristic_is_reproducible_with_seed() {
        let run = || {
            predict_eclipses_with(
                ymd(2024, 1, 1),
                ymd(2026, 1, 1),
                &LowPrecisionEphemeris,
                &mut StdRng::seed_from_u64(7),
                &SearchConfig::default(),
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_heuristic_wide_tolerance_takes_every_sample() {
        let config = SearchConfig {
            step: Days::new(14.0),
            tolerance: 0.5,
        };
        let events = predict_eclipses_with(
            ymd(2024, 1, 1),
            ymd(2024, 12, 31),
            &LowPrecisionEphemeris,
            &mut StdRng::seed_from_u64(1),
            &config,
        )
        .unwrap();
        // 365 days / 14 → 27 samples
        assert_eq!(events.len(), 27);
    }

    #[test]
    fn test_heuristic_rejects_bad_config() {
        let mut rng = StdRng::seed_from_u64(1);
        for config in [
            SearchConfig {
                step: Days::new(0.0),
                tolerance: 0.05,
            },
            SearchConfig {
                step: Days::new(14.0),
                tolerance: 0.0,
            },
            SearchConfig {
                step: Days::new(14.0),
                tolerance: 0.75,
            },
        ] {
            let result = predict_eclipses_with(
                ymd(2024, 1, 1),
                ymd(2024, 2, 1),
                &LowPrecisionEphemeris,
                &mut rng,
                &config,
            );
            assert!(result.is_err(), "{config:?} accepted");
        }
    }

    #[test]
    fn test_heuristic_reversed_is_empty() {
        assert!(predict_eclipses(ymd(2024, 2, 1), ymd(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_sort_puts_lunar_first_on_ties() {
        let t = ymd(2024, 6, 1);
        let event = |id: &str, kind, central| {
            EclipseEvent::new(
                id,
                kind,
                EclipseClass::Partial,
                central,
                0.6,
                Seconds::new(90.0),
                vec![],
            )
            .unwrap()
        };
        let mut events = vec![
            event("late", EclipseKind::Solar, t + Days::new(1.0)),
            event("tie-solar", EclipseKind::Solar, t),
            event("tie-lunar", EclipseKind::Lunar, t),
        ];

        sort_events(&mut events);

        let ids: Vec<&str> = events.iter().map(|e| e.id()).collect();
        assert_eq!(ids, ["tie-lunar", "tie-solar", "late"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_invalid_event() {
        let bad_class = r#"{"id":"x","kind":"Lunar","class":"Hybrid","central":2460395.8,
            "magnitude":0.5,"duration":60.0,"visibility":[]}"#;
        assert!(serde_json::from_str::<EclipseEvent>(bad_class).is_err());

        let bad_magnitude = r#"{"id":"x","kind":"Solar","class":"Partial","central":2460395.8,
            "magnitude":-3.0,"duration":60.0,"visibility":[]}"#;
        assert!(serde_json::from_str::<EclipseEvent>(bad_magnitude).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_recomputes_contacts() {
        let event = &find_eclipses(ymd(2024, 1, 1), ymd(2024, 12, 31)).unwrap()[1];
        let json = serde_json::to_string(event).unwrap();
        let back: EclipseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, event);
        assert!(back.contacts().is_ordered());
    }
}
