use approx::assert_abs_diff_eq;
use chrono::{DateTime, Datelike};
use qtty::{Days, Second};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lunar_ephem::{
    find_eclipses, illumination_percent, month_calendar, phase_at, predict_eclipses_with,
    tides_for, CivilDateTime, EclipseClass, EclipseEvent, EclipseKind, GeographicLocation,
    Instant, LowPrecisionEphemeris, LunarSnapshot, PhaseName, SearchConfig, TerrestrialTime,
    TT, JD,
};

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Instant {
    CivilDateTime::new(year, month, day, hour, minute, 0, 0)
        .unwrap()
        .to_julian_day()
}

fn assert_contacts_and_class(event: &EclipseEvent) {
    let c = event.contacts();
    if let (Some(c1), Some(c2), Some(c3), Some(c4)) = (c.c1, c.c2, c.c3, c.c4) {
        assert!(c1 < c2 && c2 < c3 && c3 < c4, "{event:?}");
    }
    let allowed: &[EclipseClass] = match event.kind() {
        EclipseKind::Lunar => &[
            EclipseClass::Total,
            EclipseClass::Partial,
            EclipseClass::Penumbral,
        ],
        EclipseKind::Solar => &[
            EclipseClass::Total,
            EclipseClass::Partial,
            EclipseClass::Annular,
            EclipseClass::Hybrid,
        ],
    };
    assert!(allowed.contains(&event.class()), "{event:?}");
}

#[test]
fn civil_roundtrip_within_one_second() {
    let dates = [
        (1582, 10, 15, 0, 0, 0),
        (1899, 12, 31, 23, 59, 59),
        (2000, 2, 29, 12, 0, 0),
        (2024, 7, 14, 6, 30, 15),
        (2100, 3, 1, 18, 45, 1),
    ];
    for (y, mo, d, h, mi, s) in dates {
        let civil = CivilDateTime::new(y, mo, d, h, mi, s, 0).unwrap();
        let back = CivilDateTime::from_julian_day(civil.to_julian_day()).unwrap();
        let drift = (back.to_datetime().unwrap() - civil.to_datetime().unwrap()).num_milliseconds();
        assert!(drift.abs() <= 1_000, "{civil} came back as {back}");
    }
}

#[test]
fn utc_roundtrip_j2000_is_stable() {
    let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
    let jd = Instant::from_utc(datetime);
    assert_abs_diff_eq!(jd.value(), 2_451_545.0, epsilon = 1e-9);
    let back = jd.to_utc().expect("to_utc");
    assert_eq!(back.year(), 2000);
    let delta_ns = back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
    assert!(delta_ns.abs() < 1_000);
}

#[test]
fn tt_leads_ut_by_delta_t_near_j2000() {
    let ut = Instant::J2000;
    let tt: TerrestrialTime = ut.to::<TT>();
    let offset = (tt.quantity() - ut.quantity()).to::<Second>();
    assert_abs_diff_eq!(offset.value(), 63.86, epsilon = 1.0);
    let back = tt.to::<JD>();
    assert_abs_diff_eq!(back.value(), ut.value(), epsilon = 1e-9);
}

#[test]
fn illumination_is_symmetric_about_full_moon() {
    for i in 0..1000 {
        let p = i as f64 / 1000.0;
        assert_abs_diff_eq!(
            illumination_percent(p),
            illumination_percent(1.0 - p),
            epsilon = 1e-9
        );
    }
}

#[test]
fn phase_repeats_after_one_synodic_month() {
    let month = lunar_ephem::constants::SYNODIC_MONTH;
    for i in 0..50 {
        let t = Instant::new(2_450_000.0 + i as f64 * 37.3);
        let a = phase_at(t).phase;
        let b = phase_at(t + month).phase;
        // rounding to three decimals may land on either side of a boundary
        let diff = (a - b).abs().min(1.0 - (a - b).abs());
        assert!(diff <= 1e-3 + 1e-12, "{a} vs {b} at {t}");
    }
}

#[test]
fn illumination_stays_within_bounds() {
    for i in 0..2_000 {
        let t = Instant::new(2_440_000.0 + i as f64 * 13.17);
        let illumination = phase_at(t).illumination;
        assert!((0.0..=100.0).contains(&illumination), "{illumination} at {t}");
    }
}

#[test]
fn known_new_moon() {
    let phase = phase_at(utc(2000, 1, 6, 18, 14));
    // 18:14 UT lies ~0.76 d after the 00:00 reference epoch
    assert!(phase.phase < 0.03, "{phase:?}");
    assert_eq!(phase.name, PhaseName::NewMoon);
}

#[test]
fn known_full_moon() {
    let reference = Instant::new(lunar_ephem::constants::REFERENCE_NEW_MOON_JD);
    let phase = phase_at(reference + Days::new(14.765));
    assert_abs_diff_eq!(phase.illumination, 100.0, epsilon = 2.0);
    assert_eq!(phase.name, PhaseName::FullMoon);
    assert_eq!(phase.name.to_string(), "Full Moon");
}

#[test]
fn catalog_lookup_for_2024() {
    let events = find_eclipses(utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0)).unwrap();
    let dates: Vec<(u32, u32)> = events
        .iter()
        .map(|e| {
            let civil = e.central().to_civil().unwrap();
            (civil.month, civil.day)
        })
        .collect();
    assert_eq!(dates, vec![(3, 25), (4, 8), (9, 18), (10, 2)]);
    for w in events.windows(2) {
        assert!(w[0].central() < w[1].central());
    }
    for e in &events {
        assert_contacts_and_class(e);
    }
}

#[test]
fn reversed_range_is_empty() {
    let start = utc(2024, 1, 1, 0, 0);
    let end = utc(2024, 12, 31, 0, 0);
    assert!(find_eclipses(end, start).unwrap().is_empty());
}

#[test]
fn heuristic_events_respect_contracts() {
    let mut rng = StdRng::seed_from_u64(2024);
    let events = predict_eclipses_with(
        utc(2020, 1, 1, 0, 0),
        utc(2030, 1, 1, 0, 0),
        &LowPrecisionEphemeris,
        &mut rng,
        &SearchConfig::default(),
    )
    .unwrap();
    assert!(!events.is_empty());
    for e in &events {
        assert!(e.id().starts_with("predicted-"));
        assert!((0.5..=1.0).contains(&e.magnitude()));
        assert_contacts_and_class(e);
    }
}

#[test]
fn tides_alternate() {
    let site = GeographicLocation::new(48.38, -4.49, 10.0, "Brest", "Europe/Paris").unwrap();
    for i in 0..10 {
        let window = tides_for(
            Instant::new(2_460_000.0 + i as f64 * 3.1),
            &site,
            &LowPrecisionEphemeris,
        );
        assert!(window.alternates());
        assert!(window.next_high.unwrap() > window.reference);
        assert!(window.next_low.unwrap() > window.reference);
    }
}

#[test]
fn calendar_completeness() {
    assert_eq!(month_calendar(2024, 1).unwrap().len(), 29);
    assert_eq!(month_calendar(2023, 1).unwrap().len(), 28);
    assert!(month_calendar(2023, 12).is_err());
}

#[test]
fn snapshot_matches_individual_models() {
    let t = utc(2024, 4, 8, 18, 17);
    let site = GeographicLocation::greenwich();
    let snapshot = LunarSnapshot::capture(t, &site, &LowPrecisionEphemeris);
    assert_eq!(snapshot.phase, phase_at(t));
    assert_eq!(snapshot.tides, tides_for(t, &site, &LowPrecisionEphemeris));
    assert!(snapshot.illumination.illuminated_fraction < 0.05);
}

#[cfg(feature = "serde")]
#[test]
fn serde_eclipse_event_roundtrip() {
    let events = find_eclipses(utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0)).unwrap();
    let json = serde_json::to_string(&events[1]).unwrap();
    assert!(json.contains("\"eclipse-2\""));
    assert!(json.contains("North America"));
    let back: EclipseEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, events[1]);
}

#[cfg(feature = "serde")]
#[test]
fn serde_instant_is_a_bare_number() {
    let json = serde_json::to_string(&Instant::new(2_451_545.0)).unwrap();
    assert_eq!(json, "2451545.0");
}
