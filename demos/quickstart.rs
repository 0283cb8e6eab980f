use chrono::Utc;
use lunar_ephem::{
    find_eclipses, month_calendar, GeographicLocation, Instant, LowPrecisionEphemeris,
    LunarSnapshot, TimeData,
};
use qtty::Days;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let now = Instant::from_utc(Utc::now());
    let site = GeographicLocation::greenwich();
    let time = TimeData::at(now);
    println!("JD(UT): {}  ΔT: {}", time.jd, time.delta_t);

    let snapshot = LunarSnapshot::capture(now, &site, &LowPrecisionEphemeris);
    println!(
        "{} ({:.1}%), age {}",
        snapshot.phase.name, snapshot.phase.illumination, snapshot.phase.age
    );
    println!(
        "next: {} at {}",
        snapshot.next_phase.name,
        snapshot.next_phase.instant.to_civil()?
    );
    println!(
        "az {:.1}°  alt {:.1}°  {} km",
        snapshot.position.azimuth_deg, snapshot.position.altitude_deg, snapshot.position.distance_km
    );
    for high in snapshot.tides.highs() {
        println!("high tide {}", high.to_civil()?);
    }

    let civil = now.to_civil()?;
    for day in month_calendar(civil.year, civil.month - 1)? {
        println!("{:2} {:5.1}% {}", day.day, day.illumination, day.phase_name);
    }

    for eclipse in find_eclipses(now - Days::new(365.0), now + Days::new(365.0))? {
        println!(
            "{} {} {} eclipse, magnitude {}",
            eclipse.central().to_civil()?,
            eclipse.class(),
            eclipse.kind(),
            eclipse.magnitude()
        );
    }
    Ok(())
}
