// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): UT↔TT correction
//!
//! **ΔT = TT − UT** from the piecewise polynomials published by Espenak &
//! Meeus for the NASA *Five Millennium Canon of Solar Eclipses* (2006).
//! Each segment is a polynomial in decimal years; outside −500 … +2150 the
//! long-term parabola of Morrison & Stephenson (2004) is used.
//!
//! The lunar models of this crate run on UT directly, so ΔT is only needed
//! by the [`TT`](super::TT) scale and by [`TimeData`](super::TimeData).
//!
//! ```rust
//! use lunar_ephem::{Instant, TT};
//!
//! let ut = Instant::J2000;
//! let tt = ut.to::<TT>();
//! println!("ΔT = {}", ut.delta_t());
//! # let _ = tt;
//! ```
//!
//! ## Accuracy
//! Typical uncertainty is a few seconds around 1600 CE and below one second
//! after 1900. Values after 2050 are extrapolated.

use qtty::{Days, Seconds};

/// Horner evaluation, coefficients in ascending powers.
#[inline]
fn poly(t: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Morrison & Stephenson long-term parabola.
#[inline]
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Decimal year of a JD(UT), using the mean Julian year around J2000.
#[inline]
fn decimal_year(jd_ut: Days) -> f64 {
    2000.0 + (jd_ut.value() - 2_451_545.0) / 365.25
}

/// ΔT in seconds for a decimal year.
pub(crate) fn delta_t_for_year(y: f64) -> f64 {
    if y < -500.0 {
        long_term(y)
    } else if y < 500.0 {
        poly(
            y / 100.0,
            &[
                10_583.6,
                -1_014.41,
                33.783_11,
                -5.952_053,
                -0.179_845_2,
                0.022_174_192,
                0.009_031_652_1,
            ],
        )
    } else if y < 1600.0 {
        poly(
            (y - 1000.0) / 100.0,
            &[
                1_574.2,
                -556.01,
                71.234_72,
                0.319_781,
                -0.850_346_3,
                -0.005_050_998,
                0.008_357_207_3,
            ],
        )
    } else if y < 1700.0 {
        poly(y - 1600.0, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if y < 1800.0 {
        poly(
            y - 1700.0,
            &[8.83, 0.1603, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0],
        )
    } else if y < 1860.0 {
        poly(
            y - 1800.0,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        )
    } else if y < 1900.0 {
        poly(
            y - 1860.0,
            &[
                7.62,
                0.5737,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        )
    } else if y < 1920.0 {
        poly(
            y - 1900.0,
            &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197],
        )
    } else if y < 1941.0 {
        poly(y - 1920.0, &[21.20, 0.844_93, -0.076_100, 0.002_093_6])
    } else if y < 1961.0 {
        poly(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if y < 1986.0 {
        poly(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if y < 2005.0 {
        poly(
            y - 2000.0,
            &[
                63.86,
                0.3345,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        )
    } else if y < 2050.0 {
        poly(y - 2000.0, &[62.92, 0.322_17, 0.005_589])
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

/// ΔT = TT − UT at the given JD(UT).
pub fn delta_t_seconds(jd_ut: Days) -> Seconds {
    Seconds::new(delta_t_for_year(decimal_year(jd_ut)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_value() {
        let dt = delta_t_seconds(Days::new(2_451_545.0));
        assert!((dt.value() - 63.86).abs() < 0.01, "ΔT(J2000) = {dt}");
    }

    #[test]
    fn test_year_1900_is_slightly_negative() {
        assert!((delta_t_for_year(1900.0) + 2.79).abs() < 1e-9);
    }

    #[test]
    fn test_segments_join_without_large_jumps() {
        for boundary in [
            1600.0, 1700.0, 1800.0, 1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0,
        ] {
            let before = delta_t_for_year(boundary - 1e-6);
            let after = delta_t_for_year(boundary);
            assert!(
                (before - after).abs() < 2.0,
                "discontinuity at {boundary}: {before} vs {after}"
            );
        }
    }

    #[test]
    fn test_far_future_follows_parabola() {
        let y = 2500.0;
        assert!((delta_t_for_year(y) - long_term(y)).abs() < 1e-12);
    }
}
