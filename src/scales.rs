// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a specific time scale and encodes how
//! values in that scale relate to the canonical **Julian Day in UT**.
//!
//! | Marker | Description | Offset from JD(UT) |
//! |--------|-------------|--------------------|
//! | [`JD`] | Julian Day (Universal Time) | identity |
//! | [`TT`] | Terrestrial Time | +ΔT |

use super::delta_t::delta_t_seconds;
use super::instant::TimeScale;
use qtty::{Day, Days};

/// Julian Day on the Universal Time axis, the identity scale.
///
/// Every lunar model in the crate is evaluated against this scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "JD";

    #[inline(always)]
    fn to_jd_ut(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_ut(jd_ut: Days) -> Days {
        jd_ut
    }
}

// ---------------------------------------------------------------------------
// Terrestrial Time (uniform, ΔT ahead of UT)
// ---------------------------------------------------------------------------

/// Terrestrial Time, the uniform scale of dynamical ephemerides.
///
/// `TT = UT + ΔT`, with ΔT from [`delta_t_seconds`].  The inverse is solved
/// by fixed-point iteration; dΔT/dJD is of order 10⁻⁸ so three passes are
/// far below a microsecond.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline]
    fn to_jd_ut(tt_value: Days) -> Days {
        let mut ut = tt_value;
        for _ in 0..3 {
            ut = tt_value - delta_t_seconds(ut).to::<Day>();
        }
        ut
    }

    #[inline]
    fn from_jd_ut(jd_ut: Days) -> Days {
        jd_ut + delta_t_seconds(jd_ut).to::<Day>()
    }
}

// ---------------------------------------------------------------------------
// Cross-scale From/Into (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, TT);
