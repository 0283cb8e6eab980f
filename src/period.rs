// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closed time ranges and their fixed-step sampling.
//!
//! Every batch computation in the crate (eclipse scans, tide windows,
//! distance histories) walks a [`Period`] with [`Period::samples`], so the
//! number of evaluations is always known before the first one runs.

use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LunarResult;
use crate::Instant;

/// A closed interval `[start, end]` on the JD(UT) axis.
///
/// A period whose `start` lies after its `end` is *reversed*; it is a valid
/// value that contains nothing and yields no samples.
///
/// ```
/// use lunar_ephem::{Instant, Period};
/// use qtty::Days;
///
/// let period = Period::new(Instant::new(2_451_545.0), Instant::new(2_451_546.5));
/// assert_eq!(period.duration(), Days::new(1.5));
/// assert_eq!(period.samples(Days::new(0.5)).count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period {
    pub start: Instant,
    pub end: Instant,
}

impl Period {
    pub fn new(start: Instant, end: Instant) -> Self {
        Period { start, end }
    }

    /// Both endpoints finite, or `InvalidArgument`.
    pub fn checked(self) -> LunarResult<Self> {
        Ok(Self::new(self.start.checked()?, self.end.checked()?))
    }

    /// `end − start`; negative for a reversed period.
    pub fn duration(&self) -> Days {
        self.end - self.start
    }

    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Closed-interval membership.
    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Instants `start, start + step, …` not exceeding `end`.
    ///
    /// Empty for a reversed period, a non-positive or non-finite step, or
    /// non-finite endpoints. Each sample is computed from `start` directly,
    /// so no rounding error accumulates across the walk.
    pub fn samples(&self, step: Days) -> Samples {
        let span = self.duration().value();
        let step_ok = step.value().is_finite() && step.value() > 0.0;
        let span_ok = span.is_finite() && span >= 0.0;
        let count = if step_ok && span_ok {
            (span / step.value()).floor() as usize + 1
        } else {
            0
        };
        Samples {
            start: self.start,
            step,
            index: 0,
            count,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator returned by [`Period::samples`].
#[derive(Debug, Clone)]
pub struct Samples {
    start: Instant,
    step: Days,
    index: usize,
    count: usize,
}

impl Iterator for Samples {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        if self.index >= self.count {
            return None;
        }
        let instant = self.start + self.step * self.index as f64;
        self.index += 1;
        Some(instant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples {}
