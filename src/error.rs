// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.
//!
//! Only out-of-domain inputs are errors. Physically degenerate results
//! (a Moon that never rises, a month without an eclipse) are ordinary
//! values and are reported through flags or empty collections.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type LunarResult<T> = Result<T, LunarError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LunarError {
    /// An input was outside the domain of the requested computation
    /// (latitude beyond ±90°, month index beyond 11, a non-finite Julian
    /// day, ...). Inputs are never clamped.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl LunarError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = LunarError::invalid_argument("month index 12 outside 0..=11");
        assert_eq!(
            err.to_string(),
            "Invalid argument: month index 12 outside 0..=11"
        );
    }
}
