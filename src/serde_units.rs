// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! `#[serde(with = ...)]` adapters that store `qtty` quantities as bare
//! numbers in their own unit, matching how [`Time`](crate::Time) serialises.

macro_rules! quantity_as_f64 {
    ($module:ident, $quantity:ty) => {
        pub(crate) mod $module {
            use serde::{Deserialize, Deserializer, Serializer};

            pub(crate) fn serialize<S>(value: &$quantity, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_f64(value.value())
            }

            pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<$quantity, D::Error>
            where
                D: Deserializer<'de>,
            {
                Ok(<$quantity>::new(f64::deserialize(deserializer)?))
            }
        }
    };
}

quantity_as_f64!(days, qtty::Days);
quantity_as_f64!(seconds, qtty::Seconds);
