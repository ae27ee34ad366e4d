//! Serde helpers for byte blobs.
//!
//! Blobs travel as standard base64 strings so descriptors written by other
//! build-phase processes decode byte-exact.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// `#[serde(with = "sbuild_core::encoding::base64_bytes")]` for `Vec<u8>`.
pub mod base64_bytes {
    use super::{Engine, STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        match encoded {
            Some(s) => STANDARD.decode(s).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

/// `#[serde(with = "sbuild_core::encoding::base64_map")]` for
/// `BTreeMap<String, Vec<u8>>`.
pub mod base64_map {
    use super::{Engine, STANDARD};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (key, blob) in map {
            out.serialize_entry(key, &STANDARD.encode(blob))?;
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        // `null` is what an unset map looks like on the wire
        let Some(encoded) = Option::<BTreeMap<String, String>>::deserialize(deserializer)? else {
            return Ok(BTreeMap::new());
        };
        encoded
            .into_iter()
            .map(|(key, s)| {
                STANDARD
                    .decode(s)
                    .map(|blob| (key, blob))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

/// Decodes `null` as `T::default()`.
///
/// Descriptors produced elsewhere write unset maps and lists as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(value),
        None => Ok(T::default()),
    }
}
