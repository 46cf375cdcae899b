//! Serde helpers for Discord snowflake IDs.
//!
//! Discord IDs exceed the integer precision of JavaScript numbers, so every ID crossing
//! the HTTP boundary is carried as a decimal string.

use serde::{de::Error, Deserialize, Deserializer, Serializer};

pub fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}

pub fn serialize_u64_list_as_strings<S>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(|value| value.to_string()))
}

pub fn deserialize_u64_list_from_strings<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .into_iter()
        .map(|value| value.parse::<u64>().map_err(D::Error::custom))
        .collect()
}
