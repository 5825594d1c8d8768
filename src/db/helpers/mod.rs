use std::{collections::BTreeMap, convert::TryFrom, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

pub fn to_i64(value: u32) -> i64 {
    i64::from(value)
}

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} holds out-of-range value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn to_json<T: Serialize>(value: &T, field: &str) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("failed to encode {field}"))
}

pub fn parse_optional_json<T: DeserializeOwned>(
    value: Option<String>,
    field: &str,
) -> Result<Option<T>> {
    match value {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .with_context(|| format!("failed to parse {field}")),
        None => Ok(None),
    }
}

/// Decode a label-keyed JSON object. Entries whose label or value does not
/// parse are dropped so one bad key cannot hide a whole round.
pub fn parse_bucket_map<K, V>(raw: &str, field: &str) -> Result<BTreeMap<K, V>>
where
    K: FromStr + Ord,
    K::Err: Display,
    V: DeserializeOwned,
{
    let object: Map<String, Value> =
        serde_json::from_str(raw).with_context(|| format!("failed to parse {field}"))?;

    let mut buckets = BTreeMap::new();
    for (label, value) in object {
        let key = match label.parse::<K>() {
            Ok(key) => key,
            Err(err) => {
                log_warn!("Skipping {field} entry '{label}': {err}");
                continue;
            }
        };
        match serde_json::from_value::<V>(value) {
            Ok(value) => {
                buckets.insert(key, value);
            }
            Err(err) => log_warn!("Skipping {field} entry '{label}': {err}"),
        }
    }
    Ok(buckets)
}
