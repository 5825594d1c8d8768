//! Fixed bucket tables used to group approach distances and first putts.
//!
//! Both bucket kinds serialize as their label (`"40-50m"`, `"7-10ft"`) so they
//! can key JSON objects, and order by their lower bound so a `BTreeMap` keyed
//! by them iterates from the shortest range to the longest.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Half-open approach distance interval `[min_m, max_m)` in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistanceBucket {
    pub min_m: u32,
    pub max_m: u32,
}

impl DistanceBucket {
    pub const fn new(min_m: u32, max_m: u32) -> Self {
        Self { min_m, max_m }
    }

    pub fn contains(&self, distance_m: f64) -> bool {
        distance_m >= f64::from(self.min_m) && distance_m < f64::from(self.max_m)
    }
}

/// Inclusive first-putt distance range `[min_ft, max_ft]` in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuttRange {
    pub min_ft: u32,
    pub max_ft: u32,
}

impl PuttRange {
    pub const fn new(min_ft: u32, max_ft: u32) -> Self {
        Self { min_ft, max_ft }
    }

    pub fn contains(&self, distance_ft: f64) -> bool {
        distance_ft >= f64::from(self.min_ft) && distance_ft <= f64::from(self.max_ft)
    }
}

/// 17 contiguous 10 m buckets from 40 m to 210 m. Approaches outside this
/// span are not counted anywhere.
pub const DISTANCE_BUCKETS: [DistanceBucket; 17] = [
    DistanceBucket::new(40, 50),
    DistanceBucket::new(50, 60),
    DistanceBucket::new(60, 70),
    DistanceBucket::new(70, 80),
    DistanceBucket::new(80, 90),
    DistanceBucket::new(90, 100),
    DistanceBucket::new(100, 110),
    DistanceBucket::new(110, 120),
    DistanceBucket::new(120, 130),
    DistanceBucket::new(130, 140),
    DistanceBucket::new(140, 150),
    DistanceBucket::new(150, 160),
    DistanceBucket::new(160, 170),
    DistanceBucket::new(170, 180),
    DistanceBucket::new(180, 190),
    DistanceBucket::new(190, 200),
    DistanceBucket::new(200, 210),
];

pub const PUTT_RANGES: [PuttRange; 4] = [
    PuttRange::new(4, 6),
    PuttRange::new(7, 10),
    PuttRange::new(11, 16),
    PuttRange::new(17, 30),
];

pub fn distance_bucket_for(distance_m: f64) -> Option<DistanceBucket> {
    DISTANCE_BUCKETS
        .iter()
        .copied()
        .find(|bucket| bucket.contains(distance_m))
}

pub fn putt_range_for(distance_ft: f64) -> Option<PuttRange> {
    PUTT_RANGES
        .iter()
        .copied()
        .find(|range| range.contains(distance_ft))
}

/// Split `"{min}-{max}{unit}"` into its bounds.
fn parse_bounds(label: &str, unit: &str) -> Result<(u32, u32)> {
    let body = label
        .trim()
        .strip_suffix(unit)
        .ok_or_else(|| anyhow!("bucket label '{label}' does not end with '{unit}'"))?;
    let (min, max) = body
        .split_once('-')
        .ok_or_else(|| anyhow!("bucket label '{label}' is missing a '-' separator"))?;
    let min: u32 = min
        .trim()
        .parse()
        .map_err(|_| anyhow!("bucket label '{label}' has a non-numeric lower bound"))?;
    let max: u32 = max
        .trim()
        .parse()
        .map_err(|_| anyhow!("bucket label '{label}' has a non-numeric upper bound"))?;
    if max < min {
        bail!("bucket label '{label}' has its bounds reversed");
    }
    Ok((min, max))
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}m", self.min_m, self.max_m)
    }
}

impl FromStr for DistanceBucket {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        let (min_m, max_m) = parse_bounds(label, "m")?;
        if min_m == max_m {
            bail!("distance bucket '{label}' is empty");
        }
        Ok(Self { min_m, max_m })
    }
}

impl fmt::Display for PuttRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}ft", self.min_ft, self.max_ft)
    }
}

impl FromStr for PuttRange {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        let (min_ft, max_ft) = parse_bounds(label, "ft")?;
        Ok(Self { min_ft, max_ft })
    }
}

impl Serialize for DistanceBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DistanceBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

impl Serialize for PuttRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PuttRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}
