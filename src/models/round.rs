//! Round-level data models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::hole::Par;
use crate::stats::buckets::{DistanceBucket, PuttRange};

/// Number of holes a round is planned for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum HoleCount {
    Nine,
    #[default]
    Eighteen,
}

impl HoleCount {
    pub fn holes(self) -> u8 {
        match self {
            HoleCount::Nine => 9,
            HoleCount::Eighteen => 18,
        }
    }
}

impl TryFrom<u8> for HoleCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            9 => Ok(HoleCount::Nine),
            18 => Ok(HoleCount::Eighteen),
            other => Err(format!("a round has 9 or 18 holes, got {other}")),
        }
    }
}

impl From<HoleCount> for u8 {
    fn from(count: HoleCount) -> Self {
        count.holes()
    }
}

/// Greens hit from one approach distance bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GirBucketStats {
    /// Holes whose approach started in the bucket.
    pub total: u32,
    /// Of those, greens hit.
    pub gir: u32,
    pub percentage: f64,
    /// Feet. 0 when no green in the bucket had a first putt recorded.
    pub average_first_putt_distance: f64,
}

/// Average strokes per par type. `None` when the round had no hole of that par.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParAverages {
    pub par3: Option<f64>,
    pub par4: Option<f64>,
    pub par5: Option<f64>,
}

impl ParAverages {
    pub fn get(&self, par: Par) -> Option<f64> {
        match par {
            Par::Three => self.par3,
            Par::Four => self.par4,
            Par::Five => self.par5,
        }
    }

    pub fn set(&mut self, par: Par, value: Option<f64>) {
        match par {
            Par::Three => self.par3 = value,
            Par::Four => self.par4 = value,
            Par::Five => self.par5 = value,
        }
    }
}

/// Immutable summary of one played round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub course_name: String,
    pub created_at: DateTime<Utc>,
    pub hole_count: u32,
    pub total_score: u32,
    pub total_putts: u32,
    pub total_penalties: u32,
    pub fir_percentage: f64,
    pub gir_percentage: f64,
    pub gir_by_distance: BTreeMap<DistanceBucket, GirBucketStats>,
    /// Always present for rounds summarized by this crate; stored rows written
    /// by older clients may lack it.
    pub scrambling_percentage: Option<f64>,
    pub sand_save_percentage: Option<f64>,
    pub first_putt_distances: BTreeMap<PuttRange, u32>,
    /// Only ranges with at least one first putt are present.
    pub make_rate_putts: BTreeMap<PuttRange, f64>,
    #[serde(default)]
    pub average_score_by_par: ParAverages,
}

/// A summary as owned by the round store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRound {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub summary: RoundSummary,
}

impl AsRef<RoundSummary> for RoundSummary {
    fn as_ref(&self) -> &RoundSummary {
        self
    }
}

impl AsRef<RoundSummary> for StoredRound {
    fn as_ref(&self) -> &RoundSummary {
        &self.summary
    }
}
