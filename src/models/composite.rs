//! Multi-round statistics shown on the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::hole::Par;
use crate::models::round::GirBucketStats;
use crate::stats::buckets::{DistanceBucket, PuttRange};

/// Plain means over the rounds of a single length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleCountAverages {
    pub rounds: usize,
    pub average_score: f64,
    pub average_fir: f64,
    pub average_gir: f64,
    pub average_putts: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParScoreAverages {
    pub par3: f64,
    pub par4: f64,
    pub par5: f64,
}

impl ParScoreAverages {
    pub fn set(&mut self, par: Par, value: f64) {
        match par {
            Par::Three => self.par3 = value,
            Par::Four => self.par4 = value,
            Par::Five => self.par5 = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeStatistics {
    pub user_id: String,
    pub round_count: usize,
    /// Normalized to 18 holes.
    pub average_score: f64,
    pub average_fir: f64,
    pub average_gir: f64,
    /// Normalized to 18 holes.
    pub average_putts: f64,
    /// `None` when no round carries a scrambling figure.
    pub average_scrambling: Option<f64>,
    pub average_sand_save: Option<f64>,
    pub average_penalties: f64,
    pub nine_hole: Option<HoleCountAverages>,
    pub eighteen_hole: Option<HoleCountAverages>,
    pub gir_by_distance: BTreeMap<DistanceBucket, GirBucketStats>,
    pub make_rate_putts: BTreeMap<PuttRange, f64>,
    pub first_putt_distances: BTreeMap<PuttRange, u32>,
    pub average_score_by_par: ParScoreAverages,
}
