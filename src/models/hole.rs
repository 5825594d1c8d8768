//! Per-hole data models.
//!
//! `HoleInput` is what the capture form submits; `HoleObservation` is the
//! validated, immutable value the round aggregator consumes.

use serde::{Deserialize, Serialize};

/// Result of a yes/no question that may not apply to the hole.
///
/// Accepts the Spanish labels used by earlier exports (`"Sí"`, `"No"`, `"NA"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    #[serde(alias = "Sí", alias = "Si")]
    Yes,
    #[serde(alias = "No")]
    No,
    #[serde(alias = "NA", alias = "na")]
    NotApplicable,
}

impl Outcome {
    pub fn is_applicable(self) -> bool {
        self != Outcome::NotApplicable
    }

    pub fn is_yes(self) -> bool {
        self == Outcome::Yes
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Outcome::Yes
        } else {
            Outcome::No
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum Par {
    Three,
    Four,
    Five,
}

impl Par {
    pub const ALL: [Par; 3] = [Par::Three, Par::Four, Par::Five];

    pub fn strokes(self) -> u8 {
        match self {
            Par::Three => 3,
            Par::Four => 4,
            Par::Five => 5,
        }
    }
}

impl TryFrom<u8> for Par {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Par::Three),
            4 => Ok(Par::Four),
            5 => Ok(Par::Five),
            other => Err(format!("par must be 3, 4 or 5, got {other}")),
        }
    }
}

impl From<Par> for u8 {
    fn from(par: Par) -> Self {
        par.strokes()
    }
}

/// Raw per-hole answers as submitted by the capture form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleInput {
    pub hole_number: u8,
    pub par: u8,
    pub score: u32,
    pub fir: Outcome,
    pub gir: Outcome,
    /// Meters from the green of the approach shot.
    #[serde(default)]
    pub gir_distance: f64,
    pub putts: u32,
    pub up_and_down: Outcome,
    pub sand_save: Outcome,
    pub penalty: Outcome,
    /// Feet, 0 when unknown.
    #[serde(default)]
    pub first_putt_distance: f64,
}

impl HoleInput {
    /// Blank form for a hole, matching the defaults the capture UI shows.
    pub fn blank(hole_number: u8) -> Self {
        Self {
            hole_number,
            par: 4,
            score: 4,
            fir: Outcome::No,
            gir: Outcome::No,
            gir_distance: 0.0,
            putts: 2,
            up_and_down: Outcome::NotApplicable,
            sand_save: Outcome::NotApplicable,
            penalty: Outcome::No,
            first_putt_distance: 0.0,
        }
    }
}

/// A validated hole. Construct through `stats::validation`.
#[derive(Debug, Clone, PartialEq)]
pub struct HoleObservation {
    pub hole_number: u8,
    pub par: Par,
    pub score: u32,
    pub fir: Outcome,
    pub green_hit: bool,
    pub gir_distance_m: f64,
    pub putts: u32,
    pub up_and_down: Outcome,
    pub sand_save: Outcome,
    pub penalty: bool,
    pub first_putt_distance_ft: f64,
}

impl From<&HoleObservation> for HoleInput {
    fn from(hole: &HoleObservation) -> Self {
        Self {
            hole_number: hole.hole_number,
            par: hole.par.strokes(),
            score: hole.score,
            fir: hole.fir,
            gir: Outcome::from_bool(hole.green_hit),
            gir_distance: hole.gir_distance_m,
            putts: hole.putts,
            up_and_down: hole.up_and_down,
            sand_save: hole.sand_save,
            penalty: Outcome::from_bool(hole.penalty),
            first_putt_distance: hole.first_putt_distance_ft,
        }
    }
}
