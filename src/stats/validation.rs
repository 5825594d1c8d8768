//! Input validation run at the capture boundary, before any aggregation.

use std::collections::HashSet;

use crate::models::{HoleInput, HoleObservation, Outcome, Par};

pub const MIN_HOLE_NUMBER: u8 = 1;
pub const MAX_HOLE_NUMBER: u8 = 18;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HoleValidationError {
    #[error("hole number {0} is outside 1-18")]
    HoleNumber(u8),

    #[error("hole {hole}: par {par} is not 3, 4 or 5")]
    Par { hole: u8, par: u8 },

    #[error("hole {hole}: score must be at least 1")]
    Score { hole: u8 },

    #[error("hole {hole}: putts must be at least 1")]
    Putts { hole: u8 },

    #[error("hole {hole}: {field} must be a non-negative number, got {value}")]
    Distance {
        hole: u8,
        field: &'static str,
        value: f64,
    },

    #[error("hole {hole}: {field} must be yes or no")]
    NotApplicable { hole: u8, field: &'static str },

    #[error("a round needs at least one hole")]
    EmptyRound,

    #[error("hole {0} was recorded more than once")]
    DuplicateHole(u8),
}

fn check_distance(
    hole: u8,
    field: &'static str,
    value: f64,
) -> Result<f64, HoleValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HoleValidationError::Distance { hole, field, value })
    }
}

fn require_yes_no(
    hole: u8,
    field: &'static str,
    outcome: Outcome,
) -> Result<bool, HoleValidationError> {
    match outcome {
        Outcome::Yes => Ok(true),
        Outcome::No => Ok(false),
        Outcome::NotApplicable => Err(HoleValidationError::NotApplicable { hole, field }),
    }
}

pub fn validate_hole(input: &HoleInput) -> Result<HoleObservation, HoleValidationError> {
    let hole = input.hole_number;
    if !(MIN_HOLE_NUMBER..=MAX_HOLE_NUMBER).contains(&hole) {
        return Err(HoleValidationError::HoleNumber(hole));
    }

    let par = Par::try_from(input.par).map_err(|_| HoleValidationError::Par {
        hole,
        par: input.par,
    })?;

    if input.score < 1 {
        return Err(HoleValidationError::Score { hole });
    }
    if input.putts < 1 {
        return Err(HoleValidationError::Putts { hole });
    }

    Ok(HoleObservation {
        hole_number: hole,
        par,
        score: input.score,
        fir: input.fir,
        green_hit: require_yes_no(hole, "gir", input.gir)?,
        gir_distance_m: check_distance(hole, "girDistance", input.gir_distance)?,
        putts: input.putts,
        up_and_down: input.up_and_down,
        sand_save: input.sand_save,
        penalty: require_yes_no(hole, "penalty", input.penalty)?,
        first_putt_distance_ft: check_distance(
            hole,
            "firstPuttDistance",
            input.first_putt_distance,
        )?,
    })
}

/// Validate a whole round: non-empty, every hole valid, no hole number twice.
pub fn validate_round(inputs: &[HoleInput]) -> Result<Vec<HoleObservation>, HoleValidationError> {
    if inputs.is_empty() {
        return Err(HoleValidationError::EmptyRound);
    }

    let mut seen = HashSet::with_capacity(inputs.len());
    inputs
        .iter()
        .map(|input| {
            let hole = validate_hole(input)?;
            if !seen.insert(hole.hole_number) {
                return Err(HoleValidationError::DuplicateHole(hole.hole_number));
            }
            Ok(hole)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_hole_is_valid() {
        let hole = validate_hole(&HoleInput::blank(1)).unwrap();
        assert_eq!(hole.par, Par::Four);
        assert!(!hole.green_hit);
        assert!(!hole.penalty);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let mut input = HoleInput::blank(19);
        assert_eq!(validate_hole(&input), Err(HoleValidationError::HoleNumber(19)));

        input.hole_number = 0;
        assert_eq!(validate_hole(&input), Err(HoleValidationError::HoleNumber(0)));

        input.hole_number = 3;
        input.par = 6;
        assert_eq!(
            validate_hole(&input),
            Err(HoleValidationError::Par { hole: 3, par: 6 })
        );

        input.par = 3;
        input.score = 0;
        assert_eq!(validate_hole(&input), Err(HoleValidationError::Score { hole: 3 }));

        input.score = 3;
        input.putts = 0;
        assert_eq!(validate_hole(&input), Err(HoleValidationError::Putts { hole: 3 }));
    }

    #[test]
    fn rejects_negative_and_non_finite_distances() {
        let mut input = HoleInput::blank(2);
        input.gir_distance = -1.0;
        assert!(matches!(
            validate_hole(&input),
            Err(HoleValidationError::Distance { field: "girDistance", .. })
        ));

        input.gir_distance = 120.0;
        input.first_putt_distance = f64::NAN;
        assert!(matches!(
            validate_hole(&input),
            Err(HoleValidationError::Distance { field: "firstPuttDistance", .. })
        ));
    }

    #[test]
    fn green_and_penalty_are_always_applicable() {
        let mut input = HoleInput::blank(5);
        input.gir = Outcome::NotApplicable;
        assert_eq!(
            validate_hole(&input),
            Err(HoleValidationError::NotApplicable { hole: 5, field: "gir" })
        );
    }

    #[test]
    fn round_must_be_non_empty_and_unique() {
        assert_eq!(validate_round(&[]), Err(HoleValidationError::EmptyRound));

        let round = vec![HoleInput::blank(1), HoleInput::blank(2), HoleInput::blank(1)];
        assert_eq!(validate_round(&round), Err(HoleValidationError::DuplicateHole(1)));

        let round: Vec<HoleInput> = (1..=9).map(HoleInput::blank).collect();
        assert_eq!(validate_round(&round).unwrap().len(), 9);
    }

    #[test]
    fn accepts_legacy_outcome_labels() {
        let json = r#"{
            "holeNumber": 7, "par": 3, "score": 2, "fir": "NA", "gir": "Sí",
            "girDistance": 145, "putts": 1, "upAndDown": "NA", "sandSave": "NA",
            "penalty": "No", "firstPuttDistance": 12
        }"#;
        let input: HoleInput = serde_json::from_str(json).unwrap();
        let hole = validate_hole(&input).unwrap();
        assert_eq!(hole.fir, Outcome::NotApplicable);
        assert!(hole.green_hit);
        assert_eq!(hole.gir_distance_m, 145.0);
    }
}
