//! Round aggregator: one round's holes in, one `RoundSummary` out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{
    GirBucketStats, HoleObservation, Outcome, ParAverages, Par, RoundSummary,
};
use crate::stats::{
    buckets::{DistanceBucket, PuttRange, DISTANCE_BUCKETS, PUTT_RANGES},
    math::{mean, percentage, round_to_tenth},
};

/// Summarize a finished round, stamping it with the current time.
///
/// `holes` should come from `validate_round`. An empty slice yields a
/// summary of zeros rather than NaN.
pub fn summarize(holes: &[HoleObservation], course_name: &str) -> RoundSummary {
    summarize_at(holes, course_name, Utc::now())
}

pub fn summarize_at(
    holes: &[HoleObservation],
    course_name: &str,
    created_at: DateTime<Utc>,
) -> RoundSummary {
    let hole_count = holes.len() as u32;
    let greens_hit = holes.iter().filter(|hole| hole.green_hit).count() as u32;

    RoundSummary {
        course_name: course_name.to_string(),
        created_at,
        hole_count,
        total_score: holes.iter().map(|hole| hole.score).sum(),
        total_putts: holes.iter().map(|hole| hole.putts).sum(),
        total_penalties: holes.iter().filter(|hole| hole.penalty).count() as u32,
        fir_percentage: outcome_rate(holes.iter().map(|hole| hole.fir)),
        gir_percentage: percentage(greens_hit, hole_count),
        gir_by_distance: gir_by_distance(holes),
        scrambling_percentage: Some(outcome_rate(holes.iter().map(|hole| hole.up_and_down))),
        sand_save_percentage: Some(outcome_rate(holes.iter().map(|hole| hole.sand_save))),
        first_putt_distances: first_putt_histogram(holes),
        make_rate_putts: make_rates(holes),
        average_score_by_par: par_averages(holes),
    }
}

/// Share of applicable outcomes that were `Yes`; 0 when none applied.
fn outcome_rate<I>(outcomes: I) -> f64
where
    I: IntoIterator<Item = Outcome>,
{
    let (yes, applicable) = outcomes
        .into_iter()
        .filter(|outcome| outcome.is_applicable())
        .fold((0u32, 0u32), |(yes, applicable), outcome| {
            (yes + u32::from(outcome.is_yes()), applicable + 1)
        });
    percentage(yes, applicable)
}

fn gir_bucket(holes: &[HoleObservation], bucket: DistanceBucket) -> GirBucketStats {
    let in_bucket: Vec<&HoleObservation> = holes
        .iter()
        .filter(|hole| bucket.contains(hole.gir_distance_m))
        .collect();
    let total = in_bucket.len() as u32;
    let hits: Vec<&HoleObservation> = in_bucket
        .into_iter()
        .filter(|hole| hole.green_hit)
        .collect();
    let gir = hits.len() as u32;

    let average_first_putt_distance = mean(
        hits.iter()
            .map(|hole| hole.first_putt_distance_ft)
            .filter(|distance| *distance > 0.0),
    )
    .map(round_to_tenth)
    .unwrap_or(0.0);

    GirBucketStats {
        total,
        gir,
        percentage: percentage(gir, total),
        average_first_putt_distance,
    }
}

/// Every bucket of the fixed table is present, zero-filled when unused.
fn gir_by_distance(holes: &[HoleObservation]) -> BTreeMap<DistanceBucket, GirBucketStats> {
    DISTANCE_BUCKETS
        .iter()
        .map(|bucket| (*bucket, gir_bucket(holes, *bucket)))
        .collect()
}

fn holes_in_range(
    holes: &[HoleObservation],
    range: PuttRange,
) -> impl Iterator<Item = &HoleObservation> {
    holes
        .iter()
        .filter(move |hole| range.contains(hole.first_putt_distance_ft))
}

fn first_putt_histogram(holes: &[HoleObservation]) -> BTreeMap<PuttRange, u32> {
    PUTT_RANGES
        .iter()
        .map(|range| (*range, holes_in_range(holes, *range).count() as u32))
        .collect()
}

/// A first putt counts as made when the hole took a single putt. Ranges no
/// putt started from are left out so "no data" never reads as 0%.
fn make_rates(holes: &[HoleObservation]) -> BTreeMap<PuttRange, f64> {
    PUTT_RANGES
        .iter()
        .filter_map(|range| {
            let (made, attempts) = holes_in_range(holes, *range)
                .fold((0u32, 0u32), |(made, attempts), hole| {
                    (made + u32::from(hole.putts == 1), attempts + 1)
                });
            (attempts > 0).then(|| (*range, percentage(made, attempts)))
        })
        .collect()
}

fn par_averages(holes: &[HoleObservation]) -> ParAverages {
    let mut averages = ParAverages::default();
    for par in Par::ALL {
        let scores = holes
            .iter()
            .filter(|hole| hole.par == par)
            .map(|hole| f64::from(hole.score));
        averages.set(par, mean(scores));
    }
    averages
}
