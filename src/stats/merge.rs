//! Folding per-round bucket maps into their multi-round counterparts.

use std::collections::BTreeMap;

use crate::models::{GirBucketStats, Par, ParScoreAverages, RoundSummary};
use crate::stats::{
    buckets::{DistanceBucket, PuttRange},
    math::{mean, percentage},
};

#[derive(Default)]
struct GirAccumulator {
    total: u32,
    gir: u32,
    first_putt_averages: Vec<f64>,
}

/// Sum counts per bucket; the first-putt figure is a mean of the per-round
/// means, taken only from rounds that hit a green in the bucket.
pub fn merge_gir_by_distance<R>(rounds: &[R]) -> BTreeMap<DistanceBucket, GirBucketStats>
where
    R: AsRef<RoundSummary>,
{
    let mut merged: BTreeMap<DistanceBucket, GirAccumulator> = BTreeMap::new();

    for round in rounds {
        for (bucket, stats) in &round.as_ref().gir_by_distance {
            let entry = merged.entry(*bucket).or_default();
            entry.total += stats.total;
            entry.gir += stats.gir;
            if stats.gir > 0 && stats.average_first_putt_distance > 0.0 {
                entry.first_putt_averages.push(stats.average_first_putt_distance);
            }
        }
    }

    merged
        .into_iter()
        .map(|(bucket, acc)| {
            let stats = GirBucketStats {
                total: acc.total,
                gir: acc.gir,
                percentage: percentage(acc.gir, acc.total),
                average_first_putt_distance: mean(acc.first_putt_averages).unwrap_or(0.0),
            };
            (bucket, stats)
        })
        .collect()
}

/// Mean of the rates each round reported; a range a round never putted
/// from does not drag the average down.
pub fn merge_make_rates<R>(rounds: &[R]) -> BTreeMap<PuttRange, f64>
where
    R: AsRef<RoundSummary>,
{
    let mut reported: BTreeMap<PuttRange, Vec<f64>> = BTreeMap::new();
    for round in rounds {
        for (range, rate) in &round.as_ref().make_rate_putts {
            reported.entry(*range).or_default().push(*rate);
        }
    }

    reported
        .into_iter()
        .filter_map(|(range, rates)| mean(rates).map(|rate| (range, rate)))
        .collect()
}

pub fn sum_first_putt_distances<R>(rounds: &[R]) -> BTreeMap<PuttRange, u32>
where
    R: AsRef<RoundSummary>,
{
    let mut totals: BTreeMap<PuttRange, u32> = BTreeMap::new();
    for round in rounds {
        for (range, count) in &round.as_ref().first_putt_distances {
            *totals.entry(*range).or_default() += count;
        }
    }
    totals
}

/// Each round's per-par mean stands in for `hole_count` equal samples, so
/// longer rounds weigh more.
pub fn merge_par_averages<R>(rounds: &[R]) -> ParScoreAverages
where
    R: AsRef<RoundSummary>,
{
    let mut merged = ParScoreAverages::default();

    for par in Par::ALL {
        let (sum, samples) = rounds
            .iter()
            .map(|round| round.as_ref())
            .filter_map(|round: &RoundSummary| {
                round
                    .average_score_by_par
                    .get(par)
                    .filter(|average| *average > 0.0)
                    .map(|average| (average, round.hole_count))
            })
            .fold((0.0, 0u64), |(sum, samples), (average, holes)| {
                (sum + average * f64::from(holes), samples + u64::from(holes))
            });

        let value = if samples == 0 { 0.0 } else { sum / samples as f64 };
        merged.set(par, value);
    }

    merged
}
