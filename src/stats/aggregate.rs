//! Multi-round aggregator behind the dashboard.

use crate::models::{CompositeStatistics, HoleCountAverages, RoundSummary};
use crate::stats::{
    math::mean,
    merge::{
        merge_gir_by_distance, merge_make_rates, merge_par_averages, sum_first_putt_distances,
    },
};

const NINE_HOLES: u32 = 9;
const EIGHTEEN_HOLES: u32 = 18;

/// Totals from a 9-hole round are doubled to stand in for 18 holes.
fn eighteen_hole_equivalent(total: u32, hole_count: u32) -> f64 {
    if hole_count == NINE_HOLES {
        f64::from(total) * 2.0
    } else {
        f64::from(total)
    }
}

fn hole_count_averages(rounds: &[&RoundSummary]) -> Option<HoleCountAverages> {
    if rounds.is_empty() {
        return None;
    }
    let average = |field: fn(&RoundSummary) -> f64| {
        mean(rounds.iter().map(|round| field(round))).unwrap_or(0.0)
    };
    Some(HoleCountAverages {
        rounds: rounds.len(),
        average_score: average(|round| f64::from(round.total_score)),
        average_fir: average(|round| round.fir_percentage),
        average_gir: average(|round| round.gir_percentage),
        average_putts: average(|round| f64::from(round.total_putts)),
    })
}

/// Combine a user's selected rounds. `None` means there is nothing to show,
/// which the dashboard renders differently from a row of zeros.
pub fn aggregate<R>(user_id: &str, rounds: &[R]) -> Option<CompositeStatistics>
where
    R: AsRef<RoundSummary>,
{
    if rounds.is_empty() {
        return None;
    }

    let summaries: Vec<&RoundSummary> = rounds.iter().map(AsRef::as_ref).collect();
    let (nine, eighteen): (Vec<&RoundSummary>, Vec<&RoundSummary>) = {
        let nine = summaries
            .iter()
            .copied()
            .filter(|round| round.hole_count == NINE_HOLES)
            .collect();
        let eighteen = summaries
            .iter()
            .copied()
            .filter(|round| round.hole_count == EIGHTEEN_HOLES)
            .collect();
        (nine, eighteen)
    };

    let overall = |field: fn(&RoundSummary) -> f64| {
        mean(summaries.iter().map(|round| field(round))).unwrap_or(0.0)
    };

    Some(CompositeStatistics {
        user_id: user_id.to_string(),
        round_count: summaries.len(),
        average_score: overall(|round| {
            eighteen_hole_equivalent(round.total_score, round.hole_count)
        }),
        average_fir: overall(|round| round.fir_percentage),
        average_gir: overall(|round| round.gir_percentage),
        average_putts: overall(|round| {
            eighteen_hole_equivalent(round.total_putts, round.hole_count)
        }),
        average_scrambling: mean(summaries.iter().filter_map(|round| round.scrambling_percentage)),
        average_sand_save: mean(summaries.iter().filter_map(|round| round.sand_save_percentage)),
        average_penalties: overall(|round| f64::from(round.total_penalties)),
        nine_hole: hole_count_averages(&nine),
        eighteen_hole: hole_count_averages(&eighteen),
        gir_by_distance: merge_gir_by_distance(&summaries),
        make_rate_putts: merge_make_rates(&summaries),
        first_putt_distances: sum_first_putt_distances(&summaries),
        average_score_by_par: merge_par_averages(&summaries),
    })
}
