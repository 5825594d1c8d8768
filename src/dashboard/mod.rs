//! Fetch, aggregate and present a user's rounds.

pub mod commands;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::{
    db::Database,
    log_info,
    models::{CompositeStatistics, SelectionPolicy, StoredRound},
    stats::aggregate,
};

const ENABLE_LOGS: bool = true;

/// Rounds for one (user, policy) pair and the statistics computed from
/// exactly those rounds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub policy: SelectionPolicy,
    pub rounds: Vec<StoredRound>,
    /// `None` when there are no rounds to aggregate.
    pub averages: Option<CompositeStatistics>,
}

pub async fn load_dashboard(
    db: &Database,
    user_id: &str,
    policy: SelectionPolicy,
) -> Result<DashboardView> {
    let rounds = db.list_rounds(user_id, policy).await?;
    let averages = aggregate(user_id, &rounds);
    log_info!(
        "Aggregated {} rounds for user {user_id} (filter: {policy})",
        rounds.len()
    );

    Ok(DashboardView {
        policy,
        rounds,
        averages,
    })
}

/// Delete a round, then fetch and aggregate again so the view never shows
/// statistics that include it.
pub async fn delete_round_and_reload(
    db: &Database,
    user_id: &str,
    round_id: &str,
    policy: SelectionPolicy,
) -> Result<DashboardView> {
    if let Some(round) = db.get_round(round_id).await? {
        if round.user_id != user_id {
            bail!("round {round_id} belongs to another user");
        }
        db.delete_round(round_id).await?;
    }
    load_dashboard(db, user_id, policy).await
}
