use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    auth::AuthService,
    db::Database,
    log_info,
    models::{HoleCount, HoleInput, StoredRound},
    stats::{summarize, validate_hole},
};

use super::{CaptureStatus, Progress, RoundDraft};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    pub status: CaptureStatus,
    pub course_name: String,
    pub hole_count: HoleCount,
    pub current_hole: u8,
    pub recorded_holes: Vec<HoleInput>,
    pub saved_round_id: Option<String>,
}

impl From<&RoundDraft> for CaptureSnapshot {
    fn from(draft: &RoundDraft) -> Self {
        Self {
            status: draft.status,
            course_name: draft.course_name.clone(),
            hole_count: draft.hole_count,
            current_hole: draft.current_hole,
            recorded_holes: draft.ordered_holes().iter().map(HoleInput::from).collect(),
            saved_round_id: draft.saved_round_id.clone(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CaptureOutcome {
    /// The hole was stored and the draft moved on.
    Next { snapshot: CaptureSnapshot },
    /// The last hole completed the round and it was saved.
    Saved { round: StoredRound },
}

/// Drives the capture flow: validates each hole, keeps the draft, and hands
/// the finished round to the aggregator and the store.
#[derive(Clone)]
pub struct CaptureController {
    draft: Arc<Mutex<RoundDraft>>,
    db: Database,
    auth: AuthService,
}

impl CaptureController {
    pub fn new(db: Database, auth: AuthService) -> Self {
        Self {
            draft: Arc::new(Mutex::new(RoundDraft::new())),
            db,
            auth,
        }
    }

    pub async fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot::from(&*self.draft.lock().await)
    }

    pub async fn start_round(
        &self,
        course_name: &str,
        hole_count: HoleCount,
    ) -> Result<CaptureSnapshot> {
        let mut draft = self.draft.lock().await;
        draft.begin(course_name, hole_count)?;
        log_info!(
            "Started {}-hole round at {}",
            hole_count.holes(),
            draft.course_name
        );
        Ok(CaptureSnapshot::from(&*draft))
    }

    /// Validate and store one hole. Recording the final hole saves the round;
    /// if that save fails the hole stays recorded so `save_round` can retry.
    pub async fn record_hole(&self, input: &HoleInput) -> Result<CaptureOutcome> {
        let hole = validate_hole(input)?;

        let mut draft = self.draft.lock().await;
        match draft.record(hole)? {
            Progress::Advanced => Ok(CaptureOutcome::Next {
                snapshot: CaptureSnapshot::from(&*draft),
            }),
            Progress::LastHole => {
                let round = self
                    .persist(&mut draft)
                    .await
                    .context("hole recorded but the round was not saved")?;
                Ok(CaptureOutcome::Saved { round })
            }
        }
    }

    pub async fn previous_hole(&self) -> Result<CaptureSnapshot> {
        let mut draft = self.draft.lock().await;
        draft.step_back()?;
        Ok(CaptureSnapshot::from(&*draft))
    }

    /// Recorded answers for a hole, for pre-filling the form.
    pub async fn hole_input(&self, hole_number: u8) -> Option<HoleInput> {
        self.draft
            .lock()
            .await
            .hole(hole_number)
            .map(HoleInput::from)
    }

    /// Save whatever has been recorded so far.
    pub async fn save_round(&self) -> Result<StoredRound> {
        let mut draft = self.draft.lock().await;
        if draft.status != CaptureStatus::InProgress {
            bail!("no round in progress");
        }
        self.persist(&mut draft).await
    }

    pub async fn cancel_round(&self) -> Result<()> {
        let mut draft = self.draft.lock().await;
        if draft.status == CaptureStatus::InProgress {
            log_info!(
                "Discarded round at {} with {} holes recorded",
                draft.course_name,
                draft.holes.len()
            );
        }
        draft.reset();
        Ok(())
    }

    async fn persist(&self, draft: &mut RoundDraft) -> Result<StoredRound> {
        if draft.holes.is_empty() {
            bail!("record at least one hole before saving");
        }
        let user = self
            .auth
            .current_user()
            .ok_or_else(|| anyhow!("sign in to save the round"))?;

        let summary = summarize(&draft.ordered_holes(), &draft.course_name);
        let round = self.db.insert_round(&user.id, &summary).await?;
        draft.complete(round.id.clone());
        Ok(round)
    }
}
