use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::{HoleCount, HoleObservation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CaptureStatus {
    #[default]
    Idle,
    InProgress,
    Completed,
}

/// What recording a hole did to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved on to the next hole.
    Advanced,
    /// Every hole of the round is recorded; it is ready to save.
    LastHole,
}

/// A round being entered hole by hole.
#[derive(Debug, Clone, Default)]
pub struct RoundDraft {
    pub status: CaptureStatus,
    pub course_name: String,
    pub hole_count: HoleCount,
    /// 1-based; 0 while idle.
    pub current_hole: u8,
    pub holes: Vec<HoleObservation>,
    /// Id of the stored round once the draft has been saved.
    pub saved_round_id: Option<String>,
}

impl RoundDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, course_name: &str, hole_count: HoleCount) -> Result<()> {
        if self.status == CaptureStatus::InProgress {
            bail!("a round is already in progress");
        }
        let course_name = course_name.trim();
        if course_name.is_empty() {
            bail!("course name is required");
        }

        *self = Self {
            status: CaptureStatus::InProgress,
            course_name: course_name.to_string(),
            hole_count,
            current_hole: 1,
            holes: Vec::with_capacity(usize::from(hole_count.holes())),
            saved_round_id: None,
        };
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.status != CaptureStatus::InProgress {
            bail!("no round in progress");
        }
        Ok(())
    }

    /// Store `hole`. Only the current hole or an earlier one being edited is
    /// accepted; an edit replaces the earlier entry and does not move on.
    pub fn record(&mut self, hole: HoleObservation) -> Result<Progress> {
        self.ensure_in_progress()?;
        let last_hole = self.hole_count.holes();
        if hole.hole_number > last_hole {
            bail!(
                "hole {} is beyond the {}-hole round",
                hole.hole_number,
                last_hole
            );
        }
        if hole.hole_number > self.current_hole {
            bail!(
                "hole {} is ahead of the current hole {}",
                hole.hole_number,
                self.current_hole
            );
        }

        let hole_number = hole.hole_number;
        match self
            .holes
            .iter_mut()
            .find(|existing| existing.hole_number == hole_number)
        {
            Some(existing) => *existing = hole,
            None => self.holes.push(hole),
        }

        if self.holes.len() == usize::from(last_hole) {
            return Ok(Progress::LastHole);
        }
        if hole_number == self.current_hole && self.current_hole < last_hole {
            self.current_hole += 1;
        }
        Ok(Progress::Advanced)
    }

    pub fn step_back(&mut self) -> Result<u8> {
        self.ensure_in_progress()?;
        if self.current_hole > 1 {
            self.current_hole -= 1;
        }
        Ok(self.current_hole)
    }

    pub fn hole(&self, hole_number: u8) -> Option<&HoleObservation> {
        self.holes
            .iter()
            .find(|hole| hole.hole_number == hole_number)
    }

    /// Recorded holes in hole-number order, ready for summarizing.
    pub fn ordered_holes(&self) -> Vec<HoleObservation> {
        let mut holes = self.holes.clone();
        holes.sort_by_key(|hole| hole.hole_number);
        holes
    }

    pub fn complete(&mut self, round_id: String) {
        self.status = CaptureStatus::Completed;
        self.saved_round_id = Some(round_id);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
