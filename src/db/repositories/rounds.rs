use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_bucket_map, parse_datetime, parse_optional_json, to_i64, to_json, to_u32},
};
use crate::log_info;
use crate::models::{ParAverages, RoundSummary, SelectionPolicy, StoredRound};

const ENABLE_LOGS: bool = true;

const ROUND_COLUMNS: &str = "id, user_id, course_name, created_at, total_holes, total_score, total_putts,
     total_penalties, fir_percentage, gir_percentage, scrambling_percentage, sand_save_percentage,
     gir_by_distance, first_putt_distances, make_rate_putts, average_score_by_par";

fn row_to_round(row: &Row) -> Result<StoredRound> {
    let created_at: String = row.get("created_at")?;
    let gir_by_distance: String = row.get("gir_by_distance")?;
    let first_putt_distances: String = row.get("first_putt_distances")?;
    let make_rate_putts: String = row.get("make_rate_putts")?;
    let average_score_by_par: Option<String> = row.get("average_score_by_par")?;

    Ok(StoredRound {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        summary: RoundSummary {
            course_name: row.get("course_name")?,
            created_at: parse_datetime(&created_at, "created_at")?,
            hole_count: to_u32(row.get("total_holes")?, "total_holes")?,
            total_score: to_u32(row.get("total_score")?, "total_score")?,
            total_putts: to_u32(row.get("total_putts")?, "total_putts")?,
            total_penalties: to_u32(row.get("total_penalties")?, "total_penalties")?,
            fir_percentage: row.get("fir_percentage")?,
            gir_percentage: row.get("gir_percentage")?,
            gir_by_distance: parse_bucket_map(&gir_by_distance, "gir_by_distance")?,
            scrambling_percentage: row.get("scrambling_percentage")?,
            sand_save_percentage: row.get("sand_save_percentage")?,
            first_putt_distances: parse_bucket_map(&first_putt_distances, "first_putt_distances")?,
            make_rate_putts: parse_bucket_map(&make_rate_putts, "make_rate_putts")?,
            average_score_by_par: parse_optional_json::<ParAverages>(
                average_score_by_par,
                "average_score_by_par",
            )?
            .unwrap_or_default(),
        },
    })
}

impl Database {
    /// Persist a freshly summarized round for `user_id`.
    pub async fn insert_round(&self, user_id: &str, summary: &RoundSummary) -> Result<StoredRound> {
        let record = StoredRound {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            summary: summary.clone(),
        };

        self.execute(move |conn| {
            let summary = &record.summary;
            conn.execute(
                "INSERT INTO round_stats (id, user_id, course_name, created_at, total_holes, total_score,
                     total_putts, total_penalties, fir_percentage, gir_percentage, scrambling_percentage,
                     sand_save_percentage, gir_by_distance, first_putt_distances, make_rate_putts,
                     average_score_by_par)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    record.id,
                    record.user_id,
                    summary.course_name,
                    summary.created_at.to_rfc3339(),
                    to_i64(summary.hole_count),
                    to_i64(summary.total_score),
                    to_i64(summary.total_putts),
                    to_i64(summary.total_penalties),
                    summary.fir_percentage,
                    summary.gir_percentage,
                    summary.scrambling_percentage,
                    summary.sand_save_percentage,
                    to_json(&summary.gir_by_distance, "gir_by_distance")?,
                    to_json(&summary.first_putt_distances, "first_putt_distances")?,
                    to_json(&summary.make_rate_putts, "make_rate_putts")?,
                    to_json(&summary.average_score_by_par, "average_score_by_par")?,
                ],
            )
            .context("failed to insert round")?;

            log_info!(
                "Saved round {} ({} holes at {}) for user {}",
                record.id,
                summary.hole_count,
                summary.course_name,
                record.user_id
            );
            Ok(record)
        })
        .await
    }

    /// Rounds for a user, newest first, cut to the policy's limit.
    pub async fn list_rounds(
        &self,
        user_id: &str,
        policy: SelectionPolicy,
    ) -> Result<Vec<StoredRound>> {
        let user_id = user_id.to_string();
        // SQLite treats a negative LIMIT as no limit.
        let limit = policy.limit().map_or(-1, |limit| limit as i64);

        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROUND_COLUMNS}
                 FROM round_stats
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2"
            ))?;

            let mut rows = stmt.query(params![user_id, limit])?;
            let mut rounds = Vec::new();
            while let Some(row) = rows.next()? {
                rounds.push(row_to_round(row)?);
            }

            Ok(rounds)
        })
        .await
    }

    pub async fn get_round(&self, round_id: &str) -> Result<Option<StoredRound>> {
        let round_id = round_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROUND_COLUMNS} FROM round_stats WHERE id = ?1"
            ))?;
            let row = stmt
                .query_row(params![round_id], |row| Ok(row_to_round(row)))
                .optional()?;
            row.transpose()
        })
        .await
    }

    /// Returns false when the round was already gone.
    pub async fn delete_round(&self, round_id: &str) -> Result<bool> {
        let round_id = round_id.to_string();
        self.execute(move |conn| {
            let deleted = conn
                .execute("DELETE FROM round_stats WHERE id = ?1", params![round_id])
                .with_context(|| format!("failed to delete round {round_id}"))?;
            if deleted > 0 {
                log_info!("Deleted round {round_id}");
            }
            Ok(deleted > 0)
        })
        .await
    }
}
