use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;

/// Schema steps in order; step `n` takes `user_version` from `n - 1` to `n`.
const MIGRATIONS: &[(&str, &str)] = &[
    ("users", include_str!("schemas/schema_v1.sql")),
    ("round_stats", include_str!("schemas/schema_v2.sql")),
];

const CURRENT_SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

fn schema_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read schema version")
}

/// Apply every pending step in one transaction.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let version = schema_version(conn)?;
    if !(0..=CURRENT_SCHEMA_VERSION).contains(&version) {
        bail!(
            "round store schema {version} is not one this build understands (0-{})",
            CURRENT_SCHEMA_VERSION
        );
    }
    let pending = &MIGRATIONS[version as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to begin schema upgrade")?;
    for (offset, (name, sql)) in pending.iter().enumerate() {
        let target = version + offset as i32 + 1;
        tx.execute_batch(sql)
            .with_context(|| format!("schema step {target} ({name}) failed"))?;
        info!("Round store schema at version {target} ({name})");
    }
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to record schema version")?;
    tx.commit().context("failed to commit schema upgrade")
}
