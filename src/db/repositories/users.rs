use anyhow::{bail, Context, Result};
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::UserAccount};

fn row_to_account(row: &Row) -> Result<UserAccount> {
    let created_at: String = row.get("created_at")?;

    Ok(UserAccount {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        password_hash: row.get("password_hash")?,
        password_salt: row.get("password_salt")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Fails when the email is already registered.
    pub async fn insert_user(&self, account: &UserAccount) -> Result<()> {
        let record = account.clone();
        self.execute(move |conn| {
            let result = conn.execute(
                "INSERT INTO users (id, email, name, password_hash, password_salt, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.email,
                    record.name,
                    record.password_hash,
                    record.password_salt,
                    record.created_at.to_rfc3339(),
                ],
            );

            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    bail!("an account already exists for {}", record.email)
                }
                Err(err) => Err(err).context("failed to insert user"),
            }
        })
        .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let email = email.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, name, password_hash, password_salt, created_at
                 FROM users
                 WHERE email = ?1",
            )?;
            let row = stmt
                .query_row(params![email], |row| Ok(row_to_account(row)))
                .optional()?;
            row.transpose()
        })
        .await
    }

    pub async fn find_user_by_id(&self, user_id: &str) -> Result<Option<UserAccount>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, name, password_hash, password_salt, created_at
                 FROM users
                 WHERE id = ?1",
            )?;
            let row = stmt
                .query_row(params![user_id], |row| Ok(row_to_account(row)))
                .optional()?;
            row.transpose()
        })
        .await
    }
}
