#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use molistats_lib::{
    config::Config,
    db::{models::UserAccount, Database},
    models::{HoleInput, Outcome, RoundSummary},
    stats::{summarize_at, validate_round},
    AppState,
};
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub db: Database,
}

pub fn setup_db() -> TestDb {
    let dir = TempDir::new().expect("tempdir");
    let db = Database::new(dir.path().join("test.sqlite3")).expect("open database");
    TestDb { _dir: dir, db }
}

pub fn setup_app() -> (TempDir, AppState) {
    let dir = TempDir::new().expect("tempdir");
    let state = AppState::open(&Config::with_data_dir(dir.path().to_path_buf())).expect("open app");
    (dir, state)
}

pub async fn create_user(db: &Database, email: &str) -> String {
    let account = UserAccount {
        id: format!("user-{email}"),
        email: email.to_string(),
        name: email.to_string(),
        password_hash: "hash".into(),
        password_salt: "salt".into(),
        created_at: Utc::now(),
    };
    db.insert_user(&account).await.expect("insert user");
    account.id
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
}

/// Holes that all score `score`, with a spread of greens, approaches and putts.
pub fn hole_inputs(holes: u8, score: u32) -> Vec<HoleInput> {
    (1..=holes)
        .map(|n| {
            let mut input = HoleInput::blank(n);
            input.par = 3 + n % 3;
            input.score = score;
            input.gir = Outcome::from_bool(n % 2 == 0);
            input.gir_distance = 60.0 + f64::from(n) * 7.0;
            input.putts = 1 + u32::from(n % 2);
            input.first_putt_distance = f64::from(4 + n);
            input.fir = if input.par == 3 {
                Outcome::NotApplicable
            } else {
                Outcome::from_bool(n % 4 == 0)
            };
            input
        })
        .collect()
}

/// A summarized round played `days_after` the base time.
pub fn summary(holes: u8, score: u32, days_after: i64) -> RoundSummary {
    let observations = validate_round(&hole_inputs(holes, score)).expect("valid round");
    summarize_at(
        &observations,
        "Real Club de Golf",
        base_time() + Duration::days(days_after),
    )
}
