//! Command-line front end over the command surfaces.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    auth::commands as auth_commands,
    capture::{commands as capture_commands, CaptureOutcome},
    dashboard::commands as dashboard_commands,
    models::{HoleCount, HoleInput, SelectionPolicy},
    stats::validate_round,
    AppState,
};

#[derive(Parser)]
#[command(name = "molistats")]
#[command(author, version, about = "Golf round statistics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the database and settings (overrides MOLISTATS_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Record a round from a JSON file holding an array of holes
    Record {
        /// Course name
        #[arg(short, long)]
        course: String,

        /// 9 or 18 (defaults to the configured hole count)
        #[arg(long)]
        holes: Option<u8>,

        /// Path to the hole list
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List rounds, newest first
    Rounds {
        /// all, last, last5 or last20 (defaults to the configured filter)
        #[arg(long)]
        filter: Option<SelectionPolicy>,
    },

    /// Show averages over the selected rounds
    Stats {
        #[arg(long)]
        filter: Option<SelectionPolicy>,
    },

    /// Delete a round and show the refreshed averages
    Delete {
        /// Round id
        id: String,

        #[arg(long)]
        filter: Option<SelectionPolicy>,
    },

    /// Change stored defaults
    Config {
        #[arg(long)]
        filter: Option<SelectionPolicy>,

        /// Default hole count for new rounds
        #[arg(long)]
        holes: Option<u8>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_holes(path: &Path) -> Result<Vec<HoleInput>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read holes from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of holes", path.display()))
}

async fn record(
    state: &AppState,
    course: String,
    holes: Option<u8>,
    file: PathBuf,
) -> Result<()> {
    let mut inputs = read_holes(&file)?;
    validate_round(&inputs)?;
    inputs.sort_by_key(|input| input.hole_number);

    capture_commands::start_round(state, course, holes)
        .await
        .map_err(|e| anyhow!(e))?;

    for input in inputs {
        let hole_number = input.hole_number;
        let outcome = match capture_commands::record_hole(state, input).await {
            Ok(outcome) => outcome,
            Err(err) => {
                capture_commands::cancel_round(state).await.map_err(|e| anyhow!(e))?;
                return Err(anyhow!("hole {hole_number}: {err}"));
            }
        };
        if let CaptureOutcome::Saved { round } = outcome {
            return print_json(&round);
        }
    }

    // Fewer holes than the round length: keep what was played.
    let saved = capture_commands::save_round(state).await;
    if saved.is_err() {
        capture_commands::cancel_round(state).await.map_err(|e| anyhow!(e))?;
    }
    print_json(&saved.map_err(|e| anyhow!(e))?)
}

pub async fn execute(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Signup {
            email,
            password,
            name,
        } => print_json(
            &auth_commands::sign_up(state, email, password, name)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Login { email, password } => print_json(
            &auth_commands::sign_in(state, email, password)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Logout => auth_commands::sign_out(state).await.map_err(|e| anyhow!(e)),
        Commands::Whoami => print_json(
            &auth_commands::get_current_user(state)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Record { course, holes, file } => record(state, course, holes, file).await,
        Commands::Rounds { filter } => print_json(
            &dashboard_commands::list_rounds(state, filter)
                .await
                .map_err(|e| anyhow!(e))?,
        ),
        Commands::Stats { filter } => print_json(
            &dashboard_commands::get_dashboard(state, filter)
                .await
                .map_err(|e| anyhow!(e))?
                .averages,
        ),
        Commands::Delete { id, filter } => print_json(
            &dashboard_commands::delete_round(state, id, filter)
                .await
                .map_err(|e| anyhow!(e))?
                .averages,
        ),
        Commands::Config { filter, holes } => {
            if let Some(policy) = filter {
                dashboard_commands::set_default_policy(state, policy)
                    .await
                    .map_err(|e| anyhow!(e))?;
            }
            if let Some(holes) = holes {
                let hole_count = HoleCount::try_from(holes).map_err(|e| anyhow!(e))?;
                state.settings.set_default_hole_count(hole_count)?;
            }
            print_json(&state.settings.snapshot())
        }
    }
}
