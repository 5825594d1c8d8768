use std::{env, path::PathBuf};

const DATA_DIR_ENV: &str = "MOLISTATS_DATA_DIR";
const DEBUG_ENV: &str = "MOLISTATS_DEBUG";
const DEFAULT_DATA_DIR: &str = ".molistats";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let debug = env::var(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { data_dir, debug }
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            debug: false,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("molistats.sqlite3")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_data_dir() {
        let config = Config::with_data_dir(PathBuf::from("/tmp/golf"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/golf/molistats.sqlite3"));
        assert_eq!(config.settings_path(), PathBuf::from("/tmp/golf/settings.json"));
    }
}
