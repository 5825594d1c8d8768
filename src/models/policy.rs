use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Which of a user's rounds feed the dashboard, newest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPolicy {
    #[default]
    #[serde(alias = "Todas")]
    All,
    #[serde(alias = "Última Ronda")]
    LastRound,
    #[serde(alias = "Últimas 5 rondas")]
    Last5,
    #[serde(alias = "Últimas 20 rondas")]
    Last20,
}

impl SelectionPolicy {
    pub fn limit(self) -> Option<usize> {
        match self {
            SelectionPolicy::All => None,
            SelectionPolicy::LastRound => Some(1),
            SelectionPolicy::Last5 => Some(5),
            SelectionPolicy::Last20 => Some(20),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::All => "all",
            SelectionPolicy::LastRound => "last",
            SelectionPolicy::Last5 => "last5",
            SelectionPolicy::Last20 => "last20",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SelectionPolicy::All),
            "last" | "last1" => Ok(SelectionPolicy::LastRound),
            "last5" => Ok(SelectionPolicy::Last5),
            "last20" => Ok(SelectionPolicy::Last20),
            other => bail!("unknown round filter '{other}' (expected all, last, last5 or last20)"),
        }
    }
}
