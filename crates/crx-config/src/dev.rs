//! Development mode and reload channel settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::helpers::default_debounce_ms;

/// Build mode, chosen once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Reload channel active, reload client injected
    #[default]
    Development,
    /// Plain build, no reload plumbing
    Production,
}

impl Mode {
    /// Read the mode from `CRX_MODE`, falling back to `NODE_ENV`.
    ///
    /// Anything other than `production` means development, matching how
    /// JavaScript tooling treats `NODE_ENV`.
    pub fn from_env() -> Self {
        std::env::var("CRX_MODE")
            .or_else(|_| std::env::var("NODE_ENV"))
            .map(|value| Self::from_env_value(&value))
            .unwrap_or_default()
    }

    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    pub fn is_dev(self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("invalid mode: {other}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

/// Reload channel tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadOptions {
    /// Delay between a finished build and the `update` push, in milliseconds.
    /// Builds finishing inside the window share one push.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}
