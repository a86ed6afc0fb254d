use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storage::{KeyValueBackend, MemoryStore, StorageKey};

/// Color scheme for the presentation layer. Stored as a bare `"dark"` / `"light"` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Reads a stored value. Anything unrecognised falls back to dark.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().trim_matches('"').parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

/// Signed-in flag for the current process. There is no credential check; the flag only
/// decides whether a front end starts on the login screen.
#[derive(Debug, Default)]
pub struct Session {
    store: MemoryStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Result<()> {
        self.store.set(StorageKey::Session.as_str(), "1")
    }

    pub fn end(&mut self) -> Result<()> {
        self.store.remove(StorageKey::Session.as_str())
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.store.get(StorageKey::Session.as_str()),
            Ok(Some(flag)) if flag == "1"
        )
    }
}
