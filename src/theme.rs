//! Light/dark theme selection.
//!
//! Resolution order on startup: stored preference, then the OS color-scheme
//! preference, then light. Once the user toggles, the stored value wins and
//! OS changes are ignored.

use crate::{
    log,
    storage::{KeyValueStore, StorageResult},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Title and aria label of the toggle button.
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Switch to light mode",
            Self::Light => "Switch to dark mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("invalid theme `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    key: String,
    current: Theme,
}

impl ThemeController {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            current: Theme::default(),
        }
    }

    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Resolve the startup theme without writing a preference.
    pub fn initialize(
        &mut self,
        store: &dyn KeyValueStore,
        os_preference: Option<Theme>,
    ) -> StorageResult<Theme> {
        self.current = self
            .stored(store)?
            .or(os_preference)
            .unwrap_or_default();
        Ok(self.current)
    }

    /// Flip the theme and persist it as an explicit preference.
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> StorageResult<Theme> {
        let next = self.current.flipped();
        store.set(&self.key, next.as_str())?;
        log!("theme"; "{} -> {}", self.current, next);
        self.current = next;
        Ok(next)
    }

    /// Follow an OS preference change unless the user has chosen a theme.
    pub fn system_changed(
        &mut self,
        store: &dyn KeyValueStore,
        os: Theme,
    ) -> StorageResult<Option<Theme>> {
        if self.stored(store)?.is_some() {
            return Ok(None);
        }
        self.current = os;
        Ok(Some(os))
    }

    fn stored(&self, store: &dyn KeyValueStore) -> StorageResult<Option<Theme>> {
        Ok(store.get(&self.key)?.and_then(|raw| {
            raw.parse::<Theme>()
                .map_err(|err| log!("warn"; "ignoring stored theme: {}", err))
                .ok()
        }))
    }
}
