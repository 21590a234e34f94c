//! Drag controller configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Default opacity of the source element while it is being dragged.
pub const DEFAULT_SOURCE_OPACITY: f64 = 0.4;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source opacity must be within 0.0..=1.0, got {0}")]
    Opacity(f64),
}

/// Which lists take part in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneFilter {
    /// Every list.
    #[default]
    All,
    /// Only the listed list indices.
    Only(BTreeSet<usize>),
}

impl ZoneFilter {
    /// Restrict to the given list indices.
    pub fn only(lists: impl IntoIterator<Item = usize>) -> Self {
        Self::Only(lists.into_iter().collect())
    }

    /// Check if a list is part of this zone.
    pub fn contains(&self, list: usize) -> bool {
        match self {
            Self::All => true,
            Self::Only(lists) => lists.contains(&list),
        }
    }
}

/// What to do when an identifier appears in more than one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Resolve to the first match in list order.
    #[default]
    FirstMatch,
    /// Refuse to start a drag on a duplicated id.
    Reject,
}

/// Drag controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Opacity applied to the source element during a drag.
    pub source_opacity: f64,
    /// Lists whose items can be picked up.
    pub drag_lists: ZoneFilter,
    /// Lists that accept drops.
    pub drop_lists: ZoneFilter,
    /// Tie-break for duplicated identifiers.
    pub duplicate_policy: DuplicatePolicy,
    /// Keep an id -> position index instead of scanning on every lookup.
    pub index_ids: bool,
    /// Hovering a list body (not an item) appends to that list.
    pub drop_on_container: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            source_opacity: DEFAULT_SOURCE_OPACITY,
            drag_lists: ZoneFilter::All,
            drop_lists: ZoneFilter::All,
            duplicate_policy: DuplicatePolicy::FirstMatch,
            index_ids: false,
            drop_on_container: false,
        }
    }
}

impl DragConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.source_opacity) {
            return Err(ConfigError::Opacity(self.source_opacity));
        }
        Ok(())
    }
}
