//! Roster loading from the static location dataset
//!
//! The roster is defined once per event as an embedded JSON array. Loading
//! is deterministic and side effect free; any malformed entry is a fatal
//! configuration error at startup, never a runtime error.

use crate::models::Location;
use serde::Deserialize;
use std::collections::HashSet;

/// Error type for roster loading
#[derive(Debug)]
pub enum RosterError {
    /// The dataset is not valid JSON or misses a required field
    Parse(serde_json::Error),
    /// The dataset parsed but violates a roster invariant
    Invalid(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Parse(e) => write!(f, "Roster parse error: {}", e),
            RosterError::Invalid(msg) => write!(f, "Invalid roster: {}", msg),
        }
    }
}

impl std::error::Error for RosterError {}

/// Raw dataset entry; `submitted`/`image_reference` are session state and
/// intentionally absent from the dataset.
#[derive(Debug, Deserialize)]
struct RosterEntry {
    id: u32,
    name: String,
    difficulty: u8,
}

/// Loads the fixed set of locations for the event.
///
/// Every location starts unsubmitted with no image reference. Fails on
/// duplicate ids, empty names and difficulty ratings outside [1,5].
pub fn load_roster(json: &str) -> Result<Vec<Location>, RosterError> {
    let entries: Vec<RosterEntry> = serde_json::from_str(json).map_err(RosterError::Parse)?;

    if entries.is_empty() {
        return Err(RosterError::Invalid("roster contains no locations".to_string()));
    }

    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(entries.len());

    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(RosterError::Invalid(format!(
                "duplicate location id {}",
                entry.id
            )));
        }
        if entry.name.trim().is_empty() {
            return Err(RosterError::Invalid(format!(
                "location {} has an empty name",
                entry.id
            )));
        }
        if !(1..=5).contains(&entry.difficulty) {
            return Err(RosterError::Invalid(format!(
                "location {} has difficulty {} outside [1,5]",
                entry.id, entry.difficulty
            )));
        }

        roster.push(Location {
            id: entry.id,
            name: entry.name,
            difficulty: entry.difficulty,
            submitted: false,
            image_reference: None,
        });
    }

    log::debug!("Loaded roster with {} locations", roster.len());
    Ok(roster)
}
