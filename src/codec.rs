//! Decode/encode boundary for the JSON interchange format.
//!
//! The engine trusts its input; this module is where malformed snapshots are
//! turned away with a descriptive error before they reach it.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::constants::events;
use crate::error::{SnapshotError, TrackerError};
use crate::models::{AnnotatedSnapshot, Snapshot};

/// Parses and validates a raw snapshot. Derived fields already present in the
/// input (`activity`, `trend`, `overallTrend`) are ignored.
pub fn parse_snapshot(input: &str) -> Result<Snapshot, SnapshotError> {
    // Strip BOM if present
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let value: Value = serde_json::from_str(input)?;
    snapshot_from_value(value)
}

pub fn snapshot_from_value(value: Value) -> Result<Snapshot, SnapshotError> {
    for field in ["date", "categories"] {
        if value.get(field).map_or(true, Value::is_null) {
            warn!(event = events::SNAPSHOT_REJECTED, field, "snapshot missing field");
            return Err(SnapshotError::MissingField { field });
        }
    }

    let missing_change = value["categories"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|c| c.get("instruments").and_then(Value::as_array))
        .flatten()
        .any(|i| i.is_object() && i.get("change").is_none());
    if missing_change {
        warn!(event = events::SNAPSHOT_REJECTED, field = "change", "instrument missing field");
        return Err(SnapshotError::MissingField { field: "change" });
    }

    let snapshot: Snapshot = serde_json::from_value(value)?;
    validate(&snapshot)?;
    Ok(snapshot)
}

/// Minimal shape checks: non-empty date, at least one category, and at least
/// one instrument per category.
pub fn validate(snapshot: &Snapshot) -> Result<(), SnapshotError> {
    if snapshot.date.trim().is_empty() {
        return Err(SnapshotError::EmptyDate);
    }
    if snapshot.categories.is_empty() {
        return Err(SnapshotError::NoCategories);
    }
    if let Some(category) = snapshot.categories.iter().find(|c| c.instruments.is_empty()) {
        return Err(SnapshotError::NoInstruments {
            name: category.name.to_string(),
        });
    }
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, TrackerError> {
    let content = fs::read_to_string(path).map_err(|e| TrackerError::io(path.display().to_string(), e))?;
    Ok(parse_snapshot(&content)?)
}

pub fn to_json_pretty(snapshot: &AnnotatedSnapshot) -> Result<String, TrackerError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn parse_annotated(input: &str) -> Result<AnnotatedSnapshot, SnapshotError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    Ok(serde_json::from_str(input)?)
}

pub fn write_annotated(path: &Path, snapshot: &AnnotatedSnapshot) -> Result<(), TrackerError> {
    let json = to_json_pretty(snapshot)?;
    fs::write(path, json).map_err(|e| TrackerError::io(path.display().to_string(), e))
}
