//! Snapshot data model and its JSON interchange shape.
//!
//! Raw snapshots come in as `{ date, categories: [{ name, instruments: [{ type, change }] }] }`.
//! Annotated snapshots add `activity`/`trend` per instrument and `overallTrend`
//! at the top level. Category names and instrument types outside the fixed sets
//! are kept verbatim so a file round-trips without loss.
//!
//! `change` is required. A value that is present but not a whole number is
//! coerced to 0; an integral float such as `100.0` is read as the integer
//! `100` and written back in integer form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::constants::events;

/// Derivative instrument line reported per participant category
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstrumentKind {
    Future,
    /// Call option ("CE")
    Call,
    /// Put option ("PE")
    Put,
    Unknown(String),
}

impl InstrumentKind {
    pub fn as_str(&self) -> &str {
        match self {
            InstrumentKind::Future => "Future",
            InstrumentKind::Call => "CE",
            InstrumentKind::Put => "PE",
            InstrumentKind::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InstrumentKind::Unknown(_))
    }
}

impl From<String> for InstrumentKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Future" => InstrumentKind::Future,
            "CE" => InstrumentKind::Call,
            "PE" => InstrumentKind::Put,
            _ => InstrumentKind::Unknown(raw),
        }
    }
}

impl From<&str> for InstrumentKind {
    fn from(raw: &str) -> Self {
        InstrumentKind::from(raw.to_string())
    }
}

impl From<InstrumentKind> for String {
    fn from(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Market participant class
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParticipantCategory {
    Fii,
    Pro,
    Dii,
    Retail,
    Other(String),
}

impl ParticipantCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ParticipantCategory::Fii => "FII",
            ParticipantCategory::Pro => "PRO",
            ParticipantCategory::Dii => "DII",
            ParticipantCategory::Retail => "RETAIL",
            ParticipantCategory::Other(raw) => raw,
        }
    }
}

impl From<String> for ParticipantCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "FII" => ParticipantCategory::Fii,
            "PRO" => ParticipantCategory::Pro,
            "DII" => ParticipantCategory::Dii,
            "RETAIL" => ParticipantCategory::Retail,
            _ => ParticipantCategory::Other(raw),
        }
    }
}

impl From<&str> for ParticipantCategory {
    fn from(raw: &str) -> Self {
        ParticipantCategory::from(raw.to_string())
    }
}

impl From<ParticipantCategory> for String {
    fn from(category: ParticipantCategory) -> Self {
        match category {
            ParticipantCategory::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ParticipantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Human-readable label for one instrument line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    #[serde(rename = "No Change")]
    NoChange,
    #[serde(rename = "Bought Futures")]
    BoughtFutures,
    #[serde(rename = "Sold Futures")]
    SoldFutures,
    #[serde(rename = "Bought Calls")]
    BoughtCalls,
    #[serde(rename = "Sold Calls")]
    SoldCalls,
    #[serde(rename = "Bought Puts")]
    BoughtPuts,
    #[serde(rename = "Sold Puts")]
    SoldPuts,
    Unknown,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::NoChange => "No Change",
            Activity::BoughtFutures => "Bought Futures",
            Activity::SoldFutures => "Sold Futures",
            Activity::BoughtCalls => "Bought Calls",
            Activity::SoldCalls => "Sold Calls",
            Activity::BoughtPuts => "Bought Puts",
            Activity::SoldPuts => "Sold Puts",
            Activity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Directional reading of a single instrument line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Bullish => "Bullish",
            Trend::Bearish => "Bearish",
            Trend::Neutral => "Neutral",
        };
        f.pad(s)
    }
}

/// Weighted verdict for the whole snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for OverallTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverallTrend::Bullish => "BULLISH",
            OverallTrend::Bearish => "BEARISH",
            OverallTrend::Neutral => "NEUTRAL",
        };
        f.pad(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    #[serde(rename = "type")]
    pub kind: InstrumentKind,

    /// Net contracts: positive = net buying, negative = net selling
    #[serde(deserialize_with = "deserialize_change")]
    pub change: i64,
}

impl InstrumentRecord {
    pub fn new(kind: impl Into<InstrumentKind>, change: i64) -> Self {
        Self {
            kind: kind.into(),
            change,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: ParticipantCategory,
    pub instruments: Vec<InstrumentRecord>,
}

impl CategoryRecord {
    pub fn new(name: impl Into<ParticipantCategory>, instruments: Vec<InstrumentRecord>) -> Self {
        Self {
            name: name.into(),
            instruments,
        }
    }
}

/// Raw daily snapshot as supplied by the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// DD/MM/YYYY display date
    pub date: String,
    pub categories: Vec<CategoryRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedInstrumentRecord {
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    #[serde(deserialize_with = "deserialize_change")]
    pub change: i64,
    pub activity: Activity,
    pub trend: Trend,
}

impl AnnotatedInstrumentRecord {
    pub fn record(&self) -> InstrumentRecord {
        InstrumentRecord {
            kind: self.kind.clone(),
            change: self.change,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCategoryRecord {
    pub name: ParticipantCategory,
    pub instruments: Vec<AnnotatedInstrumentRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSnapshot {
    pub date: String,
    pub categories: Vec<AnnotatedCategoryRecord>,
    #[serde(rename = "overallTrend")]
    pub overall_trend: OverallTrend,
}

impl AnnotatedSnapshot {
    /// Strips the derived fields, leaving the raw snapshot the annotation was
    /// computed from.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            date: self.date.clone(),
            categories: self
                .categories
                .iter()
                .map(|c| CategoryRecord {
                    name: c.name.clone(),
                    instruments: c.instruments.iter().map(|i| i.record()).collect(),
                })
                .collect(),
        }
    }
}

/// Coerces a JSON `change` value to a whole number of contracts.
///
/// Integers pass through; integral floats inside the i64 range are accepted
/// and normalized to their integer value (`100.0` becomes `100`); anything
/// else (fractions, null, strings, out-of-range values) becomes 0.
pub fn coerce_change(value: &Value) -> i64 {
    if let Some(n) = value.as_i64() {
        return n;
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            return f as i64;
        }
    }
    warn!(event = events::CHANGE_COERCED, raw = %value, "non-integer change coerced to 0");
    0
}

fn deserialize_change<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_change(&value))
}
