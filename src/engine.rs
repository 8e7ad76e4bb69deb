//! Sentiment engine: classifies each instrument line and folds the weighted
//! evidence into one overall verdict.
//!
//! Pure and synchronous. The engine holds only its weight table and dead-zone,
//! both immutable after construction, so one instance can be shared freely.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::constants::{events, sentiment, weights};
use crate::models::{
    Activity, AnnotatedCategoryRecord, AnnotatedInstrumentRecord, AnnotatedSnapshot,
    InstrumentKind, InstrumentRecord, OverallTrend, ParticipantCategory, Snapshot, Trend,
};

/// Step A: label an instrument line from its kind and the sign of its change.
pub fn classify_activity(kind: &InstrumentKind, change: i64) -> Activity {
    match (kind, change.signum()) {
        (InstrumentKind::Unknown(_), _) => Activity::Unknown,
        (_, 0) => Activity::NoChange,
        (InstrumentKind::Future, 1) => Activity::BoughtFutures,
        (InstrumentKind::Future, _) => Activity::SoldFutures,
        (InstrumentKind::Call, 1) => Activity::BoughtCalls,
        (InstrumentKind::Call, _) => Activity::SoldCalls,
        (InstrumentKind::Put, 1) => Activity::BoughtPuts,
        (InstrumentKind::Put, _) => Activity::SoldPuts,
    }
}

/// Step B: read the direction off the activity label. Buying puts or selling
/// futures/calls is bearish positioning; the converse is bullish.
pub fn classify_trend(activity: Activity) -> Trend {
    match activity {
        Activity::SoldFutures | Activity::SoldCalls | Activity::BoughtPuts => Trend::Bearish,
        Activity::BoughtFutures | Activity::BoughtCalls | Activity::SoldPuts => Trend::Bullish,
        Activity::NoChange | Activity::Unknown => Trend::Neutral,
    }
}

/// Per-category weights with an explicit fallback for names outside the table.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    weights: HashMap<ParticipantCategory, f64>,
    default_weight: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = HashMap::from([
            (ParticipantCategory::Fii, weights::FII),
            (ParticipantCategory::Pro, weights::PRO),
            (ParticipantCategory::Retail, weights::RETAIL),
            (ParticipantCategory::Dii, weights::DII),
        ]);
        Self {
            weights,
            default_weight: weights::DEFAULT,
        }
    }
}

impl WeightTable {
    pub fn new(weights: HashMap<ParticipantCategory, f64>, default_weight: f64) -> Self {
        Self {
            weights,
            default_weight,
        }
    }

    pub fn weight(&self, category: &ParticipantCategory) -> f64 {
        match self.weights.get(category) {
            Some(w) => *w,
            None => {
                debug!(
                    event = events::UNKNOWN_CATEGORY,
                    category = %category,
                    weight = self.default_weight,
                    "category not in weight table, using default weight"
                );
                self.default_weight
            }
        }
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Returns a copy with `overrides` applied on top of this table.
    pub fn with_overrides(&self, overrides: &HashMap<ParticipantCategory, f64>) -> Self {
        let mut weights = self.weights.clone();
        weights.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        Self {
            weights,
            default_weight: self.default_weight,
        }
    }

    pub fn with_default_weight(mut self, default_weight: f64) -> Self {
        self.default_weight = default_weight;
        self
    }
}

/// Weighted bearish/bullish evidence accumulated over a snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentScore {
    pub bearish: f64,
    pub bullish: f64,
}

impl SentimentScore {
    pub fn new(bearish: f64, bullish: f64) -> Self {
        Self { bearish, bullish }
    }

    /// Routes a weighted magnitude by trend. Neutral lines add nothing.
    pub fn add(&mut self, trend: Trend, weighted_magnitude: f64) {
        match trend {
            Trend::Bearish => self.bearish += weighted_magnitude,
            Trend::Bullish => self.bullish += weighted_magnitude,
            Trend::Neutral => {}
        }
    }

    pub fn total(&self) -> f64 {
        self.bearish + self.bullish
    }

    pub fn bearish_pct(&self) -> f64 {
        let total = self.total();
        if total == 0.0 {
            0.0
        } else {
            100.0 * self.bearish / total
        }
    }

    pub fn bullish_pct(&self) -> f64 {
        let total = self.total();
        if total == 0.0 {
            0.0
        } else {
            100.0 * self.bullish / total
        }
    }

    /// Step C: NEUTRAL on no evidence or when the shares differ by less than
    /// `neutral_zone_pct` points, otherwise the heavier side.
    pub fn verdict(&self, neutral_zone_pct: f64) -> OverallTrend {
        if self.total() == 0.0 {
            return OverallTrend::Neutral;
        }
        if (self.bearish_pct() - self.bullish_pct()).abs() < neutral_zone_pct {
            return OverallTrend::Neutral;
        }
        if self.bearish > self.bullish {
            OverallTrend::Bearish
        } else {
            OverallTrend::Bullish
        }
    }
}

/// Annotated snapshot together with the score behind its verdict
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    pub snapshot: AnnotatedSnapshot,
    pub score: SentimentScore,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SentimentEngine {
    weights: WeightTable,
    neutral_zone_pct: f64,
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::new(WeightTable::default(), sentiment::NEUTRAL_ZONE_PCT)
    }
}

impl SentimentEngine {
    pub fn new(weights: WeightTable, neutral_zone_pct: f64) -> Self {
        Self {
            weights,
            neutral_zone_pct,
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn neutral_zone_pct(&self) -> f64 {
        self.neutral_zone_pct
    }

    pub fn annotate(&self, snapshot: &Snapshot) -> AnnotatedSnapshot {
        self.assess(snapshot).snapshot
    }

    /// Annotates every instrument line and computes the overall verdict in a
    /// single pass. The input is left untouched.
    pub fn assess(&self, snapshot: &Snapshot) -> Assessment {
        let mut score = SentimentScore::default();
        let mut categories = Vec::with_capacity(snapshot.categories.len());

        for category in &snapshot.categories {
            let weight = self.weights.weight(&category.name);
            let mut instruments = Vec::with_capacity(category.instruments.len());

            for record in &category.instruments {
                let annotated = annotate_record(record);
                score.add(annotated.trend, record.change.unsigned_abs() as f64 * weight);
                instruments.push(annotated);
            }

            categories.push(AnnotatedCategoryRecord {
                name: category.name.clone(),
                instruments,
            });
        }

        let overall_trend = score.verdict(self.neutral_zone_pct);
        debug!(
            event = events::SNAPSHOT_ANNOTATED,
            date = %snapshot.date,
            bearish = score.bearish,
            bullish = score.bullish,
            verdict = %overall_trend,
            "snapshot annotated"
        );

        Assessment {
            snapshot: AnnotatedSnapshot {
                date: snapshot.date.clone(),
                categories,
                overall_trend,
            },
            score,
        }
    }
}

fn annotate_record(record: &InstrumentRecord) -> AnnotatedInstrumentRecord {
    if !record.kind.is_known() {
        warn!(
            event = events::UNKNOWN_INSTRUMENT,
            kind = %record.kind,
            "unrecognized instrument kind, labeling as Unknown"
        );
    }
    let activity = classify_activity(&record.kind, record.change);
    AnnotatedInstrumentRecord {
        kind: record.kind.clone(),
        change: record.change,
        activity,
        trend: classify_trend(activity),
    }
}

/// Annotates `snapshot` with the fixed participant weights and the 5-point
/// dead-zone.
pub fn annotate(snapshot: &Snapshot) -> AnnotatedSnapshot {
    SentimentEngine::default().annotate(snapshot)
}
