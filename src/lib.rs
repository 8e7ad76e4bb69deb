//! FII/DII tracker - F&O participant positioning classifier
//!
//! This library turns a daily snapshot of net position changes per market
//! participant into per-instrument activity/trend labels and one weighted
//! overall market verdict.

pub mod api;
pub mod codec;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod sample;

// Re-export commonly used types
pub use config::AppConfig;
pub use engine::{annotate, Assessment, SentimentEngine, SentimentScore, WeightTable};
pub use error::{SnapshotError, TrackerError};
pub use models::{
    Activity, AnnotatedSnapshot, CategoryRecord, InstrumentKind, InstrumentRecord, OverallTrend,
    ParticipantCategory, Snapshot, Trend,
};

#[cfg(test)]
mod engine_tests;
