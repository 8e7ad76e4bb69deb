//! Application-wide constants
//!
//! Weights, thresholds and labels used by the sentiment engine live here so
//! the classification rules can be read in one place.

/// Participant weighting used when aggregating the overall verdict
pub mod weights {
    pub const FII: f64 = 3.0;
    pub const PRO: f64 = 2.0;
    pub const RETAIL: f64 = 1.0;
    pub const DII: f64 = 0.3;

    /// Weight applied to any category outside the fixed table
    pub const DEFAULT: f64 = 1.0;
}

/// Overall verdict thresholds
pub mod sentiment {
    /// Bearish/bullish share difference (percentage points) below which the
    /// verdict is forced to NEUTRAL
    pub const NEUTRAL_ZONE_PCT: f64 = 5.0;
}

/// Display format of the snapshot date
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Server defaults
pub mod server {
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
}

/// Logging event names for structured logging
pub mod events {
    pub const SNAPSHOT_ANNOTATED: &str = "snapshot_annotated";
    pub const UNKNOWN_INSTRUMENT: &str = "unknown_instrument";
    pub const UNKNOWN_CATEGORY: &str = "unknown_category";
    pub const CHANGE_COERCED: &str = "change_coerced";
    pub const SNAPSHOT_REJECTED: &str = "snapshot_rejected";
}
