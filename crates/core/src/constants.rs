//! Constants used throughout the qSOFA core crate.
//!
//! Clinical thresholds, display labels and trend chart settings live here so the scorer,
//! classifier and dashboard view agree on a single set of values.

/// Respiratory rate (breaths/min) at or above which the respiratory criterion is positive.
pub const RR_THRESHOLD: f64 = 22.0;

/// Systolic blood pressure (mmHg) at or below which the hypotension criterion is positive.
pub const SBP_THRESHOLD: f64 = 100.0;

/// Highest score the three qSOFA criteria can produce.
pub const MAX_QSOFA_SCORE: u8 = 3;

/// Name shown for patients imported without one.
pub const DEFAULT_PATIENT_NAME: &str = "Unnamed Patient";

/// Rendered in place of any value that is missing from a record.
pub const UNKNOWN_DISPLAY: &str = "unknown";

/// Number of samples the heart rate trend is labelled for.
pub const TREND_LEN: usize = 5;

/// Trend labels, oldest first.
pub const TREND_LABELS: [&str; TREND_LEN] = ["-4h", "-3h", "-2h", "-1h", "Now"];

/// Dataset title for the heart rate trend chart.
pub const TREND_TITLE: &str = "Heart Rate Trend (bpm)";

/// Suggested lower bound of the trend chart y axis (bpm).
pub const TREND_SUGGESTED_MIN: f64 = 50.0;

/// Suggested upper bound of the trend chart y axis (bpm).
pub const TREND_SUGGESTED_MAX: f64 = 140.0;
