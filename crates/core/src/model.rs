//! Patient record model.
//!
//! These are the validated shapes the scorer and dashboard work over. Records are built either
//! from the built-in samples or by the importer, and are never mutated afterwards; the session
//! replaces whole lists rather than editing records in place.

use crate::constants::{DEFAULT_PATIENT_NAME, TREND_LABELS, TREND_LEN};
use crate::NonEmptyText;
use serde::Serialize;

/// Identification and demographics for one patient.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientInfo {
    pub id: NonEmptyText,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl PatientInfo {
    /// Builds patient info, falling back to [`DEFAULT_PATIENT_NAME`] when `name` is missing or
    /// blank.
    pub fn new(
        id: NonEmptyText,
        name: Option<String>,
        age: Option<u32>,
        gender: Option<String>,
    ) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PATIENT_NAME.to_string());
        let gender = gender
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        Self {
            id,
            name,
            age,
            gender,
        }
    }
}

/// Bedside vital signs.
///
/// `rr`, `sbp` and `ams` feed the qSOFA score and are always present on a record. Heart rate and
/// temperature are informational and may be missing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vitals {
    /// Heart rate, beats/min.
    pub hr: Option<f64>,
    /// Respiratory rate, breaths/min.
    pub rr: f64,
    /// Systolic blood pressure, mmHg.
    pub sbp: f64,
    /// Temperature, degrees Celsius.
    pub temp: Option<f64>,
    /// Altered mental status.
    pub ams: bool,
}

/// Laboratory values. Informational only; the score never reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Labs {
    pub wbc: Option<f64>,
    pub lactate: Option<f64>,
    pub crp: Option<f64>,
}

/// Trailing heart rate samples, oldest first.
///
/// The trend chart labels five time points (`-4h` .. `Now`). Imported histories of another
/// length are either normalised or kept as-is depending on [`crate::HistoryPolicy`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HeartRateHistory(Vec<f64>);

impl HeartRateHistory {
    pub fn new(samples: Vec<f64>) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there is exactly one sample per trend label.
    pub fn matches_labels(&self) -> bool {
        self.0.len() == TREND_LABELS.len()
    }

    /// Returns a history of exactly [`TREND_LEN`] samples.
    ///
    /// Longer histories keep their most recent five samples. Shorter, non-empty histories are
    /// padded at the front with the earliest sample. An empty history stays empty since there is
    /// nothing to pad from.
    pub fn normalised(&self) -> Self {
        let samples = &self.0;
        let Some(&earliest) = samples.first() else {
            return Self::default();
        };

        if samples.len() >= TREND_LEN {
            return Self(samples[samples.len() - TREND_LEN..].to_vec());
        }

        let mut padded = vec![earliest; TREND_LEN - samples.len()];
        padded.extend_from_slice(samples);
        Self(padded)
    }
}

/// One patient's info, vitals, labs and heart rate trend: the unit of scoring and selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub info: PatientInfo,
    pub vitals: Vitals,
    pub labs: Labs,
    pub hr_history: HeartRateHistory,
}

impl PatientRecord {
    pub fn id(&self) -> &str {
        self.info.id.as_str()
    }
}

/// Ordered patients; insertion order defines selector ordering.
pub type PatientList = Vec<PatientRecord>;
