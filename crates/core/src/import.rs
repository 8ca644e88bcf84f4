//! Patient payload import and validation.
//!
//! Converts externally supplied text into a typed [`PatientList`] or a descriptive
//! [`ImportError`]. Nothing is adopted into a session here; the caller decides what to do with the
//! result, so a failed import can never leave a session half-replaced.
//!
//! Expected payload:
//!
//! ```json
//! {
//!   "patients": [
//!     {
//!       "info": { "id": "P001", "name": "Ada", "age": 55, "gender": "Female" },
//!       "vitals": { "hr": 75, "rr": 16, "sbp": 120, "temp": 37.0, "ams": false },
//!       "labs": { "wbc": 8.5, "lactate": 1.1, "crp": 5 },
//!       "hrHistory": [78, 76, 75, 77, 75]
//!     }
//!   ]
//! }
//! ```
//!
//! Records are checked against a strict wire schema (`#[serde(deny_unknown_fields)]`) and then
//! against value rules. Keys next to `patients` at the top level are ignored.

use crate::config::{HistoryPolicy, ImportPolicy};
use crate::validation::{validate_finite, validate_non_negative, validate_positive, ValueError};
use crate::{
    CoreConfig, DashboardResult, HeartRateHistory, ImportError, Labs, NonEmptyText, PatientInfo,
    PatientList, PatientRecord, Vitals,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A record that was dropped under [`ImportPolicy::SkipInvalid`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    /// Position of the record in the payload's `patients` array.
    pub index: usize,
    pub reason: String,
}

/// Outcome of a successful import.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    /// Accepted records in payload order.
    pub patients: PatientList,
    /// Records dropped under [`ImportPolicy::SkipInvalid`]; always empty under
    /// [`ImportPolicy::FailWhole`].
    pub skipped: Vec<ImportIssue>,
}

/// Parses import payloads according to a [`CoreConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Importer {
    import_policy: ImportPolicy,
    history_policy: HistoryPolicy,
}

impl Importer {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            import_policy: cfg.import_policy(),
            history_policy: cfg.history_policy(),
        }
    }

    /// Parse `raw_text` into patient records.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] (wrapped in [`crate::DashboardError::Import`]) if:
    /// - the text is not valid JSON,
    /// - there is no top-level `patients` array,
    /// - a record is invalid and the policy is [`ImportPolicy::FailWhole`].
    pub fn import(&self, raw_text: &str) -> DashboardResult<ImportReport> {
        let payload: Value =
            serde_json::from_str(raw_text).map_err(ImportError::MalformedPayload)?;

        let entries = match payload {
            Value::Object(mut map) => match map.remove("patients") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(ImportError::MissingPatientsList.into()),
            },
            _ => return Err(ImportError::MissingPatientsList.into()),
        };

        let mut report = ImportReport {
            patients: Vec::with_capacity(entries.len()),
            skipped: Vec::new(),
        };
        let mut seen_ids = HashSet::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let parsed = self.parse_record(entry).and_then(|record| {
                if seen_ids.contains(record.id()) {
                    return Err(format!("duplicate patient id '{}'", record.id()));
                }
                Ok(record)
            });

            match parsed {
                Ok(record) => {
                    seen_ids.insert(record.id().to_string());
                    report.patients.push(record);
                }
                Err(reason) => match self.import_policy {
                    ImportPolicy::FailWhole => {
                        return Err(ImportError::InvalidRecord { index, reason }.into());
                    }
                    ImportPolicy::SkipInvalid => {
                        tracing::warn!("skipping invalid patient record {index}: {reason}");
                        report.skipped.push(ImportIssue { index, reason });
                    }
                },
            }
        }

        tracing::debug!(
            "imported {} patient(s), skipped {}",
            report.patients.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// Schema check followed by value rules. The error is the human-readable reason.
    fn parse_record(&self, entry: Value) -> Result<PatientRecord, String> {
        let wire = match serde_path_to_error::deserialize::<_, PatientWire>(entry) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<record>"
                } else {
                    path.as_str()
                };
                return Err(format!("schema mismatch at {path}: {source}"));
            }
        };

        let record = wire_to_domain(wire)?;
        let hr_history = match self.history_policy {
            HistoryPolicy::Normalise => record.hr_history.normalised(),
            HistoryPolicy::Preserve => record.hr_history,
        };

        Ok(PatientRecord {
            hr_history,
            ..record
        })
    }
}

/// Parse `raw_text` with the default configuration: fail the whole import on the first invalid
/// record and normalise heart rate histories to five samples.
pub fn import_patients(raw_text: &str) -> DashboardResult<PatientList> {
    Importer::default()
        .import(raw_text)
        .map(|report| report.patients)
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    info: InfoWire,
    vitals: VitalsWire,
    #[serde(default)]
    labs: Option<LabsWire>,
    #[serde(rename = "hrHistory", default)]
    hr_history: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InfoWire {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VitalsWire {
    #[serde(default)]
    hr: Option<f64>,
    rr: f64,
    sbp: f64,
    #[serde(default)]
    temp: Option<f64>,
    ams: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabsWire {
    #[serde(default)]
    wbc: Option<f64>,
    #[serde(default)]
    lactate: Option<f64>,
    #[serde(default)]
    crp: Option<f64>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn check(field: &str, value: f64, rule: fn(f64) -> Result<f64, ValueError>) -> Result<f64, String> {
    rule(value).map_err(|e| format!("{field} {e}"))
}

fn check_opt(
    field: &str,
    value: Option<f64>,
    rule: fn(f64) -> Result<f64, ValueError>,
) -> Result<Option<f64>, String> {
    value.map(|v| check(field, v, rule)).transpose()
}

fn wire_to_domain(wire: PatientWire) -> Result<PatientRecord, String> {
    let id = NonEmptyText::new(&wire.info.id).map_err(|e| format!("info.id {e}"))?;
    let info = PatientInfo::new(id, wire.info.name, wire.info.age, wire.info.gender);

    let vitals = Vitals {
        hr: check_opt("vitals.hr", wire.vitals.hr, validate_positive)?,
        rr: check("vitals.rr", wire.vitals.rr, validate_positive)?,
        sbp: check("vitals.sbp", wire.vitals.sbp, validate_positive)?,
        temp: check_opt("vitals.temp", wire.vitals.temp, validate_finite)?,
        ams: wire.vitals.ams,
    };

    let labs = match wire.labs {
        Some(labs) => Labs {
            wbc: check_opt("labs.wbc", labs.wbc, validate_non_negative)?,
            lactate: check_opt("labs.lactate", labs.lactate, validate_non_negative)?,
            crp: check_opt("labs.crp", labs.crp, validate_non_negative)?,
        },
        None => Labs::default(),
    };

    let samples = wire.hr_history.unwrap_or_default();
    for (i, sample) in samples.iter().enumerate() {
        check(&format!("hrHistory[{i}]"), *sample, validate_positive)?;
    }

    Ok(PatientRecord {
        info,
        vitals,
        labs,
        hr_history: HeartRateHistory::new(samples),
    })
}
