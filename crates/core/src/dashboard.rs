//! Render-ready view of the active patient.
//!
//! Everything the status banner, vitals/labs cards, qSOFA panel and trend chart display, computed
//! in one pure step from a [`PatientRecord`]. Presentation code only draws it.

use crate::constants::{
    TREND_LABELS, TREND_LEN, TREND_SUGGESTED_MAX, TREND_SUGGESTED_MIN, TREND_TITLE,
    UNKNOWN_DISPLAY,
};
use crate::{classify, score, DashboardResult, PatientRecord, RiskTier, ScoreResult};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBanner {
    pub tier: RiskTier,
    pub label: &'static str,
    pub advisory: &'static str,
    pub status_class: &'static str,
}

impl From<RiskTier> for StatusBanner {
    fn from(tier: RiskTier) -> Self {
        Self {
            tier,
            label: tier.label(),
            advisory: tier.advisory(),
            status_class: tier.status_class(),
        }
    }
}

/// Heart rate trend series plus the fixed chart settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChart {
    pub title: &'static str,
    pub labels: [&'static str; TREND_LEN],
    pub samples: Vec<f64>,
    pub suggested_min: f64,
    pub suggested_max: f64,
    /// Sample count differs from the label count (empty or preserved histories).
    pub label_mismatch: bool,
}

/// Display strings for one patient; missing values read "unknown".
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFields {
    pub patient_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub hr: String,
    pub rr: String,
    pub sbp: String,
    pub temp: String,
    pub wbc: String,
    pub lactate: String,
    pub crp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub fields: DisplayFields,
    pub qsofa: ScoreResult,
    pub status: StatusBanner,
    pub chart: TrendChart,
}

impl DashboardView {
    /// Scores, classifies and formats `record`.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::DashboardError::InvalidVitals`] from the scorer and
    /// [`crate::DashboardError::InvariantViolation`] from the classifier.
    pub fn build(record: &PatientRecord) -> DashboardResult<Self> {
        let qsofa = score(&record.vitals)?;
        let tier = classify(qsofa.score)?;

        let info = &record.info;
        let vitals = &record.vitals;
        let labs = &record.labs;

        let fields = DisplayFields {
            patient_id: info.id.to_string(),
            name: info.name.clone(),
            age: info
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| UNKNOWN_DISPLAY.to_string()),
            gender: info
                .gender
                .clone()
                .unwrap_or_else(|| UNKNOWN_DISPLAY.to_string()),
            hr: format_number(vitals.hr),
            rr: format_number(Some(vitals.rr)),
            sbp: format_number(Some(vitals.sbp)),
            temp: vitals
                .temp
                .map(|t| format!("{t:.1}"))
                .unwrap_or_else(|| UNKNOWN_DISPLAY.to_string()),
            wbc: format_number(labs.wbc),
            lactate: format_number(labs.lactate),
            crp: format_number(labs.crp),
        };

        let chart = TrendChart {
            title: TREND_TITLE,
            labels: TREND_LABELS,
            samples: record.hr_history.samples().to_vec(),
            suggested_min: TREND_SUGGESTED_MIN,
            suggested_max: TREND_SUGGESTED_MAX,
            label_mismatch: !record.hr_history.matches_labels(),
        };

        Ok(Self {
            fields,
            qsofa,
            status: tier.into(),
            chart,
        })
    }
}

/// Whole numbers print without a fractional part (`75`), others as given (`8.5`).
fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => UNKNOWN_DISPLAY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{import_patients, DashboardError, SampleScenario};

    #[test]
    fn sepsis_sample_view() {
        let view = DashboardView::build(&SampleScenario::SepsisAlert.record()).expect("view");

        assert_eq!(view.qsofa.score, 3);
        assert_eq!(view.status.tier, RiskTier::Alert);
        assert_eq!(view.status.label, "Sepsis Alert!");
        assert_eq!(view.status.status_class, "status-alert");
        assert_eq!(view.fields.patient_id, "P003");
        assert_eq!(view.fields.hr, "110");
        assert_eq!(view.fields.temp, "38.5");
        assert_eq!(view.fields.wbc, "18.2");
        assert_eq!(view.chart.labels, ["-4h", "-3h", "-2h", "-1h", "Now"]);
        assert_eq!(view.chart.samples, vec![100.0, 105.0, 108.0, 112.0, 110.0]);
        assert!(!view.chart.label_mismatch);
    }

    #[test]
    fn temperature_keeps_one_decimal() {
        let view = DashboardView::build(&SampleScenario::Normal.record()).expect("view");
        assert_eq!(view.fields.temp, "37.0");
        assert_eq!(view.status.tier, RiskTier::Normal);
    }

    #[test]
    fn missing_fields_render_unknown() {
        let raw = r#"{"patients": [
            { "info": { "id": "M" }, "vitals": { "rr": 22, "sbp": 130, "ams": false } }
        ]}"#;
        let record = import_patients(raw).expect("import").remove(0);
        let view = DashboardView::build(&record).expect("view");

        assert_eq!(view.fields.age, UNKNOWN_DISPLAY);
        assert_eq!(view.fields.gender, UNKNOWN_DISPLAY);
        assert_eq!(view.fields.hr, UNKNOWN_DISPLAY);
        assert_eq!(view.fields.temp, UNKNOWN_DISPLAY);
        assert_eq!(view.fields.crp, UNKNOWN_DISPLAY);
        assert_eq!(view.status.tier, RiskTier::Watch);
        assert!(view.chart.samples.is_empty());
        assert!(view.chart.label_mismatch);
    }

    #[test]
    fn invalid_vitals_abort_the_view() {
        let mut record = SampleScenario::Normal.record();
        record.vitals.sbp = f64::NAN;
        let err = DashboardView::build(&record).expect_err("should reject");
        assert!(matches!(
            err,
            DashboardError::InvalidVitals { field: "sbp", .. }
        ));
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let view = DashboardView::build(&SampleScenario::AtRisk.record()).expect("view");
        let json = serde_json::to_value(&view).expect("serialise");
        assert_eq!(json["fields"]["patientId"], "P002");
        assert_eq!(json["qsofa"]["rrHigh"], false);
        assert_eq!(json["status"]["statusClass"], "status-normal");
        assert_eq!(json["chart"]["suggestedMax"], 140.0);
    }
}
