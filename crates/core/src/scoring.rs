//! qSOFA scoring.
//!
//! Three criteria, one point each, evaluated independently:
//! - respiratory rate >= 22 breaths/min
//! - systolic blood pressure <= 100 mmHg
//! - altered mental status
//!
//! The scorer is a pure function over [`Vitals`]. It refuses to score vitals whose respiratory
//! rate or systolic pressure is not a usable number rather than letting a `NaN` comparison decide
//! a criterion.

use crate::constants::{RR_THRESHOLD, SBP_THRESHOLD};
use crate::validation::validate_positive;
use crate::{DashboardError, DashboardResult, Vitals};
use serde::Serialize;

/// Score and the component flags that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u8,
    pub rr_high: bool,
    pub sbp_low: bool,
    pub ams_positive: bool,
}

impl ScoreResult {
    /// Human-readable names of the criteria that scored a point.
    pub fn positive_criteria(&self) -> Vec<&'static str> {
        [
            (self.rr_high, "respiratory rate >= 22/min"),
            (self.sbp_low, "systolic BP <= 100 mmHg"),
            (self.ams_positive, "altered mental status"),
        ]
        .into_iter()
        .filter_map(|(hit, name)| hit.then_some(name))
        .collect()
    }
}

/// Computes the qSOFA score for a set of vitals.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidVitals`] if `rr` or `sbp` is not a positive finite number.
pub fn score(vitals: &Vitals) -> DashboardResult<ScoreResult> {
    let rr = validate_positive(vitals.rr).map_err(|e| DashboardError::InvalidVitals {
        field: "rr",
        reason: e.to_string(),
    })?;
    let sbp = validate_positive(vitals.sbp).map_err(|e| DashboardError::InvalidVitals {
        field: "sbp",
        reason: e.to_string(),
    })?;

    let rr_high = rr >= RR_THRESHOLD;
    let sbp_low = sbp <= SBP_THRESHOLD;
    let ams_positive = vitals.ams;

    let score = [rr_high, sbp_low, ams_positive]
        .into_iter()
        .filter(|hit| *hit)
        .count() as u8;

    Ok(ScoreResult {
        score,
        rr_high,
        sbp_low,
        ams_positive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(rr: f64, sbp: f64, ams: bool) -> Vitals {
        Vitals {
            hr: Some(80.0),
            rr,
            sbp,
            temp: Some(37.0),
            ams,
        }
    }

    #[test]
    fn no_criteria_scores_zero() {
        let result = score(&vitals(16.0, 120.0, false)).expect("score");
        assert_eq!(result.score, 0);
        assert!(!result.rr_high && !result.sbp_low && !result.ams_positive);
        assert!(result.positive_criteria().is_empty());
    }

    #[test]
    fn each_criterion_alone_scores_one() {
        let rr_only = score(&vitals(30.0, 120.0, false)).expect("score");
        assert_eq!(rr_only.score, 1);
        assert!(rr_only.rr_high && !rr_only.sbp_low && !rr_only.ams_positive);

        let sbp_only = score(&vitals(16.0, 85.0, false)).expect("score");
        assert_eq!(sbp_only.score, 1);
        assert!(!sbp_only.rr_high && sbp_only.sbp_low && !sbp_only.ams_positive);

        let ams_only = score(&vitals(16.0, 120.0, true)).expect("score");
        assert_eq!(ams_only.score, 1);
        assert!(!ams_only.rr_high && !ams_only.sbp_low && ams_only.ams_positive);
        assert_eq!(ams_only.positive_criteria(), vec!["altered mental status"]);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert!(score(&vitals(22.0, 120.0, false)).expect("score").rr_high);
        assert!(!score(&vitals(21.0, 120.0, false)).expect("score").rr_high);
        assert!(score(&vitals(16.0, 100.0, false)).expect("score").sbp_low);
        assert!(!score(&vitals(16.0, 101.0, false)).expect("score").sbp_low);
    }

    #[test]
    fn sepsis_example_scores_three() {
        let result = score(&Vitals {
            hr: Some(110.0),
            rr: 25.0,
            sbp: 90.0,
            temp: Some(38.5),
            ams: true,
        })
        .expect("score");
        assert_eq!(result.score, 3);
        assert!(result.rr_high && result.sbp_low && result.ams_positive);
    }

    #[test]
    fn at_risk_example_scores_zero() {
        let result = score(&Vitals {
            hr: Some(95.0),
            rr: 21.0,
            sbp: 105.0,
            temp: Some(37.9),
            ams: false,
        })
        .expect("score");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn missing_informational_vitals_do_not_block_scoring() {
        let result = score(&Vitals {
            hr: None,
            rr: 24.0,
            sbp: 95.0,
            temp: None,
            ams: false,
        })
        .expect("score");
        assert_eq!(result.score, 2);
    }

    #[test]
    fn nan_respiratory_rate_is_rejected() {
        let err = score(&vitals(f64::NAN, 120.0, false)).expect_err("should reject NaN");
        assert!(matches!(
            err,
            DashboardError::InvalidVitals { field: "rr", .. }
        ));
    }

    #[test]
    fn non_positive_or_infinite_sbp_is_rejected() {
        let err = score(&vitals(16.0, 0.0, false)).expect_err("should reject zero");
        assert!(matches!(
            err,
            DashboardError::InvalidVitals { field: "sbp", .. }
        ));

        let err = score(&vitals(16.0, f64::INFINITY, false)).expect_err("should reject inf");
        assert!(matches!(err, DashboardError::InvalidVitals { field: "sbp", reason } if reason.contains("finite")));
    }

    #[test]
    fn scoring_is_deterministic() {
        let v = vitals(23.0, 99.0, false);
        assert_eq!(score(&v).expect("score"), score(&v).expect("score"));
    }
}
