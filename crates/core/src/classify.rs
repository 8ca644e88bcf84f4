//! Risk tier classification of a qSOFA score.

use crate::constants::MAX_QSOFA_SCORE;
use crate::{DashboardError, DashboardResult};
use serde::Serialize;

/// User-facing classification derived from the numeric score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RiskTier {
    /// Score 0.
    Normal,
    /// Score 1.
    Watch,
    /// Score 2 or 3.
    Alert,
}

impl RiskTier {
    /// Banner heading.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Normal => "Normal",
            RiskTier::Watch => "At-Risk / Watch",
            RiskTier::Alert => "Sepsis Alert!",
        }
    }

    /// Advisory text shown under the banner.
    pub fn advisory(&self) -> &'static str {
        match self {
            RiskTier::Normal => "All vital signs and labs are within normal ranges.",
            RiskTier::Watch => "Patient shows some warning signs. Monitor closely.",
            RiskTier::Alert => {
                "High risk of poor outcome. Immediate medical intervention required."
            }
        }
    }

    /// Style class the status card carries for this tier.
    pub fn status_class(&self) -> &'static str {
        match self {
            RiskTier::Normal => "status-normal",
            RiskTier::Watch => "status-watch",
            RiskTier::Alert => "status-alert",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Maps a qSOFA score to its risk tier.
///
/// # Errors
///
/// Returns [`DashboardError::InvariantViolation`] for a score above 3. The scorer cannot produce
/// one, so callers treat this as a programming error.
pub fn classify(score: u8) -> DashboardResult<RiskTier> {
    match score {
        0 => Ok(RiskTier::Normal),
        1 => Ok(RiskTier::Watch),
        2..=MAX_QSOFA_SCORE => Ok(RiskTier::Alert),
        other => Err(DashboardError::InvariantViolation(format!(
            "qSOFA score {other} is outside 0..={MAX_QSOFA_SCORE}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_score_to_its_tier() {
        assert_eq!(classify(0).expect("tier"), RiskTier::Normal);
        assert_eq!(classify(1).expect("tier"), RiskTier::Watch);
        assert_eq!(classify(2).expect("tier"), RiskTier::Alert);
        assert_eq!(classify(3).expect("tier"), RiskTier::Alert);
    }

    #[test]
    fn out_of_range_score_is_an_invariant_violation() {
        let err = classify(4).expect_err("should reject");
        assert!(matches!(err, DashboardError::InvariantViolation(msg) if msg.contains('4')));
    }

    #[test]
    fn tier_text_matches_banner_copy() {
        assert_eq!(RiskTier::Alert.label(), "Sepsis Alert!");
        assert_eq!(RiskTier::Watch.label(), "At-Risk / Watch");
        assert_eq!(RiskTier::Normal.to_string(), "Normal");
        assert!(RiskTier::Watch.advisory().contains("Monitor closely"));
        assert!(RiskTier::Alert.advisory().contains("Immediate medical intervention"));
        assert_eq!(RiskTier::Alert.status_class(), "status-alert");
    }
}
