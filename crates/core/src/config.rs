//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the importer. The core
//! never reads environment variables itself; binaries read them and hand the raw values to the
//! parsing helpers below.

use crate::{DashboardError, DashboardResult};

/// What the importer does when a single record in a payload fails validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Reject the whole payload on the first invalid record.
    #[default]
    FailWhole,
    /// Drop invalid records and report each one alongside the accepted list.
    SkipInvalid,
}

/// How heart rate histories whose length differs from the five trend labels are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Keep the last five samples, or pad at the front with the earliest sample.
    #[default]
    Normalise,
    /// Keep the samples exactly as supplied.
    Preserve,
}

impl std::str::FromStr for ImportPolicy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-whole" | "strict" => Ok(ImportPolicy::FailWhole),
            "skip-invalid" | "skip" => Ok(ImportPolicy::SkipInvalid),
            other => Err(DashboardError::InvalidConfig(format!(
                "unknown import policy '{other}' (expected 'fail-whole' or 'skip-invalid')"
            ))),
        }
    }
}

impl std::str::FromStr for HistoryPolicy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalise" | "normalize" => Ok(HistoryPolicy::Normalise),
            "preserve" => Ok(HistoryPolicy::Preserve),
            other => Err(DashboardError::InvalidConfig(format!(
                "unknown history policy '{other}' (expected 'normalise' or 'preserve')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreConfig {
    import_policy: ImportPolicy,
    history_policy: HistoryPolicy,
}

impl CoreConfig {
    pub fn new(import_policy: ImportPolicy, history_policy: HistoryPolicy) -> Self {
        Self {
            import_policy,
            history_policy,
        }
    }

    pub fn import_policy(&self) -> ImportPolicy {
        self.import_policy
    }

    pub fn history_policy(&self) -> HistoryPolicy {
        self.history_policy
    }
}

/// Parse the import policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ImportPolicy::FailWhole`].
pub fn import_policy_from_env_value(value: Option<String>) -> DashboardResult<ImportPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ImportPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse the heart rate history policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`HistoryPolicy::Normalise`].
pub fn history_policy_from_env_value(value: Option<String>) -> DashboardResult<HistoryPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<HistoryPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_behaviour() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.import_policy(), ImportPolicy::FailWhole);
        assert_eq!(cfg.history_policy(), HistoryPolicy::Normalise);
    }

    #[test]
    fn missing_or_blank_values_fall_back_to_defaults() {
        assert_eq!(
            import_policy_from_env_value(None).expect("default"),
            ImportPolicy::FailWhole
        );
        assert_eq!(
            history_policy_from_env_value(Some("   ".into())).expect("default"),
            HistoryPolicy::Normalise
        );
    }

    #[test]
    fn parses_accepted_spellings() {
        assert_eq!(
            import_policy_from_env_value(Some(" Skip-Invalid ".into())).expect("parse"),
            ImportPolicy::SkipInvalid
        );
        assert_eq!(
            import_policy_from_env_value(Some("strict".into())).expect("parse"),
            ImportPolicy::FailWhole
        );
        assert_eq!(
            history_policy_from_env_value(Some("normalize".into())).expect("parse"),
            HistoryPolicy::Normalise
        );
        assert_eq!(
            history_policy_from_env_value(Some("preserve".into())).expect("parse"),
            HistoryPolicy::Preserve
        );
    }

    #[test]
    fn rejects_unknown_values() {
        let err = import_policy_from_env_value(Some("sometimes".into())).expect_err("reject");
        assert!(matches!(err, DashboardError::InvalidConfig(msg) if msg.contains("sometimes")));

        let err = history_policy_from_env_value(Some("pad".into())).expect_err("reject");
        assert!(matches!(err, DashboardError::InvalidConfig(msg) if msg.contains("pad")));
    }
}
