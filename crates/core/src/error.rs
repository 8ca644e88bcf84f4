/// Errors raised while parsing an import payload into patient records.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("malformed payload: {0}")]
    MalformedPayload(serde_json::Error),
    #[error("missing or invalid patients list")]
    MissingPatientsList,
    #[error("invalid patient record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid vitals: {field} {reason}")]
    InvalidVitals { field: &'static str, reason: String },
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("selection index {index} is out of range for {len} patient(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no patient with id '{0}' is loaded")]
    UnknownPatient(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
