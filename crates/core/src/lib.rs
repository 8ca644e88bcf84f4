//! # qSOFA Core
//!
//! Clinical scoring and patient-record ingestion for the sepsis risk dashboard.
//!
//! This crate contains pure data operations only:
//! - Patient record model and built-in sample scenarios
//! - Import payload parsing and validation
//! - qSOFA scoring and risk tier classification
//! - Session/selection state with change notifications
//! - A render-ready dashboard view of the active record
//!
//! **No presentation or I/O concerns**: reading files, HTTP, and rendering belong in `api-rest`,
//! the `qsofa` CLI, or the browser.

pub mod classify;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod import;
pub mod model;
pub mod samples;
pub mod scoring;
pub mod session;
pub mod text;
pub mod validation;

pub use classify::{classify, RiskTier};
pub use config::{CoreConfig, HistoryPolicy, ImportPolicy};
pub use dashboard::{DashboardView, DisplayFields, StatusBanner, TrendChart};
pub use error::{DashboardError, DashboardResult, ImportError};
pub use import::{import_patients, ImportIssue, ImportReport, Importer};
pub use model::{HeartRateHistory, Labs, PatientInfo, PatientList, PatientRecord, Vitals};
pub use samples::{sample_patients, SampleScenario};
pub use scoring::{score, ScoreResult};
pub use session::{Session, SessionEvent, SessionObserver};
pub use text::NonEmptyText;
