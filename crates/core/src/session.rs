//! Session and selection state.
//!
//! A [`Session`] holds the loaded patient list and the active selection for the lifetime of one
//! dashboard session. It is the only mutable state in the core and changes only through
//! [`Session::load_list`] and the `select*` operations. Presentation code subscribes with a
//! [`SessionObserver`] to re-render after each change.
//!
//! Failed operations leave the session untouched and notify nobody.

use crate::samples::sample_patients;
use crate::{DashboardError, DashboardResult, PatientList, PatientRecord};

/// Change notifications delivered to observers after a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The list was replaced wholesale.
    ListLoaded {
        len: usize,
        selected: Option<usize>,
    },
    /// A different (or the same) record was selected.
    SelectionChanged { index: usize, patient_id: String },
}

/// Receives [`SessionEvent`]s.
pub trait SessionObserver: Send {
    fn on_change(&self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: Fn(&SessionEvent) + Send,
{
    fn on_change(&self, event: &SessionEvent) {
        self(event)
    }
}

#[derive(Default)]
pub struct Session {
    patients: PatientList,
    selected: Option<usize>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("patients", &self.patients.len())
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// An empty session with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session preloaded with the built-in samples, first sample selected.
    pub fn with_samples() -> Self {
        let mut session = Self::new();
        session.load_list(sample_patients());
        session
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the held list. Selects index 0 when the list is non-empty, otherwise clears the
    /// selection.
    pub fn load_list(&mut self, list: PatientList) {
        self.selected = if list.is_empty() { None } else { Some(0) };
        self.patients = list;

        tracing::debug!(
            "session loaded {} patient(s), selected {:?}",
            self.patients.len(),
            self.selected
        );
        self.notify(SessionEvent::ListLoaded {
            len: self.patients.len(),
            selected: self.selected,
        });
    }

    /// Selects the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::IndexOutOfRange`] if `index` is not in `0..len`.
    pub fn select(&mut self, index: usize) -> DashboardResult<&PatientRecord> {
        let len = self.patients.len();
        if index >= len {
            return Err(DashboardError::IndexOutOfRange { index, len });
        }

        self.selected = Some(index);
        let patient_id = self.patients[index].id().to_string();
        tracing::debug!("session selected {index} ({patient_id})");
        self.notify(SessionEvent::SelectionChanged { index, patient_id });

        Ok(&self.patients[index])
    }

    /// Selects the first record whose id equals `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownPatient`] if no loaded record has that id.
    pub fn select_by_id(&mut self, id: &str) -> DashboardResult<&PatientRecord> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id() == id.trim())
            .ok_or_else(|| DashboardError::UnknownPatient(id.to_string()))?;
        self.select(index)
    }

    /// The active record, or `None` when the list is empty.
    pub fn current(&self) -> Option<&PatientRecord> {
        self.selected.and_then(|i| self.patients.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn notify(&self, event: SessionEvent) {
        for observer in &self.observers {
            observer.on_change(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{import_patients, SampleScenario};
    use std::sync::{Arc, Mutex};

    fn recording(session: &mut Session) -> Arc<Mutex<Vec<SessionEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |event: &SessionEvent| {
            sink.lock().expect("lock").push(event.clone());
        });
        events
    }

    const TWO_PATIENTS: &str = r#"{"patients": [
        { "info": { "id": "A" }, "vitals": { "rr": 16, "sbp": 120, "ams": false } },
        { "info": { "id": "B" }, "vitals": { "rr": 26, "sbp": 95, "ams": false } }
    ]}"#;

    #[test]
    fn new_session_has_no_selection() {
        let session = Session::new();
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn with_samples_starts_on_normal_scenario() {
        let session = Session::with_samples();
        assert_eq!(session.len(), 3);
        assert_eq!(
            session.current().map(|p| p.id()),
            Some(SampleScenario::Normal.patient_id())
        );
    }

    #[test]
    fn loading_empty_list_clears_selection() {
        let mut session = Session::with_samples();
        let empty = import_patients(r#"{"patients": []}"#).expect("import");
        session.load_list(empty);

        assert!(session.current().is_none());
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn select_second_record_then_out_of_range() {
        let mut session = Session::new();
        session.load_list(import_patients(TWO_PATIENTS).expect("import"));

        let selected = session.select(1).expect("select");
        assert_eq!(selected.id(), "B");
        assert_eq!(session.current().map(|p| p.id()), Some("B"));

        let err = session.select(2).expect_err("should reject");
        assert!(matches!(
            err,
            DashboardError::IndexOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(session.current().map(|p| p.id()), Some("B"));
    }

    #[test]
    fn failed_import_leaves_session_unchanged() {
        let mut session = Session::new();
        session.load_list(import_patients(TWO_PATIENTS).expect("import"));
        session.select(1).expect("select");

        if let Ok(list) = import_patients("{ broken") {
            session.load_list(list);
        }

        assert_eq!(session.len(), 2);
        assert_eq!(session.selected_index(), Some(1));
    }

    #[test]
    fn select_by_id_finds_record() {
        let mut session = Session::with_samples();
        let record = session.select_by_id(" P003 ").expect("select");
        assert_eq!(record.id(), "P003");
        assert_eq!(session.selected_index(), Some(2));

        let err = session.select_by_id("P404").expect_err("should reject");
        assert!(matches!(err, DashboardError::UnknownPatient(id) if id == "P404"));
    }

    #[test]
    fn observers_see_successful_changes_only() {
        let mut session = Session::new();
        let events = recording(&mut session);

        session.load_list(import_patients(TWO_PATIENTS).expect("import"));
        session.select(1).expect("select");
        let _ = session.select(5);
        session.load_list(Vec::new());

        let events = events.lock().expect("lock");
        assert_eq!(
            *events,
            vec![
                SessionEvent::ListLoaded {
                    len: 2,
                    selected: Some(0)
                },
                SessionEvent::SelectionChanged {
                    index: 1,
                    patient_id: "B".into()
                },
                SessionEvent::ListLoaded {
                    len: 0,
                    selected: None
                },
            ]
        );
    }
}
