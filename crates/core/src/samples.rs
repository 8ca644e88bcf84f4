//! Built-in demonstration patients.
//!
//! Three scenarios covering each risk tier's neighbourhood. A fresh session starts on
//! [`SampleScenario::Normal`].

use crate::{HeartRateHistory, Labs, NonEmptyText, PatientInfo, PatientList, PatientRecord, Vitals};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleScenario {
    Normal,
    AtRisk,
    SepsisAlert,
}

impl SampleScenario {
    pub const ALL: [SampleScenario; 3] = [
        SampleScenario::Normal,
        SampleScenario::AtRisk,
        SampleScenario::SepsisAlert,
    ];

    /// Identifier of the sample record for this scenario.
    pub fn patient_id(&self) -> &'static str {
        match self {
            SampleScenario::Normal => "P001",
            SampleScenario::AtRisk => "P002",
            SampleScenario::SepsisAlert => "P003",
        }
    }

    pub fn record(&self) -> PatientRecord {
        let (age, gender, vitals, labs, history) = match self {
            SampleScenario::Normal => (
                55,
                "Male",
                (75.0, 16.0, 120.0, 37.0, false),
                (8.5, 1.1, 5.0),
                [78.0, 76.0, 75.0, 77.0, 75.0],
            ),
            SampleScenario::AtRisk => (
                68,
                "Female",
                (95.0, 21.0, 105.0, 37.9, false),
                (12.5, 1.8, 45.0),
                [90.0, 92.0, 95.0, 93.0, 95.0],
            ),
            SampleScenario::SepsisAlert => (
                76,
                "Male",
                (110.0, 25.0, 90.0, 38.5, true),
                (18.2, 4.2, 150.0),
                [100.0, 105.0, 108.0, 112.0, 110.0],
            ),
        };
        let (hr, rr, sbp, temp, ams) = vitals;
        let (wbc, lactate, crp) = labs;

        PatientRecord {
            info: PatientInfo::new(
                NonEmptyText::from_trusted(self.patient_id()),
                None,
                Some(age),
                Some(gender.to_string()),
            ),
            vitals: Vitals {
                hr: Some(hr),
                rr,
                sbp,
                temp: Some(temp),
                ams,
            },
            labs: Labs {
                wbc: Some(wbc),
                lactate: Some(lactate),
                crp: Some(crp),
            },
            hr_history: HeartRateHistory::new(history.to_vec()),
        }
    }
}

/// All sample records, in scenario order.
pub fn sample_patients() -> PatientList {
    SampleScenario::ALL.iter().map(|s| s.record()).collect()
}
