//! Patient and prescription records.
//!
//! # Invariants
//! - `Prescription::patient_id` is a reference by value; the repository does
//!   not enforce that the patient exists.

use crate::model::entity::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type PatientId = u32;
pub type PrescriptionId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub gender: String,
}

impl Patient {
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            gender: gender.into(),
        }
    }
}

impl Entity for Patient {
    type Id = PatientId;

    fn id(&self) -> PatientId {
        self.id
    }
}

impl Display for Patient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (ID: {}, Age: {}, Gender: {})",
            self.name, self.id, self.age, self.gender
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_id: PatientId,
    pub medication_name: String,
    pub date_issued: NaiveDate,
}

impl Prescription {
    pub fn new(
        id: PrescriptionId,
        patient_id: PatientId,
        medication_name: impl Into<String>,
        date_issued: NaiveDate,
    ) -> Self {
        Self {
            id,
            patient_id,
            medication_name: medication_name.into(),
            date_issued,
        }
    }
}

impl Entity for Prescription {
    type Id = PrescriptionId;

    fn id(&self) -> PrescriptionId {
        self.id
    }
}

impl Display for Prescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Issued: {})", self.medication_name, self.date_issued)
    }
}
