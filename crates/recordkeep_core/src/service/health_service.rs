//! Patient and prescription lookup use-cases.
//!
//! # Invariants
//! - Prescriptions are grouped by `patient_id` on read; no index is kept that
//!   could drift from the prescription repository.

use crate::model::health::{Patient, PatientId, Prescription, PrescriptionId};
use crate::repo::keyed_repo::{DuplicateIdError, KeyedRepository, NotFoundError, RepoError};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct HealthService {
    patients: KeyedRepository<Patient>,
    prescriptions: KeyedRepository<Prescription>,
}

impl HealthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds two patients and three prescriptions issued on `issued`.
    pub fn seed_data(&mut self, issued: NaiveDate) -> Result<(), RepoError<u32>> {
        self.add_patient(Patient::new(1, "Alice", 28, "Female"))?;
        self.add_patient(Patient::new(2, "Bob", 35, "Male"))?;

        self.add_prescription(Prescription::new(1, 1, "Paracetamol", issued))?;
        self.add_prescription(Prescription::new(2, 1, "Ibuprofen", issued))?;
        self.add_prescription(Prescription::new(3, 2, "Antibiotic", issued))?;

        info!(
            "event=health_seed module=service status=ok patients={} prescriptions={}",
            self.patients.len(),
            self.prescriptions.len()
        );
        Ok(())
    }

    pub fn add_patient(&mut self, patient: Patient) -> Result<(), DuplicateIdError<PatientId>> {
        self.patients.add(patient)
    }

    pub fn add_prescription(
        &mut self,
        prescription: Prescription,
    ) -> Result<(), DuplicateIdError<PrescriptionId>> {
        self.prescriptions.add(prescription)
    }

    pub fn get_patient(&self, id: PatientId) -> Result<&Patient, NotFoundError<PatientId>> {
        self.patients.get_by_id(&id)
    }

    pub fn remove_prescription(
        &mut self,
        id: PrescriptionId,
    ) -> Result<Prescription, NotFoundError<PrescriptionId>> {
        self.prescriptions.remove(&id)
    }

    /// Lists patients ordered by id.
    pub fn patients(&self) -> Vec<Patient> {
        let mut patients = self.patients.list_all();
        patients.sort_by_key(|patient| patient.id);
        patients
    }

    /// Groups prescriptions by patient id, each group ordered by prescription id.
    pub fn prescriptions_by_patient(&self) -> BTreeMap<PatientId, Vec<Prescription>> {
        let mut grouped: BTreeMap<PatientId, Vec<Prescription>> = BTreeMap::new();
        for prescription in self.prescriptions.iter() {
            grouped
                .entry(prescription.patient_id)
                .or_default()
                .push(prescription.clone());
        }
        for group in grouped.values_mut() {
            group.sort_by_key(|prescription| prescription.id);
        }
        grouped
    }

    /// Returns the prescriptions for one patient, empty when there are none.
    pub fn prescriptions_for(&self, patient_id: PatientId) -> Vec<Prescription> {
        let mut found: Vec<Prescription> = self
            .prescriptions
            .iter()
            .filter(|prescription| prescription.patient_id == patient_id)
            .cloned()
            .collect();
        found.sort_by_key(|prescription| prescription.id);
        found
    }
}
