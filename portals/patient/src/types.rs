//! Patient-side entity types and validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use medibook_shared::types::AppointmentStatus;
use medibook_shared::validation::{ValidationCode, ValidationResult};

// ============================================================================
// Directory Types
// ============================================================================

/// A doctor in the shared directory. The directory is read-mostly: the
/// patient portal seeds and owns it, the doctor portal never writes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique id within the directory.
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub city: String,
    /// Years of experience.
    pub experience: u32,
    pub rating: f64,
    /// Consultation fee in rupees.
    pub fee: u32,
}

/// Directory filter control state. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctorSearch {
    /// Case-insensitive substring over name, specialty and hospital.
    pub search: String,
    /// Exact city match.
    pub city: String,
    /// Exact specialty match.
    pub specialty: String,
}

// ============================================================================
// Appointment Types
// ============================================================================

/// An appointment as seen from the patient's side.
///
/// The id is derived from the creation timestamp, unique, and never
/// reused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientAppointment {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "medibook_shared::time::clock")]
    pub time: NaiveTime,
    pub doctor: String,
    pub hospital: String,
    pub specialty: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: String,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate a directory entry.
pub fn validate_doctor(doctor: &Doctor) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require("id", &doctor.id);
    result.require("name", &doctor.name);
    result.require("specialty", &doctor.specialty);
    result.require("hospital", &doctor.hospital);
    result.require("city", &doctor.city);
    if !(0.0..=5.0).contains(&doctor.rating) {
        result.add_error("rating", "rating out of range", ValidationCode::OutOfRange);
    }
    result
}
