//! Doctor-side entity types and validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use medibook_shared::types::AppointmentStatus;
use medibook_shared::validation::{ValidationCode, ValidationResult};

// ============================================================================
// Roster Types
// ============================================================================

/// A patient on the doctor's roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique id within the roster.
    pub id: String,
    pub name: String,
    pub last_visit: NaiveDate,
    /// Empty string on the wire when no appointment is scheduled.
    #[serde(with = "medibook_shared::time::date_or_empty")]
    pub next_appointment: Option<NaiveDate>,
    pub condition: String,
    pub phone: String,
    pub age: u32,
}

/// An appointment as seen from the doctor's side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAppointment {
    pub id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    #[serde(with = "medibook_shared::time::clock")]
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
}

/// Roster filter selected in the patients section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatientFilter {
    #[default]
    All,
    /// Last visit within the last calendar month.
    Recent,
    /// Next appointment scheduled.
    Upcoming,
}

impl PatientFilter {
    /// Parse the filter control value; anything unrecognized means no
    /// filter.
    pub fn parse(value: &str) -> Self {
        match value {
            "recent" => PatientFilter::Recent,
            "upcoming" => PatientFilter::Upcoming,
            _ => PatientFilter::All,
        }
    }
}

// ============================================================================
// Dashboard Types
// ============================================================================

/// Aggregate dashboard counters.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardStats {
    pub today_appointments: usize,
    pub total_patients: usize,
    pub monthly_earnings: String,
    pub rating: String,
}

/// A consultation payment shown in the recent-payments list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub patient: String,
    pub date: NaiveDate,
    pub amount: u32,
}

/// Period selector for the earnings section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EarningsPeriod {
    #[default]
    Month,
    Quarter,
    Year,
}

impl EarningsPeriod {
    /// Parse the period control value, defaulting to month for anything
    /// unrecognized.
    pub fn parse(value: &str) -> Self {
        match value {
            "quarter" => EarningsPeriod::Quarter,
            "year" => EarningsPeriod::Year,
            _ => EarningsPeriod::Month,
        }
    }
}

/// Earnings figures for one period.
#[derive(Clone, Debug, PartialEq)]
pub struct EarningsSummary {
    pub consultations: u32,
    pub earnings: String,
    pub average: String,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate a roster patient record.
pub fn validate_patient(patient: &Patient) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require("id", &patient.id);
    result.require("name", &patient.name);
    result.require("condition", &patient.condition);
    if patient.age == 0 || patient.age > 130 {
        result.add_error("age", "age out of range", ValidationCode::OutOfRange);
    }
    result
}

/// Validate a doctor-side appointment record.
pub fn validate_appointment(appointment: &DoctorAppointment) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require("id", &appointment.id);
    result.require("patientName", &appointment.patient_name);
    result.require("type", &appointment.appointment_type);
    result
}
