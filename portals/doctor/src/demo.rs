//! Seeded demo data for the doctor portal.
//!
//! Each collection seeds once when its store key is absent or empty and is
//! mutated in place afterwards.

use chrono::NaiveDate;

use medibook_shared::time::parse_clock;
use medibook_shared::types::AppointmentStatus;

use crate::types::{DoctorAppointment, EarningsPeriod, EarningsSummary, Patient, PaymentRecord};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid demo date")
}

/// The four seeded roster patients.
pub fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            last_visit: date(2025, 8, 20),
            next_appointment: Some(date(2025, 9, 10)),
            condition: "Hypertension".to_string(),
            phone: "+91-9876543210".to_string(),
            age: 45,
        },
        Patient {
            id: "2".to_string(),
            name: "Jane Smith".to_string(),
            last_visit: date(2025, 8, 25),
            next_appointment: Some(date(2025, 9, 5)),
            condition: "Diabetes".to_string(),
            phone: "+91-9876543211".to_string(),
            age: 52,
        },
        Patient {
            id: "3".to_string(),
            name: "Mike Johnson".to_string(),
            last_visit: date(2025, 8, 30),
            next_appointment: Some(date(2025, 9, 8)),
            condition: "Chest Pain".to_string(),
            phone: "+91-9876543212".to_string(),
            age: 38,
        },
        Patient {
            id: "4".to_string(),
            name: "Sarah Wilson".to_string(),
            last_visit: date(2025, 8, 15),
            next_appointment: None,
            condition: "Regular Checkup".to_string(),
            phone: "+91-9876543213".to_string(),
            age: 29,
        },
    ]
}

/// The three seeded doctor-side appointments.
pub fn appointments() -> Vec<DoctorAppointment> {
    vec![
        DoctorAppointment {
            id: "1".to_string(),
            patient_name: "John Doe".to_string(),
            date: date(2025, 9, 1),
            time: parse_clock("10:30").expect("valid demo time"),
            appointment_type: "Follow-up".to_string(),
            status: AppointmentStatus::Confirmed,
        },
        DoctorAppointment {
            id: "2".to_string(),
            patient_name: "Jane Smith".to_string(),
            date: date(2025, 9, 1),
            time: parse_clock("11:00").expect("valid demo time"),
            appointment_type: "Consultation".to_string(),
            status: AppointmentStatus::Confirmed,
        },
        DoctorAppointment {
            id: "3".to_string(),
            patient_name: "Mike Johnson".to_string(),
            date: date(2025, 9, 1),
            time: parse_clock("14:30").expect("valid demo time"),
            appointment_type: "New Patient".to_string(),
            status: AppointmentStatus::Pending,
        },
    ]
}

/// Recent consultation payments shown on the dashboard.
pub fn recent_payments() -> Vec<PaymentRecord> {
    vec![
        PaymentRecord {
            patient: "John Doe".to_string(),
            date: date(2025, 9, 1),
            amount: 500,
        },
        PaymentRecord {
            patient: "Jane Smith".to_string(),
            date: date(2025, 8, 30),
            amount: 500,
        },
        PaymentRecord {
            patient: "Mike Johnson".to_string(),
            date: date(2025, 8, 28),
            amount: 500,
        },
        PaymentRecord {
            patient: "Sarah Wilson".to_string(),
            date: date(2025, 8, 25),
            amount: 500,
        },
    ]
}

/// Fixed earnings lookup table keyed by period.
pub fn earnings(period: EarningsPeriod) -> EarningsSummary {
    match period {
        EarningsPeriod::Month => EarningsSummary {
            consultations: 127,
            earnings: "₹63,500".to_string(),
            average: "₹500".to_string(),
        },
        EarningsPeriod::Quarter => EarningsSummary {
            consultations: 380,
            earnings: "₹1,90,000".to_string(),
            average: "₹500".to_string(),
        },
        EarningsPeriod::Year => EarningsSummary {
            consultations: 1520,
            earnings: "₹7,60,000".to_string(),
            average: "₹500".to_string(),
        },
    }
}

/// Fixed dashboard figures not derived from stored state.
pub const MONTHLY_EARNINGS: &str = "₹63,500";
pub const RATING: &str = "4.8";
