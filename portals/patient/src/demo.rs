//! Seeded demo data for the patient portal.

use chrono::NaiveDate;

use medibook_shared::time::parse_clock;
use medibook_shared::types::AppointmentStatus;

use crate::types::{Doctor, PatientAppointment};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid demo date")
}

/// The two seeded patient-side appointments.
pub fn appointments() -> Vec<PatientAppointment> {
    vec![
        PatientAppointment {
            id: "1".to_string(),
            date: date(2025, 9, 5),
            time: parse_clock("10:15").expect("valid demo time"),
            doctor: "Dr. Rajesh Sharma".to_string(),
            hospital: "Apollo Speciality".to_string(),
            specialty: "Cardiology".to_string(),
            status: AppointmentStatus::Confirmed,
            reason: String::new(),
        },
        PatientAppointment {
            id: "2".to_string(),
            date: date(2025, 9, 8),
            time: parse_clock("14:00").expect("valid demo time"),
            doctor: "Dr. Priya Singh".to_string(),
            hospital: "Fortis Healthcare".to_string(),
            specialty: "Pediatrics".to_string(),
            status: AppointmentStatus::Pending,
            reason: String::new(),
        },
    ]
}

/// The five seeded directory doctors.
pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "1".to_string(),
            name: "Dr. Rajesh Sharma".to_string(),
            specialty: "Cardiology".to_string(),
            hospital: "Apollo Speciality".to_string(),
            city: "Delhi".to_string(),
            experience: 12,
            rating: 4.8,
            fee: 500,
        },
        Doctor {
            id: "2".to_string(),
            name: "Dr. Priya Singh".to_string(),
            specialty: "Pediatrics".to_string(),
            hospital: "Fortis Healthcare".to_string(),
            city: "Mumbai".to_string(),
            experience: 8,
            rating: 4.6,
            fee: 400,
        },
        Doctor {
            id: "3".to_string(),
            name: "Dr. Sunita Nair".to_string(),
            specialty: "Dermatology".to_string(),
            hospital: "Green Valley Hospital".to_string(),
            city: "Mumbai".to_string(),
            experience: 10,
            rating: 4.7,
            fee: 450,
        },
        Doctor {
            id: "4".to_string(),
            name: "Dr. Rohan Shah".to_string(),
            specialty: "Orthopedics".to_string(),
            hospital: "Metro Care Clinic".to_string(),
            city: "Delhi".to_string(),
            experience: 15,
            rating: 4.9,
            fee: 600,
        },
        Doctor {
            id: "5".to_string(),
            name: "Dr. Kavita Rao".to_string(),
            specialty: "Neurology".to_string(),
            hospital: "City General Hospital".to_string(),
            city: "Bengaluru".to_string(),
            experience: 6,
            rating: 4.5,
            fee: 350,
        },
    ]
}
