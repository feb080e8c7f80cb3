//! MediBook Doctor Portal
//!
//! Doctor-facing portal controller covering:
//! - Daily schedule grid with slot availability toggling
//! - Patient roster with search and filtering
//! - Appointment list and dashboard stats
//! - Recent payments and period earnings
//!
//! State is loaded from the injected key-value store at construction,
//! seeded with demo values when empty, and persisted back after every
//! mutation. Rendering goes through the [`view::DoctorView`] binding.

pub mod demo;
pub mod portal;
pub mod types;
pub mod view;

pub use portal::{AvailabilityForm, DoctorPortal};
pub use types::{
    DashboardStats, DoctorAppointment, EarningsPeriod, EarningsSummary, Patient, PatientFilter,
    PaymentRecord,
};
pub use view::DoctorView;
