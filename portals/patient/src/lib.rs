//! MediBook Patient Portal
//!
//! Patient-facing portal controller covering:
//! - Appointment table with booking and cancellation
//! - Searchable doctor directory with city and specialty filters
//! - Booking form flow with doctor pre-selection
//!
//! State is loaded from the injected key-value store at construction,
//! seeded with demo values when empty, and persisted back after every
//! mutation. Rendering goes through the [`view::PatientView`] binding.

pub mod demo;
pub mod portal;
pub mod types;
pub mod view;

pub use portal::{BookingForm, PatientPortal};
pub use types::{Doctor, DoctorSearch, PatientAppointment};
pub use view::PatientView;
