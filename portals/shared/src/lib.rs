//! MediBook Shared Utilities
//!
//! This crate provides common functionality for both portal crates:
//! - Key-value store capability and JSON document helpers
//! - Session/auth gate with role checking
//! - Field-level validation accumulator
//! - Notification center with auto-dismiss
//! - Deferred task queue with cancellation
//! - Clock-time and calendar-date formatting

pub mod auth;
pub mod error;
pub mod notify;
pub mod schedule;
pub mod store;
pub mod tasks;
pub mod time;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use auth::{AuthGate, AuthOutcome, Role, Route, SessionUser};
pub use error::{PortalError, PortalResult};
pub use notify::{Notification, NotificationCenter, Severity};
pub use schedule::{Schedule, SlotStatus, TimeSlot};
pub use store::{KeyValueStore, MemoryStore};
pub use tasks::{TaskHandle, TaskQueue};
pub use types::AppointmentStatus;
pub use validation::{ValidationCode, ValidationResult};
