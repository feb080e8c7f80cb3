//! Patient portal controller.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use medibook_shared::auth::{self, AuthGate, AuthOutcome, Role, Route, SessionUser};
use medibook_shared::error::{PortalError, PortalResult};
use medibook_shared::notify::{NotificationCenter, Severity};
use medibook_shared::schedule::Schedule;
use medibook_shared::store::{self, keys, KeyValueStore};
use medibook_shared::tasks::{TaskHandle, TaskQueue};
use medibook_shared::time::parse_clock;
use medibook_shared::types::AppointmentStatus;
use medibook_shared::validation::{ValidationCode, ValidationResult};

use crate::demo;
use crate::types::{validate_doctor, Doctor, DoctorSearch, PatientAppointment};
use crate::view::PatientView;

/// Delay between logout and navigation back home.
pub const LOGOUT_NAVIGATE_DELAY_MS: u64 = 1_000;

/// Store keys owned by the patient portal, cleared on fallback logout.
const OWNED_KEYS: [&str; 2] = [keys::CURRENT_USER, keys::PATIENT_APPOINTMENTS];

/// Raw booking form fields, validated on submit.
#[derive(Clone, Debug, Default)]
pub struct BookingForm {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// Patient-facing portal controller.
///
/// Owns the appointment list and the doctor directory; every mutation is
/// persisted to the injected store and re-rendered through the view
/// binding.
pub struct PatientPortal {
    store: Box<dyn KeyValueStore>,
    view: Box<dyn PatientView>,
    gate: Option<Box<dyn AuthGate>>,
    notifications: NotificationCenter,
    nav: TaskQueue<Route>,
    logout_pending: Option<TaskHandle>,
    now_ms: u64,
    user: SessionUser,
    appointments: Vec<PatientAppointment>,
    doctors: Vec<Doctor>,
    criteria: DoctorSearch,
    next_appointment_id: u64,
}

impl PatientPortal {
    /// Gate entry, load state, seed demo data into empty keys and render.
    ///
    /// On a failed auth check the redirect is handed to the view and the
    /// portal is not constructed.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        mut view: Box<dyn PatientView>,
        mut gate: Option<Box<dyn AuthGate>>,
    ) -> PortalResult<Self> {
        let outcome = match gate.as_mut() {
            Some(g) => g.check_auth_and_redirect(Role::Patient),
            None => auth::check_session(&*store, Role::Patient),
        };
        let user = match outcome {
            AuthOutcome::Granted(user) => user,
            AuthOutcome::MissingSession { redirect } => {
                view.navigate(redirect);
                return Err(PortalError::Unauthorized("no active session".to_string()));
            }
            AuthOutcome::RoleMismatch { redirect } => {
                view.navigate(redirect);
                return Err(PortalError::Unauthorized(
                    "this page is for patients only".to_string(),
                ));
            }
        };
        view.set_welcome_name(user.display_name());

        let mut portal = Self {
            appointments: store::get_json(&*store, keys::PATIENT_APPOINTMENTS)?
                .unwrap_or_default(),
            doctors: store::get_json(&*store, keys::DOCTORS)?.unwrap_or_default(),
            store,
            view,
            gate,
            notifications: NotificationCenter::new(),
            nav: TaskQueue::new(),
            logout_pending: None,
            now_ms: 0,
            user,
            criteria: DoctorSearch::default(),
            next_appointment_id: Utc::now().timestamp_millis() as u64,
        };
        portal.seed_demo_data()?;
        portal.validate_loaded()?;
        portal.render_all();
        Ok(portal)
    }

    /// Reject a stored directory carrying invalid records before any of
    /// them can be rendered or booked against.
    fn validate_loaded(&self) -> PortalResult<()> {
        let mut check = ValidationResult::new();
        for doctor in &self.doctors {
            check.merge(validate_doctor(doctor));
        }
        check.into_result()
    }

    fn seed_demo_data(&mut self) -> PortalResult<()> {
        if self.appointments.is_empty() {
            self.appointments = demo::appointments();
            self.save_appointments()?;
        }
        if self.doctors.is_empty() {
            self.doctors = demo::doctors();
            store::set_json(&mut *self.store, keys::DOCTORS, &self.doctors)?;
        }
        Ok(())
    }

    fn render_all(&mut self) {
        self.render_appointments();
        self.render_doctors();
        let directory = self.doctors.clone();
        self.view.populate_doctor_select(&directory);
    }

    // ------------------------------------------------------------------
    // Doctor Directory
    // ------------------------------------------------------------------

    /// Update the directory search term and re-render.
    pub fn set_doctor_search(&mut self, term: &str) {
        self.criteria.search = term.to_string();
        self.render_doctors();
    }

    /// Update the exact-match city filter and re-render.
    pub fn set_city_filter(&mut self, city: &str) {
        self.criteria.city = city.to_string();
        self.render_doctors();
    }

    /// Update the exact-match specialty filter and re-render.
    pub fn set_specialty_filter(&mut self, specialty: &str) {
        self.criteria.specialty = specialty.to_string();
        self.render_doctors();
    }

    /// Directory entries matching the current criteria, in directory
    /// order. Empty criteria match everything.
    pub fn filter_doctors(&self) -> Vec<Doctor> {
        let term = self.criteria.search.to_lowercase();
        self.doctors
            .iter()
            .filter(|doctor| {
                let matches_search = term.is_empty()
                    || doctor.name.to_lowercase().contains(&term)
                    || doctor.specialty.to_lowercase().contains(&term)
                    || doctor.hospital.to_lowercase().contains(&term);
                let matches_city =
                    self.criteria.city.is_empty() || doctor.city == self.criteria.city;
                let matches_specialty = self.criteria.specialty.is_empty()
                    || doctor.specialty == self.criteria.specialty;
                matches_search && matches_city && matches_specialty
            })
            .cloned()
            .collect()
    }

    fn render_doctors(&mut self) {
        let filtered = self.filter_doctors();
        self.view.render_doctors(&filtered);
    }

    // ------------------------------------------------------------------
    // Booking
    // ------------------------------------------------------------------

    /// Open the booking form with `doctor_id` pre-selected. Unknown ids
    /// are a silent no-op.
    pub fn book_appointment(&mut self, doctor_id: &str) {
        match self.doctors.iter().find(|d| d.id == doctor_id) {
            Some(doctor) => {
                let doctor = doctor.clone();
                self.view.open_booking_form(&doctor);
            }
            None => warn!(doctor_id, "booking for an unknown doctor"),
        }
    }

    /// Validate the booking form and append a pending appointment with a
    /// fresh timestamp-derived id.
    ///
    /// When the booked date and time land exactly on an available slot in
    /// the doctor's schedule, the slot is marked booked in the same
    /// operation; otherwise the schedule is left untouched and the
    /// appointment simply stays pending.
    pub fn handle_booking_submit(&mut self, form: &BookingForm) -> PortalResult<()> {
        let mut check = ValidationResult::new();
        check.require("doctorId", &form.doctor_id);
        check.require("date", &form.date);
        check.require("time", &form.time);
        let date = NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").ok();
        let time = parse_clock(&form.time);
        if !form.date.is_empty() && date.is_none() {
            check.add_error("date", "invalid date", ValidationCode::InvalidFormat);
        }
        if !form.time.is_empty() && time.is_none() {
            check.add_error("time", "invalid time", ValidationCode::InvalidFormat);
        }
        if !check.is_valid() {
            self.notify("Please fill in all required fields", Severity::Error);
            return Ok(());
        }
        let (Some(date), Some(time)) = (date, time) else {
            self.notify("Please fill in all required fields", Severity::Error);
            return Ok(());
        };
        let Some(doctor) = self.doctors.iter().find(|d| d.id == form.doctor_id).cloned() else {
            warn!(doctor_id = %form.doctor_id, "booking submit for an unknown doctor");
            self.notify("Selected doctor was not found", Severity::Error);
            return Ok(());
        };

        let appointment = PatientAppointment {
            id: self.allocate_appointment_id(),
            date,
            time,
            doctor: doctor.name.clone(),
            hospital: doctor.hospital.clone(),
            specialty: doctor.specialty.clone(),
            status: AppointmentStatus::Pending,
            reason: form.reason.clone(),
        };
        info!(id = %appointment.id, doctor = %doctor.name, "appointment booked");
        self.appointments.push(appointment);
        self.save_appointments()?;
        self.mark_schedule_slot(date, time)?;
        self.render_appointments();
        self.view.close_booking_form();
        self.notify("Appointment booked successfully!", Severity::Success);
        Ok(())
    }

    /// Write the booking through to the doctor's schedule when an
    /// available slot starts exactly at the booked time.
    fn mark_schedule_slot(&mut self, date: NaiveDate, time: chrono::NaiveTime) -> PortalResult<()> {
        let Some(mut schedule) =
            store::get_json::<Schedule>(&*self.store, keys::DOCTOR_SCHEDULE)?
        else {
            return Ok(());
        };
        let patient = self.user.display_name().to_string();
        let booked = schedule
            .slot_at_mut(date, time)
            .map(|slot| slot.book(&patient))
            .unwrap_or(false);
        if booked {
            store::set_json(&mut *self.store, keys::DOCTOR_SCHEDULE, &schedule)?;
        }
        Ok(())
    }

    fn allocate_appointment_id(&mut self) -> String {
        let id = self.next_appointment_id;
        self.next_appointment_id += 1;
        id.to_string()
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    /// Cancel an appointment after user confirmation. Unknown ids and
    /// declined confirmations change nothing.
    pub fn cancel_appointment(&mut self, id: &str) -> PortalResult<()> {
        let Some(appointment) = self.appointments.iter().find(|a| a.id == id).cloned() else {
            warn!(id, "cancel of an unknown appointment");
            return Ok(());
        };
        if !self.view.confirm_cancellation(&appointment) {
            return Ok(());
        }
        self.appointments.retain(|a| a.id != id);
        self.save_appointments()?;
        self.render_appointments();
        self.notify("Appointment cancelled", Severity::Success);
        Ok(())
    }

    /// Surface full appointment detail. Unknown ids are a silent no-op.
    pub fn view_appointment(&mut self, id: &str) {
        match self.appointments.iter().find(|a| a.id == id) {
            Some(appointment) => {
                let appointment = appointment.clone();
                self.view.show_appointment_detail(&appointment);
            }
            None => warn!(id, "view of an unknown appointment"),
        }
    }

    fn render_appointments(&mut self) {
        let appointments = self.appointments.clone();
        self.view.render_appointments(&appointments);
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Confirm, clear session state and schedule navigation home.
    /// A second call while navigation is pending changes nothing.
    pub fn logout(&mut self) {
        if !self.view.confirm_logout() {
            return;
        }
        if self.logout_pending.is_some() {
            return;
        }
        match self.gate.as_mut() {
            Some(gate) => gate.logout(),
            None => {
                for key in OWNED_KEYS {
                    self.store.remove(key);
                }
            }
        }
        info!("patient session cleared");
        self.notify("Logged out successfully!", Severity::Success);
        let deadline = self.now_ms + LOGOUT_NAVIGATE_DELAY_MS;
        self.logout_pending = Some(self.nav.schedule(deadline, Route::Home));
    }

    /// Advance the portal clock: due notifications dismiss, due
    /// navigation fires through the view.
    pub fn advance_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.notifications.advance_to(now_ms);
        for route in self.nav.advance_to(now_ms) {
            self.logout_pending = None;
            self.view.navigate(route);
        }
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifications.notify(self.now_ms, message, severity);
    }

    fn save_appointments(&mut self) -> PortalResult<()> {
        store::set_json(
            &mut *self.store,
            keys::PATIENT_APPOINTMENTS,
            &self.appointments,
        )
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn appointments(&self) -> &[PatientAppointment] {
        &self.appointments
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }
}
