//! Doctor portal controller.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{info, warn};

use medibook_shared::auth::{self, AuthGate, AuthOutcome, Role, Route};
use medibook_shared::error::{PortalError, PortalResult};
use medibook_shared::notify::{NotificationCenter, Severity};
use medibook_shared::schedule::{Schedule, TimeSlot};
use medibook_shared::store::{self, keys, KeyValueStore};
use medibook_shared::tasks::{TaskHandle, TaskQueue};
use medibook_shared::time::parse_clock;
use medibook_shared::validation::{ValidationCode, ValidationResult};

use crate::demo;
use crate::types::{
    validate_appointment, validate_patient, DashboardStats, DoctorAppointment, EarningsPeriod,
    Patient, PatientFilter,
};
use crate::view::DoctorView;

/// Delay between logout and navigation back home.
pub const LOGOUT_NAVIGATE_DELAY_MS: u64 = 1_000;

/// Store keys owned by the doctor portal, cleared on fallback logout.
const OWNED_KEYS: [&str; 4] = [
    keys::CURRENT_USER,
    keys::DOCTOR_SCHEDULE,
    keys::DOCTOR_PATIENTS,
    keys::DOCTOR_APPOINTMENTS,
];

/// Raw availability form fields, validated on submit.
#[derive(Clone, Debug, Default)]
pub struct AvailabilityForm {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
}

/// Produce ordered available slots at `duration_minutes` intervals from
/// `start` (inclusive) up to but excluding `end`. Empty when the range is
/// inverted or the duration is zero.
pub fn generate_time_slots(start: NaiveTime, end: NaiveTime, duration_minutes: u32) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    if duration_minutes == 0 {
        return slots;
    }
    let step = Duration::minutes(i64::from(duration_minutes));
    let mut cursor = start;
    while cursor < end {
        slots.push(TimeSlot::available(cursor));
        let (next, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        cursor = next;
    }
    slots
}

/// Doctor-facing portal controller.
///
/// Owns the schedule, roster and appointment list; every mutation is
/// persisted to the injected store and re-rendered through the view
/// binding.
pub struct DoctorPortal {
    store: Box<dyn KeyValueStore>,
    view: Box<dyn DoctorView>,
    gate: Option<Box<dyn AuthGate>>,
    notifications: NotificationCenter,
    nav: TaskQueue<Route>,
    logout_pending: Option<TaskHandle>,
    now_ms: u64,
    today: NaiveDate,
    viewed_date: NaiveDate,
    schedule: Schedule,
    patients: Vec<Patient>,
    appointments: Vec<DoctorAppointment>,
    search: String,
    filter: PatientFilter,
}

impl DoctorPortal {
    /// Gate entry, load state, seed demo data into empty keys and render.
    ///
    /// On a failed auth check the redirect is handed to the view and the
    /// portal is not constructed.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        mut view: Box<dyn DoctorView>,
        mut gate: Option<Box<dyn AuthGate>>,
        today: NaiveDate,
    ) -> PortalResult<Self> {
        let outcome = match gate.as_mut() {
            Some(g) => g.check_auth_and_redirect(Role::Doctor),
            None => auth::check_session(&*store, Role::Doctor),
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
                    "this page is for doctors only".to_string(),
                ));
            }
        };
        view.set_welcome_name(user.display_name());

        let mut portal = Self {
            schedule: store::get_json(&*store, keys::DOCTOR_SCHEDULE)?.unwrap_or_default(),
            patients: store::get_json(&*store, keys::DOCTOR_PATIENTS)?.unwrap_or_default(),
            appointments: store::get_json(&*store, keys::DOCTOR_APPOINTMENTS)?.unwrap_or_default(),
            store,
            view,
            gate,
            notifications: NotificationCenter::new(),
            nav: TaskQueue::new(),
            logout_pending: None,
            now_ms: 0,
            today,
            viewed_date: today,
            search: String::new(),
            filter: PatientFilter::All,
        };
        portal.seed_demo_data()?;
        portal.validate_loaded()?;
        portal.render_all();
        Ok(portal)
    }

    /// Reject stored collections carrying invalid records before any of
    /// them can be rendered or persisted back.
    fn validate_loaded(&self) -> PortalResult<()> {
        let mut check = ValidationResult::new();
        for patient in &self.patients {
            check.merge(validate_patient(patient));
        }
        for appointment in &self.appointments {
            check.merge(validate_appointment(appointment));
        }
        check.into_result()
    }

    fn seed_demo_data(&mut self) -> PortalResult<()> {
        if self.patients.is_empty() {
            self.patients = demo::patients();
            self.save_patients()?;
        }
        if self.appointments.is_empty() {
            self.appointments = demo::appointments();
            self.save_appointments()?;
        }
        if !self.schedule.has_day(self.today) {
            let start = parse_clock("09:00").expect("valid default start");
            let end = parse_clock("17:00").expect("valid default end");
            self.schedule
                .set_day(self.today, generate_time_slots(start, end, 30));
            self.save_schedule()?;
        }
        Ok(())
    }

    fn render_all(&mut self) {
        self.render_schedule(self.viewed_date);
        self.render_patients();
        self.view.render_payments(&demo::recent_payments());
        self.update_stats();
        self.update_earnings("month");
    }

    // ------------------------------------------------------------------
    // Schedule
    // ------------------------------------------------------------------

    /// Switch the schedule grid to another date.
    pub fn view_date(&mut self, date: NaiveDate) {
        self.viewed_date = date;
        self.render_schedule(date);
    }

    pub fn viewed_date(&self) -> NaiveDate {
        self.viewed_date
    }

    /// Flip a slot between available and unavailable. Booked slots,
    /// unknown dates and out-of-range indices are no-ops.
    pub fn toggle_slot_availability(&mut self, date: NaiveDate, index: usize) -> PortalResult<()> {
        let Some(slots) = self.schedule.day_mut(date) else {
            warn!(%date, "toggle on a date with no schedule");
            return Ok(());
        };
        let Some(slot) = slots.get_mut(index) else {
            warn!(%date, index, "toggle on an out-of-range slot");
            return Ok(());
        };
        if !slot.toggle() {
            warn!(%date, index, "toggle on a booked slot");
            return Ok(());
        }
        self.save_schedule()?;
        self.render_schedule(date);
        Ok(())
    }

    /// Validate the availability form and destructively regenerate that
    /// day's slots. Prior slots for the date, booked ones included, are
    /// replaced.
    pub fn handle_availability_submit(&mut self, form: &AvailabilityForm) -> PortalResult<()> {
        let mut check = ValidationResult::new();
        check.require("date", &form.date);
        check.require("startTime", &form.start_time);
        check.require("endTime", &form.end_time);
        if form.duration_minutes == 0 {
            check.add_error(
                "slotDuration",
                "duration must be positive",
                ValidationCode::OutOfRange,
            );
        }
        let date = NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").ok();
        let start = parse_clock(&form.start_time);
        let end = parse_clock(&form.end_time);
        if !form.date.is_empty() && date.is_none() {
            check.add_error("date", "invalid date", ValidationCode::InvalidFormat);
        }
        if !form.start_time.is_empty() && start.is_none() {
            check.add_error("startTime", "invalid time", ValidationCode::InvalidFormat);
        }
        if !form.end_time.is_empty() && end.is_none() {
            check.add_error("endTime", "invalid time", ValidationCode::InvalidFormat);
        }
        if !check.is_valid() {
            self.notify("Please fill in all required fields", Severity::Error);
            return Ok(());
        }
        let (Some(date), Some(start), Some(end)) = (date, start, end) else {
            self.notify("Please fill in all required fields", Severity::Error);
            return Ok(());
        };

        self.schedule
            .set_day(date, generate_time_slots(start, end, form.duration_minutes));
        self.save_schedule()?;
        if self.viewed_date == date {
            self.render_schedule(date);
        }
        self.notify("Availability updated successfully!", Severity::Success);
        Ok(())
    }

    fn render_schedule(&mut self, date: NaiveDate) {
        let slots: Vec<TimeSlot> = self.schedule.day(date).map(|s| s.to_vec()).unwrap_or_default();
        self.view.render_schedule(date, &slots);
    }

    // ------------------------------------------------------------------
    // Patient Roster
    // ------------------------------------------------------------------

    /// Update the roster search term and re-render.
    pub fn set_patient_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.render_patients();
    }

    /// Update the roster filter control and re-render.
    pub fn set_patient_filter(&mut self, value: &str) {
        self.filter = PatientFilter::parse(value);
        self.render_patients();
    }

    /// Roster entries matching the current search term and filter,
    /// in roster order.
    pub fn filter_patients(&self) -> Vec<Patient> {
        let term = self.search.to_lowercase();
        let month_ago = medibook_shared::time::one_month_before(self.today);
        self.patients
            .iter()
            .filter(|patient| {
                let matches_search = term.is_empty()
                    || patient.name.to_lowercase().contains(&term)
                    || patient.condition.to_lowercase().contains(&term);
                let matches_filter = match self.filter {
                    PatientFilter::All => true,
                    PatientFilter::Recent => patient.last_visit > month_ago,
                    PatientFilter::Upcoming => patient.next_appointment.is_some(),
                };
                matches_search && matches_filter
            })
            .cloned()
            .collect()
    }

    fn render_patients(&mut self) {
        let filtered = self.filter_patients();
        self.view.render_patients(&filtered);
    }

    /// Surface full patient detail. Unknown ids are a silent no-op.
    pub fn view_patient(&mut self, id: &str) {
        match self.patients.iter().find(|p| p.id == id) {
            Some(patient) => {
                let patient = patient.clone();
                self.view.show_patient_detail(&patient);
            }
            None => warn!(id, "view of an unknown patient"),
        }
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    /// Recompute aggregate counters from current state and render them.
    pub fn update_stats(&mut self) {
        let stats = DashboardStats {
            today_appointments: self
                .appointments
                .iter()
                .filter(|a| a.date == self.today)
                .count(),
            total_patients: self.patients.len(),
            monthly_earnings: demo::MONTHLY_EARNINGS.to_string(),
            rating: demo::RATING.to_string(),
        };
        self.view.render_stats(&stats);
    }

    /// Render the earnings figures for a period control value.
    /// Unrecognized input falls back to the monthly figures.
    pub fn update_earnings(&mut self, period: &str) {
        let summary = demo::earnings(EarningsPeriod::parse(period));
        self.view.render_earnings(&summary);
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
        info!("doctor session cleared");
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

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn save_schedule(&mut self) -> PortalResult<()> {
        store::set_json(&mut *self.store, keys::DOCTOR_SCHEDULE, &self.schedule)
    }

    fn save_patients(&mut self) -> PortalResult<()> {
        store::set_json(&mut *self.store, keys::DOCTOR_PATIENTS, &self.patients)
    }

    fn save_appointments(&mut self) -> PortalResult<()> {
        store::set_json(&mut *self.store, keys::DOCTOR_APPOINTMENTS, &self.appointments)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[DoctorAppointment] {
        &self.appointments
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medibook_shared::schedule::SlotStatus;

    #[test]
    fn nine_to_five_at_thirty_minutes_is_sixteen_slots() {
        let slots = generate_time_slots(
            parse_clock("09:00").unwrap(),
            parse_clock("17:00").unwrap(),
            30,
        );
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].time, parse_clock("09:00").unwrap());
        assert_eq!(slots[15].time, parse_clock("16:30").unwrap());
        assert!(slots
            .iter()
            .all(|s| s.status == SlotStatus::Available && s.patient.is_none()));
    }

    #[test]
    fn inverted_range_yields_no_slots() {
        let slots = generate_time_slots(
            parse_clock("17:00").unwrap(),
            parse_clock("09:00").unwrap(),
            30,
        );
        assert!(slots.is_empty());
        let slots = generate_time_slots(
            parse_clock("09:00").unwrap(),
            parse_clock("09:00").unwrap(),
            30,
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn zero_duration_yields_no_slots() {
        let slots = generate_time_slots(
            parse_clock("09:00").unwrap(),
            parse_clock("17:00").unwrap(),
            0,
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn slot_generation_stops_at_midnight_wrap() {
        let slots = generate_time_slots(
            parse_clock("23:00").unwrap(),
            parse_clock("23:59").unwrap(),
            90,
        );
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, parse_clock("23:00").unwrap());
    }
}
