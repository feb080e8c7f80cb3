//! View binding for the doctor portal.
//!
//! The controller never touches presentation APIs; the host implements
//! this trait and renders however it likes. [`RecordingView`] captures
//! calls for tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use medibook_shared::auth::Route;
use medibook_shared::schedule::TimeSlot;

use crate::types::{DashboardStats, EarningsSummary, Patient, PaymentRecord};

/// Narrow rendering surface consumed by [`crate::DoctorPortal`].
pub trait DoctorView {
    fn set_welcome_name(&mut self, name: &str);
    fn render_schedule(&mut self, date: NaiveDate, slots: &[TimeSlot]);
    fn render_patients(&mut self, patients: &[Patient]);
    fn render_payments(&mut self, payments: &[PaymentRecord]);
    fn render_stats(&mut self, stats: &DashboardStats);
    fn render_earnings(&mut self, summary: &EarningsSummary);
    fn show_patient_detail(&mut self, patient: &Patient);
    /// Ask the user to confirm logout.
    fn confirm_logout(&mut self) -> bool;
    fn navigate(&mut self, route: Route);
}

/// Test double that records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub welcome_name: Option<String>,
    pub rendered_schedules: Vec<(NaiveDate, Vec<TimeSlot>)>,
    pub rendered_patients: Vec<Vec<Patient>>,
    pub rendered_payments: Vec<Vec<PaymentRecord>>,
    pub rendered_stats: Vec<DashboardStats>,
    pub rendered_earnings: Vec<EarningsSummary>,
    pub patient_details: Vec<Patient>,
    pub navigations: Vec<Route>,
    /// Answer returned from [`DoctorView::confirm_logout`].
    pub confirm_answer: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            ..Self::default()
        }
    }

    /// Most recent schedule render, if any.
    pub fn last_schedule(&self) -> Option<&(NaiveDate, Vec<TimeSlot>)> {
        self.rendered_schedules.last()
    }

    /// Most recent roster render, if any.
    pub fn last_patients(&self) -> Option<&Vec<Patient>> {
        self.rendered_patients.last()
    }
}

/// Clonable handle over a [`RecordingView`], letting a test keep
/// inspecting the view after the portal takes ownership of its binding.
#[derive(Clone, Debug, Default)]
pub struct SharedRecordingView(pub Rc<RefCell<RecordingView>>);

impl SharedRecordingView {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(RecordingView::new())))
    }
}

impl DoctorView for SharedRecordingView {
    fn set_welcome_name(&mut self, name: &str) {
        self.0.borrow_mut().set_welcome_name(name);
    }

    fn render_schedule(&mut self, date: NaiveDate, slots: &[TimeSlot]) {
        self.0.borrow_mut().render_schedule(date, slots);
    }

    fn render_patients(&mut self, patients: &[Patient]) {
        self.0.borrow_mut().render_patients(patients);
    }

    fn render_payments(&mut self, payments: &[PaymentRecord]) {
        self.0.borrow_mut().render_payments(payments);
    }

    fn render_stats(&mut self, stats: &DashboardStats) {
        self.0.borrow_mut().render_stats(stats);
    }

    fn render_earnings(&mut self, summary: &EarningsSummary) {
        self.0.borrow_mut().render_earnings(summary);
    }

    fn show_patient_detail(&mut self, patient: &Patient) {
        self.0.borrow_mut().show_patient_detail(patient);
    }

    fn confirm_logout(&mut self) -> bool {
        self.0.borrow_mut().confirm_logout()
    }

    fn navigate(&mut self, route: Route) {
        self.0.borrow_mut().navigate(route);
    }
}

impl DoctorView for RecordingView {
    fn set_welcome_name(&mut self, name: &str) {
        self.welcome_name = Some(name.to_string());
    }

    fn render_schedule(&mut self, date: NaiveDate, slots: &[TimeSlot]) {
        self.rendered_schedules.push((date, slots.to_vec()));
    }

    fn render_patients(&mut self, patients: &[Patient]) {
        self.rendered_patients.push(patients.to_vec());
    }

    fn render_payments(&mut self, payments: &[PaymentRecord]) {
        self.rendered_payments.push(payments.to_vec());
    }

    fn render_stats(&mut self, stats: &DashboardStats) {
        self.rendered_stats.push(stats.clone());
    }

    fn render_earnings(&mut self, summary: &EarningsSummary) {
        self.rendered_earnings.push(summary.clone());
    }

    fn show_patient_detail(&mut self, patient: &Patient) {
        self.patient_details.push(patient.clone());
    }

    fn confirm_logout(&mut self) -> bool {
        self.confirm_answer
    }

    fn navigate(&mut self, route: Route) {
        self.navigations.push(route);
    }
}
