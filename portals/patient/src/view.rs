//! View binding for the patient portal.

use std::cell::RefCell;
use std::rc::Rc;

use medibook_shared::auth::Route;

use crate::types::{Doctor, PatientAppointment};

/// Narrow rendering surface consumed by [`crate::PatientPortal`].
pub trait PatientView {
    fn set_welcome_name(&mut self, name: &str);
    fn render_appointments(&mut self, appointments: &[PatientAppointment]);
    fn render_doctors(&mut self, doctors: &[Doctor]);
    fn populate_doctor_select(&mut self, doctors: &[Doctor]);
    fn open_booking_form(&mut self, doctor: &Doctor);
    fn close_booking_form(&mut self);
    fn show_appointment_detail(&mut self, appointment: &PatientAppointment);
    /// Ask the user to confirm cancelling `appointment`.
    fn confirm_cancellation(&mut self, appointment: &PatientAppointment) -> bool;
    /// Ask the user to confirm logout.
    fn confirm_logout(&mut self) -> bool;
    fn navigate(&mut self, route: Route);
}

/// Test double that records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub welcome_name: Option<String>,
    pub rendered_appointments: Vec<Vec<PatientAppointment>>,
    pub rendered_doctors: Vec<Vec<Doctor>>,
    pub doctor_select: Vec<Vec<Doctor>>,
    pub opened_booking_forms: Vec<Doctor>,
    pub booking_form_closed: usize,
    pub appointment_details: Vec<PatientAppointment>,
    pub navigations: Vec<Route>,
    /// Answer returned from [`PatientView::confirm_cancellation`].
    pub confirm_cancel_answer: bool,
    /// Answer returned from [`PatientView::confirm_logout`].
    pub confirm_logout_answer: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            confirm_cancel_answer: true,
            confirm_logout_answer: true,
            ..Self::default()
        }
    }

    /// Most recent directory render, if any.
    pub fn last_doctors(&self) -> Option<&Vec<Doctor>> {
        self.rendered_doctors.last()
    }

    /// Most recent appointment table render, if any.
    pub fn last_appointments(&self) -> Option<&Vec<PatientAppointment>> {
        self.rendered_appointments.last()
    }
}

impl PatientView for RecordingView {
    fn set_welcome_name(&mut self, name: &str) {
        self.welcome_name = Some(name.to_string());
    }

    fn render_appointments(&mut self, appointments: &[PatientAppointment]) {
        self.rendered_appointments.push(appointments.to_vec());
    }

    fn render_doctors(&mut self, doctors: &[Doctor]) {
        self.rendered_doctors.push(doctors.to_vec());
    }

    fn populate_doctor_select(&mut self, doctors: &[Doctor]) {
        self.doctor_select.push(doctors.to_vec());
    }

    fn open_booking_form(&mut self, doctor: &Doctor) {
        self.opened_booking_forms.push(doctor.clone());
    }

    fn close_booking_form(&mut self) {
        self.booking_form_closed += 1;
    }

    fn show_appointment_detail(&mut self, appointment: &PatientAppointment) {
        self.appointment_details.push(appointment.clone());
    }

    fn confirm_cancellation(&mut self, _appointment: &PatientAppointment) -> bool {
        self.confirm_cancel_answer
    }

    fn confirm_logout(&mut self) -> bool {
        self.confirm_logout_answer
    }

    fn navigate(&mut self, route: Route) {
        self.navigations.push(route);
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

impl PatientView for SharedRecordingView {
    fn set_welcome_name(&mut self, name: &str) {
        self.0.borrow_mut().set_welcome_name(name);
    }

    fn render_appointments(&mut self, appointments: &[PatientAppointment]) {
        self.0.borrow_mut().render_appointments(appointments);
    }

    fn render_doctors(&mut self, doctors: &[Doctor]) {
        self.0.borrow_mut().render_doctors(doctors);
    }

    fn populate_doctor_select(&mut self, doctors: &[Doctor]) {
        self.0.borrow_mut().populate_doctor_select(doctors);
    }

    fn open_booking_form(&mut self, doctor: &Doctor) {
        self.0.borrow_mut().open_booking_form(doctor);
    }

    fn close_booking_form(&mut self) {
        self.0.borrow_mut().close_booking_form();
    }

    fn show_appointment_detail(&mut self, appointment: &PatientAppointment) {
        self.0.borrow_mut().show_appointment_detail(appointment);
    }

    fn confirm_cancellation(&mut self, appointment: &PatientAppointment) -> bool {
        self.0.borrow_mut().confirm_cancellation(appointment)
    }

    fn confirm_logout(&mut self) -> bool {
        self.0.borrow_mut().confirm_logout()
    }

    fn navigate(&mut self, route: Route) {
        self.0.borrow_mut().navigate(route);
    }
}
