//! Patient portal integration tests against an in-memory store and a
//! recording view.

use chrono::NaiveDate;

use medibook_patient_portal::portal::LOGOUT_NAVIGATE_DELAY_MS;
use medibook_patient_portal::view::SharedRecordingView;
use medibook_patient_portal::{BookingForm, Doctor, PatientPortal};
use medibook_shared::auth::{Role, Route, SessionUser};
use medibook_shared::error::PortalError;
use medibook_shared::notify::Severity;
use medibook_shared::schedule::{Schedule, SlotStatus, TimeSlot};
use medibook_shared::store::{self, keys, MemoryStore};
use medibook_shared::time::parse_clock;
use medibook_shared::types::AppointmentStatus;

fn signed_in_store(role: Role) -> MemoryStore {
    let mut s = MemoryStore::new();
    let user = SessionUser {
        name: "Asha Verma".to_string(),
        email: "asha@example.com".to_string(),
        role,
    };
    store::set_json(&mut s, keys::CURRENT_USER, &user).unwrap();
    s
}

fn open_portal() -> (PatientPortal, SharedRecordingView) {
    open_portal_with(signed_in_store(Role::Patient))
}

fn open_portal_with(store: MemoryStore) -> (PatientPortal, SharedRecordingView) {
    let view = SharedRecordingView::new();
    let portal = PatientPortal::open(Box::new(store), Box::new(view.clone()), None).unwrap();
    (portal, view)
}

fn valid_booking() -> BookingForm {
    BookingForm {
        doctor_id: "3".to_string(),
        date: "2025-09-15".to_string(),
        time: "11:00".to_string(),
        reason: "Skin rash".to_string(),
    }
}

#[test]
fn opening_seeds_demo_data_and_renders() {
    let (portal, view) = open_portal();
    assert_eq!(portal.appointments().len(), 2);
    assert_eq!(portal.doctors().len(), 5);

    let recorded = view.0.borrow();
    assert_eq!(recorded.welcome_name.as_deref(), Some("Asha Verma"));
    assert_eq!(recorded.last_appointments().unwrap().len(), 2);
    assert_eq!(recorded.last_doctors().unwrap().len(), 5);
    assert_eq!(recorded.doctor_select.len(), 1);
    assert_eq!(recorded.doctor_select[0].len(), 5);
}

#[test]
fn wrong_role_is_redirected_home() {
    let view = SharedRecordingView::new();
    let result = PatientPortal::open(
        Box::new(signed_in_store(Role::Doctor)),
        Box::new(view.clone()),
        None,
    );
    assert!(result.is_err());
    assert_eq!(view.0.borrow().navigations, vec![Route::Home]);
}

#[test]
fn out_of_range_directory_record_blocks_opening() {
    let mut store = signed_in_store(Role::Patient);
    let doctor = Doctor {
        id: "1".to_string(),
        name: "Dr. Rajesh Sharma".to_string(),
        specialty: "Cardiology".to_string(),
        hospital: "Apollo Speciality".to_string(),
        city: "Delhi".to_string(),
        experience: 12,
        rating: 5.5,
        fee: 500,
    };
    store::set_json(&mut store, keys::DOCTORS, &vec![doctor]).unwrap();
    let result = PatientPortal::open(
        Box::new(store),
        Box::new(SharedRecordingView::new()),
        None,
    );
    assert!(matches!(result, Err(PortalError::Validation(_))));
}

#[test]
fn city_filter_matches_exactly() {
    let (mut portal, _view) = open_portal();
    portal.set_city_filter("Mumbai");
    let names: Vec<String> = portal.filter_doctors().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Dr. Priya Singh", "Dr. Sunita Nair"]);
}

#[test]
fn search_matches_name_specialty_and_hospital() {
    let (mut portal, _view) = open_portal();
    portal.set_doctor_search("cardio");
    let filtered = portal.filter_doctors();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Dr. Rajesh Sharma");

    portal.set_doctor_search("GENERAL hospital");
    let filtered = portal.filter_doctors();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Dr. Kavita Rao");
}

#[test]
fn combined_filters_intersect() {
    let (mut portal, _view) = open_portal();
    portal.set_city_filter("Mumbai");
    portal.set_specialty_filter("Dermatology");
    let filtered = portal.filter_doctors();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Dr. Sunita Nair");

    portal.set_specialty_filter("Cardiology");
    assert!(portal.filter_doctors().is_empty());
}

#[test]
fn empty_criteria_return_the_full_directory() {
    let (portal, _view) = open_portal();
    assert_eq!(portal.filter_doctors().len(), 5);
}

#[test]
fn book_appointment_preselects_the_doctor() {
    let (mut portal, view) = open_portal();
    portal.book_appointment("2");
    portal.book_appointment("unknown");
    let recorded = view.0.borrow();
    assert_eq!(recorded.opened_booking_forms.len(), 1);
    assert_eq!(recorded.opened_booking_forms[0].name, "Dr. Priya Singh");
}

#[test]
fn booking_submit_appends_one_pending_appointment() {
    let (mut portal, view) = open_portal();
    portal.handle_booking_submit(&valid_booking()).unwrap();

    assert_eq!(portal.appointments().len(), 3);
    let booked = portal.appointments().last().unwrap();
    assert_eq!(booked.status, AppointmentStatus::Pending);
    assert_eq!(booked.doctor, "Dr. Sunita Nair");
    assert_eq!(booked.hospital, "Green Valley Hospital");
    assert_eq!(booked.specialty, "Dermatology");
    assert_eq!(booked.reason, "Skin rash");
    assert!(!booked.id.is_empty());

    let recorded = view.0.borrow();
    assert_eq!(recorded.booking_form_closed, 1);
    assert_eq!(recorded.last_appointments().unwrap().len(), 3);
}

#[test]
fn booking_ids_are_unique() {
    let (mut portal, _view) = open_portal();
    portal.handle_booking_submit(&valid_booking()).unwrap();
    portal.handle_booking_submit(&valid_booking()).unwrap();
    let ids: Vec<&str> = portal.appointments().iter().map(|a| a.id.as_str()).collect();
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn booking_submit_with_blank_doctor_changes_nothing() {
    let (mut portal, view) = open_portal();
    let mut form = valid_booking();
    form.doctor_id = String::new();
    portal.handle_booking_submit(&form).unwrap();

    assert_eq!(portal.appointments().len(), 2);
    let notifications = portal.notifications().visible();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(view.0.borrow().booking_form_closed, 0);
}

#[test]
fn booking_submit_persists_to_the_store() {
    let (mut portal, _view) = open_portal();
    portal.handle_booking_submit(&valid_booking()).unwrap();
    let persisted: Vec<medibook_patient_portal::PatientAppointment> =
        store::get_json(portal.store(), keys::PATIENT_APPOINTMENTS)
            .unwrap()
            .unwrap();
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted, portal.appointments());
}

#[test]
fn booking_writes_through_to_a_matching_available_slot() {
    let mut store = signed_in_store(Role::Patient);
    let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
    let mut schedule = Schedule::new();
    schedule.set_day(
        date,
        vec![
            TimeSlot::available(parse_clock("10:30").unwrap()),
            TimeSlot::available(parse_clock("11:00").unwrap()),
        ],
    );
    store::set_json(&mut store, keys::DOCTOR_SCHEDULE, &schedule).unwrap();

    let (mut portal, _view) = open_portal_with(store);
    portal.handle_booking_submit(&valid_booking()).unwrap();

    let persisted: Schedule = store::get_json(portal.store(), keys::DOCTOR_SCHEDULE)
        .unwrap()
        .unwrap();
    let day = persisted.day(date).unwrap();
    assert_eq!(day[0].status, SlotStatus::Available);
    assert_eq!(day[1].status, SlotStatus::Booked);
    assert_eq!(day[1].patient.as_deref(), Some("Asha Verma"));
}

#[test]
fn booking_without_a_matching_slot_leaves_the_schedule_alone() {
    let mut store = signed_in_store(Role::Patient);
    let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
    let mut schedule = Schedule::new();
    let mut taken = TimeSlot::available(parse_clock("11:00").unwrap());
    taken.book("Someone Else");
    schedule.set_day(date, vec![taken]);
    store::set_json(&mut store, keys::DOCTOR_SCHEDULE, &schedule).unwrap();

    let (mut portal, _view) = open_portal_with(store);
    portal.handle_booking_submit(&valid_booking()).unwrap();

    let persisted: Schedule = store::get_json(portal.store(), keys::DOCTOR_SCHEDULE)
        .unwrap()
        .unwrap();
    assert_eq!(
        persisted.day(date).unwrap()[0].patient.as_deref(),
        Some("Someone Else")
    );
    // The appointment itself is still created.
    assert_eq!(portal.appointments().len(), 3);
}

#[test]
fn cancel_removes_exactly_the_matching_appointment() {
    let (mut portal, _view) = open_portal();
    portal.cancel_appointment("2").unwrap();
    assert_eq!(portal.appointments().len(), 1);
    assert_eq!(portal.appointments()[0].id, "1");

    portal.cancel_appointment("does-not-exist").unwrap();
    assert_eq!(portal.appointments().len(), 1);
}

#[test]
fn declined_cancellation_keeps_the_appointment() {
    let (mut portal, view) = open_portal();
    view.0.borrow_mut().confirm_cancel_answer = false;
    portal.cancel_appointment("2").unwrap();
    assert_eq!(portal.appointments().len(), 2);
    assert!(portal.notifications().visible().is_empty());
}

#[test]
fn view_appointment_surfaces_detail_and_ignores_unknown_ids() {
    let (mut portal, view) = open_portal();
    portal.view_appointment("1");
    portal.view_appointment("nope");
    let recorded = view.0.borrow();
    assert_eq!(recorded.appointment_details.len(), 1);
    assert_eq!(recorded.appointment_details[0].doctor, "Dr. Rajesh Sharma");
}

#[test]
fn logout_clears_owned_keys_but_not_the_directory() {
    let (mut portal, view) = open_portal();
    portal.logout();
    assert!(!portal.store().contains(keys::CURRENT_USER));
    assert!(!portal.store().contains(keys::PATIENT_APPOINTMENTS));
    assert!(portal.store().contains(keys::DOCTORS));

    portal.advance_time(LOGOUT_NAVIGATE_DELAY_MS);
    assert_eq!(view.0.borrow().navigations, vec![Route::Home]);
}
