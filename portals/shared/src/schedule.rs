//! Doctor schedule and time-slot types.
//!
//! A slot is a fixed-duration interval of a doctor's day, tracked
//! independently of any appointment record. The slot state machine:
//! `Available ⇄ Unavailable` by toggle, `Available → Booked` on booking
//! write-through, and `Booked` is terminal with respect to toggling.
//!
//! The types live here rather than in the doctor crate because the patient
//! portal writes through to the schedule when a booking lands on an open
//! slot.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Status of a single time slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Unavailable,
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Booked => write!(f, "booked"),
            SlotStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A fixed-duration interval of a doctor's day.
///
/// Invariant: a booked slot carries the patient's name; any other status
/// carries `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "crate::time::clock")]
    pub time: NaiveTime,
    pub status: SlotStatus,
    pub patient: Option<String>,
}

impl TimeSlot {
    /// Fresh open slot at `time`.
    pub fn available(time: NaiveTime) -> Self {
        Self {
            time,
            status: SlotStatus::Available,
            patient: None,
        }
    }

    /// Transition an available slot to booked for `patient`. Returns
    /// false without mutating for any other starting status.
    pub fn book(&mut self, patient: &str) -> bool {
        if self.status != SlotStatus::Available {
            return false;
        }
        self.status = SlotStatus::Booked;
        self.patient = Some(patient.to_string());
        true
    }

    /// Flip between available and unavailable. Booked slots do not toggle.
    pub fn toggle(&mut self) -> bool {
        match self.status {
            SlotStatus::Available => {
                self.status = SlotStatus::Unavailable;
                true
            }
            SlotStatus::Unavailable => {
                self.status = SlotStatus::Available;
                true
            }
            SlotStatus::Booked => false,
        }
    }
}

/// Per-date ordered slot sequences, one entry per calendar date.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&[TimeSlot]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<TimeSlot>> {
        self.days.get_mut(&date)
    }

    /// Replace the whole slot sequence for `date`. Destructive: any prior
    /// slots for that date, booked ones included, are dropped.
    pub fn set_day(&mut self, date: NaiveDate, slots: Vec<TimeSlot>) {
        self.days.insert(date, slots);
    }

    pub fn has_day(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Find the slot at exactly `date` + `time`, if the date has a
    /// schedule and one of its slots starts then.
    pub fn slot_at_mut(&mut self, date: NaiveDate, time: NaiveTime) -> Option<&mut TimeSlot> {
        self.days
            .get_mut(&date)?
            .iter_mut()
            .find(|slot| slot.time == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_clock;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut slot = TimeSlot::available(parse_clock("09:00").unwrap());
        assert!(slot.toggle());
        assert_eq!(slot.status, SlotStatus::Unavailable);
        assert!(slot.toggle());
        assert_eq!(slot.status, SlotStatus::Available);
    }

    #[test]
    fn booked_slots_do_not_toggle() {
        let mut slot = TimeSlot::available(parse_clock("09:00").unwrap());
        assert!(slot.book("John Doe"));
        assert!(!slot.toggle());
        assert_eq!(slot.status, SlotStatus::Booked);
        assert_eq!(slot.patient.as_deref(), Some("John Doe"));
    }

    #[test]
    fn booking_requires_an_available_slot() {
        let mut slot = TimeSlot::available(parse_clock("09:00").unwrap());
        slot.toggle();
        assert!(!slot.book("John Doe"));
        assert!(slot.patient.is_none());
    }

    #[test]
    fn set_day_replaces_booked_slots() {
        let mut schedule = Schedule::new();
        let mut booked = TimeSlot::available(parse_clock("10:00").unwrap());
        booked.book("Jane Smith");
        schedule.set_day(date(), vec![booked]);
        schedule.set_day(date(), vec![TimeSlot::available(parse_clock("09:00").unwrap())]);
        let day = schedule.day(date()).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].status, SlotStatus::Available);
    }

    #[test]
    fn slot_serializes_with_lowercase_status_and_clock_time() {
        let slot = TimeSlot::available(parse_clock("09:30").unwrap());
        let json = serde_json::to_string(&slot).unwrap();
        assert!(json.contains("\"time\":\"09:30\""));
        assert!(json.contains("\"status\":\"available\""));
        assert!(json.contains("\"patient\":null"));
    }

    #[test]
    fn schedule_round_trips_through_json() {
        let mut schedule = Schedule::new();
        schedule.set_day(
            date(),
            vec![
                TimeSlot::available(parse_clock("09:00").unwrap()),
                TimeSlot::available(parse_clock("09:30").unwrap()),
            ],
        );
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
