use std::collections::{HashMap, HashSet};

use super::types::{Appointment, Slot};

/// Booking state for a single matcher run.
///
/// Created empty at the start of each run and handed back with the result.
/// Never reuse one across runs: every check depends on what that run committed.
#[derive(Debug, Clone, Default)]
pub struct BookingLedger {
    slot_usage: HashMap<Slot, u32>,
    person_usage: HashMap<String, HashSet<Slot>>,
    subject_progress: HashMap<String, HashMap<String, u32>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appointments already committed in `slot`, across all teachers and subjects.
    pub fn slot_usage(&self, slot: &Slot) -> u32 {
        self.slot_usage.get(slot).copied().unwrap_or(0)
    }

    pub fn has_capacity(&self, slot: &Slot, max_classrooms: u32) -> bool {
        self.slot_usage(slot) < max_classrooms
    }

    pub fn is_booked(&self, person: &str, slot: &Slot) -> bool {
        self.person_usage
            .get(person)
            .map(|slots| slots.contains(slot))
            .unwrap_or(false)
    }

    /// Sessions committed so far for a (student, subject) pair.
    pub fn progress(&self, student: &str, subject: &str) -> u32 {
        self.subject_progress
            .get(student)
            .and_then(|subjects| subjects.get(subject))
            .copied()
            .unwrap_or(0)
    }

    /// Records an appointment. Callers check capacity and double-booking first.
    pub fn commit(&mut self, appointment: &Appointment) {
        *self.slot_usage.entry(appointment.slot).or_insert(0) += 1;
        self.person_usage
            .entry(appointment.teacher.clone())
            .or_default()
            .insert(appointment.slot);
        self.person_usage
            .entry(appointment.student.clone())
            .or_default()
            .insert(appointment.slot);
        *self
            .subject_progress
            .entry(appointment.student.clone())
            .or_default()
            .entry(appointment.subject.clone())
            .or_insert(0) += 1;
    }

    /// Slots with at least one appointment, with their usage, sorted by slot.
    pub fn used_slots(&self) -> Vec<(Slot, u32)> {
        let mut used: Vec<(Slot, u32)> = self.slot_usage.iter().map(|(s, c)| (*s, *c)).collect();
        used.sort();
        used
    }
}
