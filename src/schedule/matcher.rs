use serde::Serialize;

use crate::error::{PlannerError, Result};
use super::availability::{Schedulable, Student, Teacher};
use super::grid::SlotGrid;
use super::ledger::BookingLedger;
use super::types::{Appointment, BookingKind, Slot, UnscheduledRequest};

/// Result of one matcher run
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// In commit order: each primary is immediately followed by its companion, if any.
    pub appointments: Vec<Appointment>,
    /// Primaries that never got a companion. They stay booked; there is no retry.
    pub unpaired: Vec<Appointment>,
    /// Requested subjects that received no appointment at all.
    pub unscheduled: Vec<UnscheduledRequest>,
    #[serde(skip)]
    pub ledger: BookingLedger,
}

/// Greedily pairs students with teachers in back-to-back lesson slots.
///
/// Students are handled in the given order, and each student's subjects in
/// listed order. For a subject that has no booking yet, the grid is scanned
/// from the first slot for a slot `t` whose successor `t + increment` exists
/// and where the student is free at both. The first teacher of that subject
/// (in `teachers` order) who is free at both, with classroom capacity left in
/// both, gets a primary appointment at `t`. The successor slot is then offered
/// to the student's other subjects, in listed order, as a companion booking.
///
/// Bookings are never retracted. A primary that finds no companion is kept and
/// reported in `MatchOutcome::unpaired`.
///
/// # Errors
/// `ZeroCapacity` when `max_classrooms` is 0 and `EmptyGrid` when the grid has
/// no slots. Unsatisfiable requests are not errors.
pub fn find_appointments(
    teachers: &[Teacher],
    students: &[Student],
    grid: &SlotGrid,
    max_classrooms: u32,
) -> Result<MatchOutcome> {
    if max_classrooms == 0 {
        return Err(PlannerError::ZeroCapacity);
    }
    if grid.is_empty() {
        return Err(PlannerError::EmptyGrid);
    }

    let mut ledger = BookingLedger::new();
    let mut appointments = Vec::new();
    let mut unpaired = Vec::new();

    for student in students {
        for subject in student.subjects() {
            for slot in grid.slots() {
                // Once a pair has a booking it is never revisited.
                if ledger.progress(&student.name, subject) >= 1 {
                    break;
                }

                let Some(next) = grid.successor(slot) else {
                    continue;
                };
                if !student.is_available(slot) || !student.is_available(&next) {
                    continue;
                }

                let Some(teacher) =
                    find_primary_teacher(teachers, student, subject, slot, &next, &ledger, max_classrooms)
                else {
                    continue;
                };

                let primary = Appointment {
                    teacher: teacher.name.clone(),
                    student: student.name.clone(),
                    slot: *slot,
                    subject: subject.clone(),
                    kind: BookingKind::Primary,
                };
                ledger.commit(&primary);
                tracing::debug!(
                    teacher = %primary.teacher,
                    student = %primary.student,
                    day = slot.day,
                    time = slot.time,
                    subject = %primary.subject,
                    "Committed primary booking"
                );
                appointments.push(primary);

                match book_companion(teachers, student, subject, &next, &ledger, max_classrooms) {
                    Some(companion) => {
                        ledger.commit(&companion);
                        tracing::debug!(
                            teacher = %companion.teacher,
                            student = %companion.student,
                            day = next.day,
                            time = next.time,
                            subject = %companion.subject,
                            "Committed companion booking"
                        );
                        appointments.push(companion);
                    }
                    None => {
                        if let Some(primary) = appointments.last() {
                            tracing::info!(
                                teacher = %primary.teacher,
                                student = %primary.student,
                                day = slot.day,
                                time = slot.time,
                                subject = %primary.subject,
                                "No companion lesson for primary booking"
                            );
                            unpaired.push(primary.clone());
                        }
                    }
                }
            }
        }
    }

    let unscheduled: Vec<UnscheduledRequest> = students
        .iter()
        .flat_map(|student| {
            student
                .subjects()
                .iter()
                .filter(|subject| ledger.progress(&student.name, subject) == 0)
                .map(|subject| UnscheduledRequest {
                    student: student.name.clone(),
                    subject: subject.clone(),
                })
        })
        .collect();

    for request in &unscheduled {
        tracing::info!(
            student = %request.student,
            subject = %request.subject,
            "Request left unscheduled"
        );
    }

    tracing::info!(
        appointments = appointments.len(),
        unpaired = unpaired.len(),
        unscheduled = unscheduled.len(),
        "Matching finished"
    );

    Ok(MatchOutcome {
        appointments,
        unpaired,
        unscheduled,
        ledger,
    })
}

/// First teacher of `subject` free at both `slot` and `next`, with room in both slots.
fn find_primary_teacher<'a>(
    teachers: &'a [Teacher],
    student: &Student,
    subject: &str,
    slot: &Slot,
    next: &Slot,
    ledger: &BookingLedger,
    max_classrooms: u32,
) -> Option<&'a Teacher> {
    teachers
        .iter()
        .filter(|t| t.teaches(subject) && t.is_available(slot) && t.is_available(next))
        .find(|t| {
            !ledger.is_booked(&t.name, slot)
                && !ledger.is_booked(&student.name, slot)
                && !ledger.is_booked(&t.name, next)
                && !ledger.is_booked(&student.name, next)
                && ledger.has_capacity(slot, max_classrooms)
                && ledger.has_capacity(next, max_classrooms)
        })
}

/// Offers `next` to the student's other subjects in listed order.
/// A subject is eligible until it has two sessions.
fn book_companion(
    teachers: &[Teacher],
    student: &Student,
    primary_subject: &str,
    next: &Slot,
    ledger: &BookingLedger,
    max_classrooms: u32,
) -> Option<Appointment> {
    for other in student.subjects() {
        if other == primary_subject || ledger.progress(&student.name, other) >= 2 {
            continue;
        }

        let teacher = teachers
            .iter()
            .filter(|t| t.teaches(other) && t.is_available(next))
            .find(|t| {
                !ledger.is_booked(&t.name, next)
                    && !ledger.is_booked(&student.name, next)
                    && ledger.has_capacity(next, max_classrooms)
            });

        if let Some(teacher) = teacher {
            return Some(Appointment {
                teacher: teacher.name.clone(),
                student: student.name.clone(),
                slot: *next,
                subject: other.clone(),
                kind: BookingKind::Companion,
            });
        }
    }
    None
}
