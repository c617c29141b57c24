use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{PlannerError, Result};
use crate::schedule::grid::minutes_to_time_string;
use crate::schedule::{Appointment, BookingKind, MatchOutcome, Slot};

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Length of the window rendered by [`format_time`].
pub const LESSON_MINUTES: u32 = 45;

/// Name of a day index, 0 = Monday.
///
/// # Panics
/// If `day` is not in 0..=6. Only grid days should ever reach this.
pub fn format_day(day: u8) -> &'static str {
    DAY_NAMES[usize::from(day)]
}

/// Parses a full or three-letter English day name, ignoring case.
pub fn day_from_name(name: &str) -> Result<u8> {
    let lower = name.trim().to_lowercase();
    DAY_NAMES
        .iter()
        .position(|day| {
            let day = day.to_lowercase();
            lower == day || (lower.len() == 3 && day.starts_with(&lower))
        })
        .map(|idx| idx as u8)
        .ok_or_else(|| PlannerError::InvalidDay(name.trim().to_string()))
}

/// Formats an encoded start time as a lesson window, e.g. `1345` -> `"13:45 - 14:30"`.
pub fn format_time(time: u16) -> String {
    let start = Slot::new(0, time).minutes();
    format!(
        "{} - {}",
        minutes_to_time_string(start),
        minutes_to_time_string(start + LESSON_MINUTES)
    )
}

/// `"<Day>, <HH:MM - HH:MM>: <teacher> with <student> for <subject>"`
pub fn format_appointment(appointment: &Appointment) -> String {
    format!(
        "{}, {}: {} with {} for {}",
        format_day(appointment.slot.day),
        format_time(appointment.slot.time),
        appointment.teacher,
        appointment.student,
        appointment.subject
    )
}

/// Writes the timetable to a file, one appointment per line
pub fn write_timetable_to_file(title: &str, outcome: &MatchOutcome, filename: &Path) -> Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "** {} **", title)?;
    for appointment in &outcome.appointments {
        writeln!(file, "{}", format_appointment(appointment))?;
    }

    Ok(())
}

#[derive(Serialize)]
struct TimetableRow<'a> {
    day: &'static str,
    time: String,
    teacher: &'a str,
    student: &'a str,
    subject: &'a str,
    kind: BookingKind,
}

/// Writes the timetable as CSV with a header row
pub fn write_timetable_csv(outcome: &MatchOutcome, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for appointment in &outcome.appointments {
        wtr.serialize(TimetableRow {
            day: format_day(appointment.slot.day),
            time: format_time(appointment.slot.time),
            teacher: &appointment.teacher,
            student: &appointment.student,
            subject: &appointment.subject,
            kind: appointment.kind,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the timetable followed by what could not be fully booked
pub fn print_timetable(title: &str, outcome: &MatchOutcome) {
    println!("\n=== {} ===", title);
    println!("Total appointments scheduled: {}", outcome.appointments.len());

    for appointment in &outcome.appointments {
        println!("  {}", format_appointment(appointment));
    }

    let used = outcome.ledger.used_slots();
    if !used.is_empty() {
        println!("\nClassrooms in use:");
        for (slot, count) in used {
            println!("  {}, {}: {}", format_day(slot.day), format_time(slot.time), count);
        }
    }

    if !outcome.unpaired.is_empty() {
        println!("\nSingle sessions without a follow-up lesson ({}):", outcome.unpaired.len());
        for appointment in &outcome.unpaired {
            println!("  - {}", format_appointment(appointment));
        }
    }

    if !outcome.unscheduled.is_empty() {
        println!("\nUnscheduled requests ({}):", outcome.unscheduled.len());
        for request in &outcome.unscheduled {
            println!("  - {} needs {}", request.student, request.subject);
        }
    }
}
