use std::fs::OpenOptions;
use std::path::Path;

use csv::WriterBuilder;

use crate::display::format_day;
use crate::error::Result;
use crate::schedule::grid::minutes_to_time_string;
use crate::schedule::Slot;
use super::record::{PersonRecord, Role};

pub const ROSTER_HEADERS: [&str; 4] = ["role", "name", "services", "availability"];

/// Renders availability the way the roster loader reads it, e.g. `Mon 13:45;Mon 14:30`
pub fn format_availability(slots: &[Slot]) -> String {
    let mut sorted = slots.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(|slot| format!("{} {}", &format_day(slot.day)[..3], minutes_to_time_string(slot.minutes())))
        .collect::<Vec<_>>()
        .join(";")
}

/// Appends one record to a roster CSV compatible with the loader.
/// Writes the header first when the file does not exist yet.
pub fn append_record_to_csv(role: Role, record: &PersonRecord, csv_path: &Path) -> Result<()> {
    let file_exists = csv_path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if !file_exists {
        wtr.write_record(ROSTER_HEADERS)?;
    }

    let services = record.services.join(";");
    let availability = format_availability(&record.availability);
    wtr.write_record([role.as_str(), record.name.as_str(), services.as_str(), availability.as_str()])?;

    wtr.flush()?;
    Ok(())
}
