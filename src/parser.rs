use std::io::Read;
use std::path::Path;

use csv::Reader;

use crate::display::day_from_name;
use crate::error::Result;
use crate::roster::{PersonRecord, Role, Roster};
use crate::schedule::grid::parse_slot_time;
use crate::schedule::Slot;

/// Parses one availability entry such as `Mon 13:45` or `tuesday 09:00`
fn parse_slot(entry: &str) -> Option<Slot> {
    let mut parts = entry.split_whitespace();
    let day = day_from_name(parts.next()?).ok()?;
    let time = parse_slot_time(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Slot::new(day, time))
}

/// Parses a `;`-separated availability list. Unreadable entries are skipped.
fn parse_availability(value: &str, name: &str) -> Vec<Slot> {
    let mut slots = Vec::new();
    for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        match parse_slot(entry) {
            Some(slot) => slots.push(slot),
            None => tracing::warn!(person = %name, entry = %entry, "Skipping unreadable availability entry"),
        }
    }
    slots
}

/// Splits a `;`-separated service list, dropping blanks
fn parse_services(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads a roster from a CSV file
///
/// Expected columns: `role`, `name`, `services`, `availability`. Column order
/// is taken from the header when present. A later row with the same role and
/// name replaces the earlier one.
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Roster> {
    let reader = Reader::from_path(csv_path)?;
    read_roster(reader)
}

/// Same as [`load_roster`], from any reader
pub fn load_roster_from_reader<R: Read>(input: R) -> Result<Roster> {
    read_roster(Reader::from_reader(input))
}

fn read_roster<R: Read>(mut reader: Reader<R>) -> Result<Roster> {
    let headers = reader.headers()?.clone();

    let column = |name: &str, fallback: usize| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .unwrap_or(fallback)
    };
    let role_col = column("role", 0);
    let name_col = column("name", 1);
    let services_col = column("services", 2);
    let availability_col = column("availability", 3);

    let mut roster = Roster::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let raw_role = record.get(role_col).unwrap_or("");
        let Some(role) = Role::parse(raw_role) else {
            tracing::warn!(row = line + 1, role = %raw_role, "Skipping row with unknown role");
            continue;
        };

        let name = record.get(name_col).unwrap_or("").trim().to_string();
        if name.is_empty() {
            tracing::warn!(row = line + 1, "Skipping row without a name");
            continue;
        }

        let services = parse_services(record.get(services_col).unwrap_or(""));
        let availability = parse_availability(record.get(availability_col).unwrap_or(""), &name);

        let person = PersonRecord {
            name,
            services,
            availability,
        };
        if let Err(e) = roster.upsert(role, person) {
            tracing::warn!(row = line + 1, error = %e, "Skipping invalid row");
        }
    }

    tracing::info!(
        staff = roster.staff.len(),
        clients = roster.clients.len(),
        "Loaded roster"
    );
    Ok(roster)
}
