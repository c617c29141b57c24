use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::schedule::{Slot, Student, Teacher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Teaches; becomes one `Teacher` per service.
    Staff,
    /// Learns; becomes one `Student`.
    Client,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "staff" | "teacher" => Some(Role::Staff),
            "client" | "student" => Some(Role::Client),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Client => "client",
        }
    }
}

/// A staff or client entry as supplied by data entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub services: Vec<String>,
    #[serde(default)]
    pub availability: Vec<Slot>,
}

impl PersonRecord {
    /// One teacher per service, all sharing this record's name so they can't overlap.
    pub fn to_teachers(&self) -> Vec<Teacher> {
        self.services
            .iter()
            .map(|service| Teacher::new(self.name.clone(), service.clone(), self.availability.iter().copied()))
            .collect()
    }

    pub fn to_student(&self) -> Result<Student> {
        Student::new(self.name.clone(), self.services.iter().cloned(), self.availability.iter().copied())
    }

    /// Trims the name and services and sorts availability.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.services = self.services.iter().map(|s| s.trim().to_string()).collect();
        self.availability.sort();
        self.availability.dedup();
        self
    }
}

/// Validates a record before it enters the roster
pub fn validate_record(record: &PersonRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(PlannerError::Validation("Name is required".to_string()));
    }

    if record.services.is_empty() {
        return Err(PlannerError::Validation(format!(
            "{} needs at least one service",
            record.name.trim()
        )));
    }

    let mut seen = HashSet::new();
    for service in &record.services {
        let service = service.trim();
        if service.is_empty() {
            return Err(PlannerError::Validation(format!(
                "{} has a blank service",
                record.name.trim()
            )));
        }
        if !seen.insert(service) {
            return Err(PlannerError::Validation(format!(
                "{} lists service {} more than once",
                record.name.trim(),
                service
            )));
        }
    }

    for slot in &record.availability {
        if slot.day > 6 || slot.time / 100 > 23 || slot.time % 100 > 59 {
            return Err(PlannerError::Validation(format!(
                "Invalid availability slot: day {} time {}",
                slot.day, slot.time
            )));
        }
    }

    Ok(())
}

/// Staff and clients in entry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub staff: Vec<PersonRecord>,
    pub clients: Vec<PersonRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a record. A record with an existing name replaces
    /// the old one in place.
    pub fn upsert(&mut self, role: Role, record: PersonRecord) -> Result<()> {
        validate_record(&record)?;
        let record = record.normalized();
        let list = match role {
            Role::Staff => &mut self.staff,
            Role::Client => &mut self.clients,
        };
        match list.iter_mut().find(|existing| existing.name == record.name) {
            Some(existing) => *existing = record,
            None => list.push(record),
        }
        Ok(())
    }

    pub fn teachers(&self) -> Vec<Teacher> {
        self.staff.iter().flat_map(PersonRecord::to_teachers).collect()
    }

    pub fn students(&self) -> Result<Vec<Student>> {
        self.clients.iter().map(PersonRecord::to_student).collect()
    }
}
