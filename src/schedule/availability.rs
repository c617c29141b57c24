use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use super::types::Slot;

/// Membership-only set of slots a person can attend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(HashSet<Slot>);

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: Slot) -> bool {
        self.0.insert(slot)
    }

    pub fn remove(&mut self, slot: &Slot) -> bool {
        self.0.remove(slot)
    }

    pub fn is_available(&self, slot: &Slot) -> bool {
        self.0.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Slot> for Availability {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What the matcher needs from anyone it books: a unique name and the slots they can attend.
pub trait Schedulable {
    fn name(&self) -> &str;
    fn availability(&self) -> &Availability;

    fn is_available(&self, slot: &Slot) -> bool {
        self.availability().is_available(slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub subject: String,
    pub availability: Availability,
}

impl Teacher {
    pub fn new(name: impl Into<String>, subject: impl Into<String>, availability: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            availability: availability.into_iter().collect(),
        }
    }

    pub fn teaches(&self, subject: &str) -> bool {
        self.subject == subject
    }
}

impl Schedulable for Teacher {
    fn name(&self) -> &str {
        &self.name
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    /// Requested subjects in priority order. No duplicates.
    subjects: Vec<String>,
    pub availability: Availability,
}

impl Student {
    /// Fails if a subject is listed twice.
    pub fn new(
        name: impl Into<String>,
        subjects: impl IntoIterator<Item = impl Into<String>>,
        availability: impl IntoIterator<Item = Slot>,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut list = Vec::new();
        for subject in subjects {
            let subject = subject.into();
            if !seen.insert(subject.clone()) {
                return Err(PlannerError::DuplicateSubject { student: name, subject });
            }
            list.push(subject);
        }
        Ok(Self {
            name,
            subjects: list,
            availability: availability.into_iter().collect(),
        })
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }
}

impl Schedulable for Student {
    fn name(&self) -> &str {
        &self.name
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }
}
