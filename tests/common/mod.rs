#![allow(dead_code)]

use chronoplan::config::GridConfig;
use chronoplan::schedule::{Slot, SlotGrid, Student, Teacher};

pub fn reference_grid() -> SlotGrid {
    SlotGrid::from_config(&GridConfig::default()).unwrap()
}

pub fn slots(list: &[(u8, u16)]) -> Vec<Slot> {
    list.iter().map(|&(day, time)| Slot::new(day, time)).collect()
}

/// The four-teacher, four-student demo week.
pub fn sample_teachers() -> Vec<Teacher> {
    vec![
        Teacher::new("Teacher1", "Math", slots(&[(0, 1345), (0, 1515), (2, 1600), (4, 1730)])),
        Teacher::new("Teacher2", "English", slots(&[(1, 1515), (3, 1645), (4, 1730), (5, 1900)])),
        Teacher::new("Teacher3", "History", slots(&[(2, 1345), (2, 1600), (5, 1900), (6, 2030)])),
        Teacher::new("Teacher4", "Physics", slots(&[(2, 1345), (2, 1515), (4, 1730)])),
    ]
}

pub fn sample_students() -> Vec<Student> {
    vec![
        Student::new("Student1", ["Math", "English"], slots(&[(0, 1345), (0, 1515), (2, 1600), (4, 1730)])).unwrap(),
        Student::new("Student2", ["History", "Physics"], slots(&[(1, 1515), (3, 1645), (4, 1730), (5, 1900)])).unwrap(),
        Student::new("Student3", ["Math", "History"], slots(&[(2, 1345), (2, 1600), (5, 1900), (6, 2030)])).unwrap(),
        Student::new("Student4", ["English", "Physics"], slots(&[(2, 1345), (2, 1515), (4, 1730)])).unwrap(),
    ]
}
