pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod roster;
pub mod schedule;
pub mod web;

pub use config::{GridConfig, PlannerConfig};
pub use error::{PlannerError, Result};
pub use schedule::{find_appointments, Appointment, MatchOutcome, Slot, SlotGrid, Student, Teacher};
