pub mod types;
pub mod grid;
pub mod availability;
pub mod ledger;
pub mod matcher;

pub use types::{Appointment, BookingKind, Slot, UnscheduledRequest};
pub use grid::{calculate_time_slots, minutes_to_time_string, parse_slot_time, SlotGrid};
pub use availability::{Availability, Schedulable, Student, Teacher};
pub use ledger::BookingLedger;
pub use matcher::{find_appointments, MatchOutcome};
