pub mod record;
pub mod export;

pub use record::{validate_record, PersonRecord, Role, Roster};
pub use export::{append_record_to_csv, format_availability};
