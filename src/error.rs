use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Classroom capacity must be at least 1")]
    ZeroCapacity,

    #[error("Slot grid is empty")]
    EmptyGrid,

    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Student {student} lists subject {subject} more than once")]
    DuplicateSubject { student: String, subject: String },

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
