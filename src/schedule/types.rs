use serde::{Deserialize, Serialize};

/// A (day, time) cell of the weekly grid.
///
/// `time` is encoded as `hour * 100 + minute`, so 13:45 is `1345`.
/// Field order matters: the derived `Ord` sorts by day, then by time,
/// both numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: u8,
    pub time: u16,
}

impl Slot {
    pub const fn new(day: u8, time: u16) -> Self {
        Self { day, time }
    }

    /// Minutes since midnight for this slot's start time.
    pub fn minutes(&self) -> u32 {
        u32::from(self.time / 100) * 60 + u32::from(self.time % 100)
    }

    /// Builds a slot from minutes since midnight. Returns None past the end of the day.
    pub fn from_minutes(day: u8, minutes: u32) -> Option<Self> {
        if minutes >= 24 * 60 {
            return None;
        }
        let time = (minutes / 60) * 100 + minutes % 60;
        Some(Self::new(day, time as u16))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    /// First booking for a (student, subject) pair.
    Primary,
    /// Booking for another subject in the slot right after a primary.
    Companion,
}

/// A committed lesson. Never changed once the matcher has produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub teacher: String,
    pub student: String,
    pub slot: Slot,
    pub subject: String,
    pub kind: BookingKind,
}

/// A subject a student asked for that received no appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledRequest {
    pub student: String,
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_round_trip_through_clock() {
        let slot = Slot::new(0, 1345);
        assert_eq!(slot.minutes(), 13 * 60 + 45);
        assert_eq!(Slot::from_minutes(0, slot.minutes() + 45), Some(Slot::new(0, 1430)));
        assert_eq!(Slot::from_minutes(3, 23 * 60 + 59), Some(Slot::new(3, 2359)));
        assert_eq!(Slot::from_minutes(3, 24 * 60), None);
    }

    #[test]
    fn test_ordering_is_numeric() {
        let mut slots = vec![
            Slot::new(1, 900),
            Slot::new(0, 2030),
            Slot::new(0, 945),
            Slot::new(10, 100),
            Slot::new(2, 1345),
        ];
        slots.sort();
        assert_eq!(
            slots,
            vec![
                Slot::new(0, 945),
                Slot::new(0, 2030),
                Slot::new(1, 900),
                Slot::new(2, 1345),
                Slot::new(10, 100),
            ]
        );
    }
}
