use std::collections::HashSet;

use chrono::{NaiveTime, Timelike};

use crate::config::GridConfig;
use crate::error::{PlannerError, Result};
use super::types::Slot;

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// Parses a time string (HH:MM) to the `hour * 100 + minute` slot encoding
pub fn parse_slot_time(time_str: &str) -> Result<u16> {
    let minutes = parse_time_to_minutes(time_str)
        .ok_or_else(|| PlannerError::InvalidTime(time_str.trim().to_string()))?;
    Ok(((minutes / 60) * 100 + minutes % 60) as u16)
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn minutes_to_time_string(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// Start times of one day's slots, from `start` through `end` inclusive, every `increment` minutes.
pub fn calculate_time_slots(start_time: &str, end_time: &str, increment_minutes: u16) -> Result<Vec<u16>> {
    if increment_minutes == 0 {
        return Err(PlannerError::InvalidGrid("increment must be positive".to_string()));
    }
    let start = parse_time_to_minutes(start_time)
        .ok_or_else(|| PlannerError::InvalidTime(start_time.to_string()))?;
    let end = parse_time_to_minutes(end_time)
        .ok_or_else(|| PlannerError::InvalidTime(end_time.to_string()))?;
    if start > end {
        return Err(PlannerError::InvalidGrid(format!(
            "start {} is after end {}",
            start_time, end_time
        )));
    }

    let mut times = Vec::new();
    let mut current = start;
    while current <= end {
        times.push(((current / 60) * 100 + current % 60) as u16);
        current += u32::from(increment_minutes);
    }
    Ok(times)
}

/// The sorted universe of bookable slots for one week.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    slots: Vec<Slot>,
    members: HashSet<Slot>,
    increment_minutes: u16,
}

impl SlotGrid {
    /// Builds a grid from arbitrary slots. Duplicates are dropped and the
    /// result is sorted by day, then time.
    ///
    /// # Errors
    /// `InvalidGrid` for a zero increment or a day index above 6.
    pub fn new(slots: impl IntoIterator<Item = Slot>, increment_minutes: u16) -> Result<Self> {
        if increment_minutes == 0 {
            return Err(PlannerError::InvalidGrid("increment must be positive".to_string()));
        }
        let members: HashSet<Slot> = slots.into_iter().collect();
        if let Some(slot) = members.iter().find(|s| s.day > 6) {
            return Err(PlannerError::InvalidGrid(format!("day index {} out of range 0-6", slot.day)));
        }
        let mut slots: Vec<Slot> = members.iter().copied().collect();
        slots.sort();
        Ok(Self {
            slots,
            members,
            increment_minutes,
        })
    }

    /// Enumerates every configured day independently.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        if config.days.is_empty() {
            return Err(PlannerError::InvalidGrid("no days configured".to_string()));
        }

        let times = calculate_time_slots(&config.start, &config.end, config.increment_minutes)?;
        let slots = config
            .days
            .iter()
            .flat_map(|&day| times.iter().map(move |&time| Slot::new(day, time)));
        Self::new(slots, config.increment_minutes)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot: &Slot) -> bool {
        self.members.contains(slot)
    }

    /// The slot one increment later on the same day, if the grid has it.
    pub fn successor(&self, slot: &Slot) -> Option<Slot> {
        let next = Slot::from_minutes(slot.day, slot.minutes() + u32::from(self.increment_minutes))?;
        (next != *slot && self.contains(&next)).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time_to_minutes("13:45"), Some(825));
        assert_eq!(parse_time_to_minutes(" 09:05 "), Some(545));
        assert_eq!(parse_time_to_minutes("24:00"), None);
        assert_eq!(parse_time_to_minutes("1345"), None);
        assert_eq!(parse_slot_time("20:30").unwrap(), 2030);
        assert!(matches!(parse_slot_time("noon"), Err(PlannerError::InvalidTime(_))));
    }

    #[test]
    fn test_reference_grid_has_ten_slots_per_day() {
        let grid = SlotGrid::from_config(&GridConfig::default()).unwrap();
        assert_eq!(grid.len(), 70);
        let monday: Vec<u16> = grid.slots().iter().filter(|s| s.day == 0).map(|s| s.time).collect();
        assert_eq!(
            monday,
            vec![1345, 1430, 1515, 1600, 1645, 1730, 1815, 1900, 1945, 2030]
        );
        assert_eq!(grid.slots()[0], Slot::new(0, 1345));
        assert_eq!(grid.slots()[69], Slot::new(6, 2030));
    }

    #[test]
    fn test_grid_sorted_regardless_of_input_order() {
        let grid = SlotGrid::new(
            vec![Slot::new(1, 900), Slot::new(0, 1430), Slot::new(0, 945), Slot::new(0, 1430)],
            45,
        )
        .unwrap();
        assert_eq!(
            grid.slots(),
            &[Slot::new(0, 945), Slot::new(0, 1430), Slot::new(1, 900)]
        );
    }

    #[test]
    fn test_successor() {
        let grid = SlotGrid::from_config(&GridConfig::default()).unwrap();
        assert_eq!(grid.successor(&Slot::new(0, 1345)), Some(Slot::new(0, 1430)));
        assert_eq!(grid.successor(&Slot::new(2, 1515)), Some(Slot::new(2, 1600)));
        // Last slot of the day has no successor, and days never chain.
        assert_eq!(grid.successor(&Slot::new(0, 2030)), None);
        // Off-grid start.
        assert_eq!(grid.successor(&Slot::new(0, 1400)), None);
    }

    #[test]
    fn test_new_rejects_zero_increment() {
        let result = SlotGrid::new(vec![Slot::new(0, 2030)], 0);
        assert!(matches!(result, Err(PlannerError::InvalidGrid(_))));
    }

    #[test]
    fn test_new_rejects_day_out_of_range() {
        let result = SlotGrid::new(vec![Slot::new(0, 1345), Slot::new(7, 1345)], 45);
        assert!(matches!(result, Err(PlannerError::InvalidGrid(_))));
    }

    #[test]
    fn test_new_allows_empty_grid() {
        let grid = SlotGrid::new(Vec::new(), 45).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_successor_never_returns_same_slot() {
        let grid = SlotGrid::new(vec![Slot::new(0, 2030), Slot::new(0, 2115)], 45).unwrap();
        assert_eq!(grid.successor(&Slot::new(0, 2030)), Some(Slot::new(0, 2115)));
        assert_eq!(grid.successor(&Slot::new(0, 2115)), None);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = GridConfig::default();
        config.increment_minutes = 0;
        assert!(matches!(SlotGrid::from_config(&config), Err(PlannerError::InvalidGrid(_))));

        let mut config = GridConfig::default();
        config.start = "21:00".to_string();
        assert!(matches!(SlotGrid::from_config(&config), Err(PlannerError::InvalidGrid(_))));

        let mut config = GridConfig::default();
        config.days = vec![];
        assert!(matches!(SlotGrid::from_config(&config), Err(PlannerError::InvalidGrid(_))));

        let mut config = GridConfig::default();
        config.days = vec![0, 7];
        assert!(matches!(SlotGrid::from_config(&config), Err(PlannerError::InvalidGrid(_))));
    }
}
