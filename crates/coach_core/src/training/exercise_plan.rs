// Training session exercise order and attendance
use crate::error::{CompositionError, Result};
use crate::models::PlayerId;
use crate::reorder::move_item;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Intensity::Low),
            "medium" => Some(Intensity::Medium),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }
}

/// Exercises of one training session in running order, plus who attends.
///
/// An exercise id appears at most once. A player is never available and absent
/// at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExercisePlan {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    pub focus: String,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    exercises: Vec<String>,
    #[serde(default)]
    available_players: Vec<PlayerId>,
    #[serde(default)]
    absent_players: Vec<PlayerId>,
}

impl ExercisePlan {
    pub fn new(focus: impl Into<String>, intensity: Intensity) -> Self {
        Self { focus: focus.into(), intensity, ..Default::default() }
    }

    pub fn with_schedule(mut self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        self.date = Some(date);
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn exercises(&self) -> &[String] {
        &self.exercises
    }

    pub fn available_players(&self) -> &[PlayerId] {
        &self.available_players
    }

    pub fn absent_players(&self) -> &[PlayerId] {
        &self.absent_players
    }

    pub fn contains_exercise(&self, exercise_id: &str) -> bool {
        self.exercises.iter().any(|e| e == exercise_id)
    }

    /// Appends an exercise. Returns `false` if it is already in the plan.
    pub fn add_exercise(&mut self, exercise_id: impl Into<String>) -> bool {
        let exercise_id = exercise_id.into();
        if self.contains_exercise(&exercise_id) {
            return false;
        }
        self.exercises.push(exercise_id);
        true
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<String> {
        if index >= self.exercises.len() {
            return Err(CompositionError::out_of_range(index, self.exercises.len()));
        }
        Ok(self.exercises.remove(index))
    }

    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.exercises, from, to)
    }

    pub fn is_available(&self, player_id: &str) -> bool {
        self.available_players.iter().any(|p| p == player_id)
    }

    pub fn is_absent(&self, player_id: &str) -> bool {
        self.absent_players.iter().any(|p| p == player_id)
    }

    /// Toggles the player in the available list and returns the new membership.
    /// Marking a player available clears any absence.
    pub fn toggle_available(&mut self, player_id: &str) -> bool {
        if self.is_available(player_id) {
            self.available_players.retain(|p| p != player_id);
            false
        } else {
            self.absent_players.retain(|p| p != player_id);
            self.available_players.push(player_id.to_string());
            true
        }
    }

    /// Mirror of [`toggle_available`](Self::toggle_available) for the absent list.
    pub fn toggle_absent(&mut self, player_id: &str) -> bool {
        if self.is_absent(player_id) {
            self.absent_players.retain(|p| p != player_id);
            false
        } else {
            self.available_players.retain(|p| p != player_id);
            self.absent_players.push(player_id.to_string());
            true
        }
    }

    /// Checks a plan before it is saved, including plans built by deserialization.
    ///
    /// Date, start time, end time and focus are all required, and the session
    /// must end after it starts.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| -> Result<()> {
            Err(CompositionError::InvalidPlan(reason.to_string()))
        };

        if self.date.is_none() {
            return invalid("date is required");
        }
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return invalid(if self.start_time.is_none() {
                "start time is required"
            } else {
                "end time is required"
            });
        };
        if self.focus.trim().is_empty() {
            return invalid("focus is required");
        }
        if end <= start {
            return invalid("end time must be after start time");
        }

        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if !seen.insert(exercise.as_str()) {
                return Err(CompositionError::InvalidPlan(format!(
                    "exercise {} listed twice",
                    exercise
                )));
            }
        }

        let available: HashSet<&str> = self.available_players.iter().map(|p| p.as_str()).collect();
        if available.len() != self.available_players.len() {
            return Err(CompositionError::InvalidPlan("duplicate available player".to_string()));
        }
        if let Some(both) = self.absent_players.iter().find(|p| available.contains(p.as_str())) {
            return Err(CompositionError::DuplicatePlayer(both.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(focus: &str) -> ExercisePlan {
        ExercisePlan::new(focus, Intensity::Medium).with_schedule(
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )
    }

    fn rejection(plan: &ExercisePlan) -> String {
        match plan.validate() {
            Err(CompositionError::InvalidPlan(reason)) => reason,
            other => panic!("expected InvalidPlan, got {:?}", other),
        }
    }

    #[test]
    fn test_add_exercise_ignores_duplicates() {
        let mut plan = ExercisePlan::new("Pressing", Intensity::High);
        assert!(plan.add_exercise("ex1"));
        assert!(plan.add_exercise("ex2"));
        assert!(!plan.add_exercise("ex1"));
        assert_eq!(plan.exercises(), &["ex1".to_string(), "ex2".to_string()]);
    }

    #[test]
    fn test_move_and_remove_exercise() {
        let mut plan = ExercisePlan::new("Finishing", Intensity::Medium);
        for id in ["ex1", "ex2", "ex3"] {
            plan.add_exercise(id);
        }

        plan.move_exercise(0, 2).unwrap();
        assert_eq!(plan.exercises(), &["ex2", "ex3", "ex1"].map(String::from));

        assert_eq!(plan.remove_exercise(1).unwrap(), "ex3");
        assert!(plan.remove_exercise(5).is_err());
        assert!(plan.move_exercise(0, 2).is_err());
        assert_eq!(plan.exercises().len(), 2);
    }

    #[test]
    fn test_attendance_lists_are_exclusive() {
        let mut plan = ExercisePlan::new("Rondos", Intensity::Low);

        assert!(plan.toggle_available("p1"));
        assert!(plan.is_available("p1"));

        // Marking absent moves the player out of available
        assert!(plan.toggle_absent("p1"));
        assert!(plan.is_absent("p1"));
        assert!(!plan.is_available("p1"));

        // Toggle again clears
        assert!(!plan.toggle_absent("p1"));
        assert!(plan.absent_players().is_empty());
        assert!(plan.available_players().is_empty());
    }

    #[test]
    fn test_validate() {
        let mut plan = scheduled("  ");
        assert_eq!(rejection(&plan), "focus is required");

        plan.focus = "Transitions".to_string();
        plan.add_exercise("ex1");
        plan.toggle_available("p1");
        plan.toggle_absent("p2");
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_date_and_times() {
        let mut plan = scheduled("Pressing");
        plan.date = None;
        assert_eq!(rejection(&plan), "date is required");

        let mut plan = scheduled("Pressing");
        plan.start_time = None;
        assert_eq!(rejection(&plan), "start time is required");

        let mut plan = scheduled("Pressing");
        plan.end_time = None;
        assert_eq!(rejection(&plan), "end time is required");

        // Unscheduled plans fail on the first missing field
        assert_eq!(rejection(&ExercisePlan::new("Pressing", Intensity::High)), "date is required");
    }

    #[test]
    fn test_validate_rejects_end_not_after_start() {
        let mut plan = scheduled("Finishing");
        plan.end_time = plan.start_time;
        assert_eq!(rejection(&plan), "end time must be after start time");

        plan.end_time = NaiveTime::from_hms_opt(8, 30, 0);
        assert_eq!(rejection(&plan), "end time must be after start time");
    }

    #[test]
    fn test_schedule_from_json() {
        let plan: ExercisePlan = serde_json::from_str(
            r#"{"date": "2026-03-14", "start_time": "09:00:00", "end_time": "11:00:00",
                "focus": "Rondos", "intensity": "Low"}"#,
        )
        .unwrap();
        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(plan.intensity, Intensity::Low);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_deserialized_overlap() {
        let plan: ExercisePlan = serde_json::from_str(
            r#"{"date": "2026-03-14", "start_time": "09:00:00", "end_time": "11:00:00",
                "focus": "Set pieces", "available_players": ["p1"], "absent_players": ["p1"]}"#,
        )
        .unwrap();
        assert_eq!(plan.validate(), Err(CompositionError::DuplicatePlayer("p1".to_string())));
    }

    #[test]
    fn test_intensity_parse() {
        assert_eq!(Intensity::parse("High"), Some(Intensity::High));
        assert_eq!(Intensity::parse(" low "), Some(Intensity::Low));
        assert_eq!(Intensity::parse("extreme"), None);
    }
}
