//! Daily nutrition goals captured during onboarding.

use crate::model::entry::{parse_whole_number, ValidationError};

/// Daily targets for calories and protein.
///
/// Missing persisted goals read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayGoals {
    pub calorie_goal: u32,
    pub protein_goal: u32,
}

impl DayGoals {
    pub fn new(calorie_goal: u32, protein_goal: u32) -> Self {
        Self {
            calorie_goal,
            protein_goal,
        }
    }

    /// Parses onboarding form text.
    ///
    /// # Errors
    /// - `ValidationError::InvalidNumber` when either field is not a whole number.
    pub fn parse(calorie_text: &str, protein_text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            calorie_goal: parse_whole_number("calorie goal", calorie_text)?,
            protein_goal: parse_whole_number("protein goal", protein_text)?,
        })
    }

    /// Calories left for today, floored at zero.
    pub fn remaining_calories(&self, consumed: u64) -> u64 {
        u64::from(self.calorie_goal).saturating_sub(consumed)
    }

    /// Protein grams left for today, floored at zero.
    pub fn remaining_protein(&self, consumed: u64) -> u64 {
        u64::from(self.protein_goal).saturating_sub(consumed)
    }
}
