//! Food entry domain model.
//!
//! # Responsibility
//! - Define the record created for every logged food item.
//! - Parse raw form input into validated entries.
//!
//! # Invariants
//! - `id` is generated once and never reused for another entry.
//! - `name` is never empty.
//! - Entries are immutable after creation; edits are remove + add.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one food entry.
pub type FoodEntryId = Uuid;

/// One calendar day's ordered entries.
pub type DailyLog = Vec<FoodEntry>;

/// Validation failures raised while building entries or goals from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Food name is empty.
    EmptyName,
    /// A numeric field did not parse as a non-negative integer.
    InvalidNumber { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "food name must not be empty"),
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} must be a whole number, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// One logged food item.
///
/// Serialized as `{id, name, calories, protein}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: FoodEntryId,
    pub name: String,
    /// Kilocalories.
    pub calories: u32,
    /// Grams of protein.
    pub protein: u32,
}

impl FoodEntry {
    /// Creates an entry with a generated id.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        calories: u32,
        protein: u32,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, calories, protein)
    }

    /// Creates an entry with a caller-provided id.
    pub fn with_id(
        id: FoodEntryId,
        name: impl Into<String>,
        calories: u32,
        protein: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            calories,
            protein,
        })
    }

    /// Builds an entry from raw form text.
    ///
    /// Numbers are trimmed before parsing; the name is taken as-is.
    ///
    /// # Errors
    /// - `EmptyName` for an empty name.
    /// - `InvalidNumber` when calories or protein are not whole numbers.
    pub fn parse(
        name: &str,
        calories_text: &str,
        protein_text: &str,
    ) -> Result<Self, ValidationError> {
        let calories = parse_whole_number("calories", calories_text)?;
        let protein = parse_whole_number("protein", protein_text)?;
        Self::new(name, calories, protein)
    }
}

/// Parses a non-negative integer form field.
pub(crate) fn parse_whole_number(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Sums calories over a log.
pub fn log_calories(log: &[FoodEntry]) -> u64 {
    log.iter().map(|entry| u64::from(entry.calories)).sum()
}

/// Sums protein grams over a log.
pub fn log_protein(log: &[FoodEntry]) -> u64 {
    log.iter().map(|entry| u64::from(entry.protein)).sum()
}
