use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::feeding;

/// The three meal kinds a feeding can record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

/// Number of distinct meal kinds; a cat counts as fed for the day once it has
/// this many feedings dated today, duplicates included.
pub const MEAL_KINDS: u64 = 3;

impl Meal {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(Meal::Breakfast),
            "L" => Some(Meal::Lunch),
            "D" => Some(Meal::Dinner),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Meal::Breakfast => "B",
            Meal::Lunch => "L",
            Meal::Dinner => "D",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
        }
    }
}

/// Feeding form as submitted. Both fields are free text; anything that does
/// not parse is silently dropped by the handler.
#[derive(Deserialize)]
pub struct FeedingForm {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub meal: Option<String>,
}

/// Parse a feeding submission. `None` means the submission is invalid and
/// must be ignored without surfacing an error.
pub fn parse_feeding(form: &FeedingForm) -> Option<(NaiveDate, Meal)> {
    let date = NaiveDate::parse_from_str(form.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    let meal = Meal::from_code(form.meal.as_deref()?.trim())?;
    Some((date, meal))
}

/// Feeding as rendered in the cat detail document.
#[derive(Serialize)]
pub struct FeedingView {
    pub id: i32,
    pub date: NaiveDate,
    pub meal: String,
    pub meal_label: String,
}

impl From<feeding::Model> for FeedingView {
    fn from(model: feeding::Model) -> Self {
        let meal_label = Meal::from_code(&model.meal)
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| model.meal.clone());
        Self {
            id: model.id,
            date: model.date,
            meal: model.meal,
            meal_label,
        }
    }
}
