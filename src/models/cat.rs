use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::cat;
use crate::models::feeding::FeedingView;
use crate::models::toy::ToyView;

pub const NAME_MAX: usize = 100;
pub const BREED_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 250;

/// Field errors keyed by field name, re-rendered with the form on failure.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Cat create form. All four domain fields are accepted at creation time.
#[derive(Deserialize)]
pub struct CatForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: Option<String>,
}

/// Cat update form. Only description and age are editable post-creation;
/// any other submitted fields are ignored.
#[derive(Deserialize)]
pub struct CatUpdateForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: Option<String>,
}

/// Parse the age field: blank means the default of 0, anything else must be a
/// non-negative integer.
fn parse_age(age: Option<&str>, errors: &mut FieldErrors) -> i32 {
    let raw = age.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i32>() {
        Ok(n) if n >= 0 => n,
        Ok(_) => {
            errors.insert("age", "Age must not be negative".into());
            0
        }
        Err(_) => {
            errors.insert("age", "Age must be a whole number".into());
            0
        }
    }
}

fn check_bounded(
    field: &'static str,
    value: &str,
    max: usize,
    errors: &mut FieldErrors,
) {
    if value.trim().is_empty() {
        errors.insert(field, "This field is required".into());
    } else if value.chars().count() > max {
        errors.insert(field, format!("At most {max} characters"));
    }
}

pub fn validate_cat_form(form: &CatForm) -> Result<ValidCat, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_bounded("name", &form.name, NAME_MAX, &mut errors);
    check_bounded("breed", &form.breed, BREED_MAX, &mut errors);
    check_bounded("description", &form.description, DESCRIPTION_MAX, &mut errors);
    let age = parse_age(form.age.as_deref(), &mut errors);

    if errors.is_empty() {
        Ok(ValidCat {
            name: form.name.trim().to_string(),
            breed: form.breed.trim().to_string(),
            description: form.description.trim().to_string(),
            age,
        })
    } else {
        Err(errors)
    }
}

pub fn validate_cat_update(form: &CatUpdateForm) -> Result<(String, i32), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_bounded("description", &form.description, DESCRIPTION_MAX, &mut errors);
    let age = parse_age(form.age.as_deref(), &mut errors);

    if errors.is_empty() {
        Ok((form.description.trim().to_string(), age))
    } else {
        Err(errors)
    }
}

/// A fully validated create submission.
#[derive(Debug)]
pub struct ValidCat {
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

/// Cat as rendered in list and detail documents.
#[derive(Serialize)]
pub struct CatView {
    pub id: i32,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    pub user_id: i32,
}

impl From<cat::Model> for CatView {
    fn from(model: cat::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            breed: model.breed,
            description: model.description,
            age: model.age,
            user_id: model.user_id,
        }
    }
}

/// Detail document: the cat, its feedings (newest date first), the fed-today
/// signal, its toys, and the toys it does not have yet.
#[derive(Serialize)]
pub struct CatDetailView {
    pub cat: CatView,
    pub feedings: Vec<FeedingView>,
    pub fed_for_today: bool,
    pub toys: Vec<ToyView>,
    pub available_toys: Vec<ToyView>,
}

/// Re-rendered form document carrying field errors.
#[derive(Serialize)]
pub struct FormErrorsView {
    pub errors: FieldErrors,
}
