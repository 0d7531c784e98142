use serde::{Deserialize, Serialize};

use crate::entity::toy;
use crate::models::cat::FieldErrors;

pub const NAME_MAX: usize = 50;
pub const COLOR_MAX: usize = 20;

/// Toy create/update form; both fields stay editable.
#[derive(Deserialize)]
pub struct ToyForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

pub fn validate_toy_form(form: &ToyForm) -> Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", "This field is required".into());
    } else if name.chars().count() > NAME_MAX {
        errors.insert("name", format!("At most {NAME_MAX} characters"));
    }

    let color = form.color.trim();
    if color.is_empty() {
        errors.insert("color", "This field is required".into());
    } else if color.chars().count() > COLOR_MAX {
        errors.insert("color", format!("At most {COLOR_MAX} characters"));
    }

    if errors.is_empty() {
        Ok((name.to_string(), color.to_string()))
    } else {
        Err(errors)
    }
}

/// Toy as rendered in catalog and cat-detail documents.
#[derive(Serialize)]
pub struct ToyView {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl From<toy::Model> for ToyView {
    fn from(model: toy::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}
