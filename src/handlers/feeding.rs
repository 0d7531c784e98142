use axum::{
    extract::{Path, State},
    response::Redirect,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::feeding;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::form::AppForm;
use crate::handlers::cat::{find_owned_cat, redirect_to_cat};
use crate::models::feeding::{FeedingForm, MEAL_KINDS, parse_feeding};
use crate::state::AppState;

/// Whether a cat already has at least as many feedings dated today as there
/// are meal kinds. Deliberately non-strict: three breakfasts count the same
/// as breakfast, lunch, and dinner.
pub async fn fed_for_today<C: ConnectionTrait>(db: &C, cat_id: i32) -> Result<bool, DbErr> {
    let today = chrono::Local::now().date_naive();
    let count = feeding::Entity::find()
        .filter(feeding::Column::CatId.eq(cat_id))
        .filter(feeding::Column::Date.eq(today))
        .count(db)
        .await?;
    Ok(count >= MEAL_KINDS)
}

/// Record a feeding for a cat. An unparsable date or unknown meal code is
/// dropped without creating a row and without surfacing an error; either way
/// the response is the redirect back to the cat's detail page.
#[instrument(skip(state, auth_user, form), fields(cat_id))]
pub async fn add_feeding(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(cat_id): Path<i32>,
    AppForm(form): AppForm<FeedingForm>,
) -> Result<Redirect, AppError> {
    let cat = find_owned_cat(&state.db, cat_id, auth_user.user_id).await?;

    match parse_feeding(&form) {
        Some((date, meal)) => {
            let new_feeding = feeding::ActiveModel {
                date: Set(date),
                meal: Set(meal.code().to_string()),
                cat_id: Set(cat.id),
                ..Default::default()
            };
            new_feeding.insert(&state.db).await?;
        }
        None => {
            tracing::debug!(
                date = form.date.as_deref().unwrap_or(""),
                meal = form.meal.as_deref().unwrap_or(""),
                "dropping invalid feeding submission"
            );
        }
    }

    Ok(redirect_to_cat(cat.id))
}
