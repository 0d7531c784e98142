use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::*;
use serde_json::json;
use tracing::instrument;

use crate::entity::{cat, cat_toy, feeding, photo, toy};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::form::AppForm;
use crate::handlers::feeding::fed_for_today;
use crate::models::cat::{
    CatDetailView, CatForm, CatUpdateForm, CatView, FormErrorsView, validate_cat_form,
    validate_cat_update,
};
use crate::models::feeding::FeedingView;
use crate::models::toy::ToyView;
use crate::state::AppState;

/// Look up a cat by id, scoped to the requesting user. A cat owned by someone
/// else is indistinguishable from a missing one.
pub async fn find_owned_cat<C: ConnectionTrait>(
    db: &C,
    cat_id: i32,
    user_id: i32,
) -> Result<cat::Model, AppError> {
    cat::Entity::find_by_id(cat_id)
        .filter(cat::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cat not found".into()))
}

pub fn redirect_to_cat(cat_id: i32) -> Redirect {
    Redirect::to(&format!("/cats/{cat_id}/"))
}

/// List the requesting user's cats. Never anyone else's, whatever ids they
/// know.
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn cats_index(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CatView>>, AppError> {
    let cats = cat::Entity::find()
        .filter(cat::Column::UserId.eq(auth_user.user_id))
        .order_by_asc(cat::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(cats.into_iter().map(CatView::from).collect()))
}

/// Cat detail: the cat, feedings newest-date-first, the fed-today signal, its
/// toys, and the toys it could still be given. The complement set is computed
/// at read time, never cached.
#[instrument(skip(state, auth_user), fields(cat_id = id))]
pub async fn cats_detail(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatDetailView>, AppError> {
    let cat = find_owned_cat(&state.db, id, auth_user.user_id).await?;

    let feedings = feeding::Entity::find()
        .filter(feeding::Column::CatId.eq(cat.id))
        .order_by_desc(feeding::Column::Date)
        .all(&state.db)
        .await?;

    let fed_for_today = fed_for_today(&state.db, cat.id).await?;

    let toy_ids: Vec<i32> = cat_toy::Entity::find()
        .filter(cat_toy::Column::CatId.eq(cat.id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|link| link.toy_id)
        .collect();

    let toys = toy::Entity::find()
        .filter(toy::Column::Id.is_in(toy_ids.clone()))
        .order_by_asc(toy::Column::Id)
        .all(&state.db)
        .await?;

    let available_toys = toy::Entity::find()
        .filter(toy::Column::Id.is_not_in(toy_ids))
        .order_by_asc(toy::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(CatDetailView {
        cat: cat.into(),
        feedings: feedings.into_iter().map(FeedingView::from).collect(),
        fed_for_today,
        toys: toys.into_iter().map(ToyView::from).collect(),
        available_toys: available_toys.into_iter().map(ToyView::from).collect(),
    }))
}

/// Blank cat form document.
pub async fn new_cat_form(_auth_user: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "fields": ["name", "breed", "description", "age"] }))
}

/// Create a cat owned by the session user.
#[instrument(skip(state, auth_user, form), fields(user_id = auth_user.user_id))]
pub async fn create_cat(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppForm(form): AppForm<CatForm>,
) -> Result<Response, AppError> {
    let valid = match validate_cat_form(&form) {
        Ok(valid) => valid,
        Err(errors) => return Ok(Json(FormErrorsView { errors }).into_response()),
    };

    let new_cat = cat::ActiveModel {
        name: Set(valid.name),
        breed: Set(valid.breed),
        description: Set(valid.description),
        age: Set(valid.age),
        user_id: Set(auth_user.user_id),
        ..Default::default()
    };

    let model = new_cat.insert(&state.db).await?;

    Ok(redirect_to_cat(model.id).into_response())
}

/// Current resource as the update form's initial data.
#[instrument(skip(state, auth_user), fields(cat_id = id))]
pub async fn edit_cat_form(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatView>, AppError> {
    let cat = find_owned_cat(&state.db, id, auth_user.user_id).await?;
    Ok(Json(cat.into()))
}

/// Update a cat. Only description and age are editable post-creation; name
/// and breed are fixed at creation time (preserved rule).
#[instrument(skip(state, auth_user, form), fields(cat_id = id))]
pub async fn update_cat(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppForm(form): AppForm<CatUpdateForm>,
) -> Result<Response, AppError> {
    let cat = find_owned_cat(&state.db, id, auth_user.user_id).await?;

    let (description, age) = match validate_cat_update(&form) {
        Ok(valid) => valid,
        Err(errors) => return Ok(Json(FormErrorsView { errors }).into_response()),
    };

    let mut active: cat::ActiveModel = cat.into();
    active.description = Set(description);
    active.age = Set(age);
    let model = active.update(&state.db).await?;

    Ok(redirect_to_cat(model.id).into_response())
}

/// Confirmation document for the delete form.
#[instrument(skip(state, auth_user), fields(cat_id = id))]
pub async fn delete_cat_form(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cat = find_owned_cat(&state.db, id, auth_user.user_id).await?;
    Ok(Json(
        json!({ "confirm": format!("Delete {}?", cat.name), "cat": CatView::from(cat) }),
    ))
}

/// Delete a cat and everything that hangs off it. The cascade is an explicit
/// ordered routine inside one transaction so no feeding, photo row, or toy
/// link can outlive its cat. Toys and the owning user stay. External photo
/// objects are not cleaned up (accepted gap).
#[instrument(skip(state, auth_user), fields(cat_id = id))]
pub async fn delete_cat(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let txn = state.db.begin().await?;

    let cat = find_owned_cat(&txn, id, auth_user.user_id).await?;

    feeding::Entity::delete_many()
        .filter(feeding::Column::CatId.eq(cat.id))
        .exec(&txn)
        .await?;
    photo::Entity::delete_many()
        .filter(photo::Column::CatId.eq(cat.id))
        .exec(&txn)
        .await?;
    cat_toy::Entity::delete_many()
        .filter(cat_toy::Column::CatId.eq(cat.id))
        .exec(&txn)
        .await?;

    let active: cat::ActiveModel = cat.into();
    active.delete(&txn).await?;

    txn.commit().await?;

    Ok(Redirect::to("/cats/"))
}

/// Give a toy to a cat. Adding a toy the cat already has is a no-op.
#[instrument(skip(state, auth_user), fields(cat_id, toy_id))]
pub async fn assoc_toy(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((cat_id, toy_id)): Path<(i32, i32)>,
) -> Result<Redirect, AppError> {
    let cat = find_owned_cat(&state.db, cat_id, auth_user.user_id).await?;

    toy::Entity::find_by_id(toy_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Toy not found".into()))?;

    let link = cat_toy::ActiveModel {
        cat_id: Set(cat.id),
        toy_id: Set(toy_id),
    };

    match link.insert(&state.db).await {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            // Already associated.
        }
        Err(e) => return Err(e.into()),
    }

    Ok(redirect_to_cat(cat.id))
}

/// Take a toy away from a cat. Removing a toy the cat does not have is a
/// no-op.
#[instrument(skip(state, auth_user), fields(cat_id, toy_id))]
pub async fn unassoc_toy(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((cat_id, toy_id)): Path<(i32, i32)>,
) -> Result<Redirect, AppError> {
    let cat = find_owned_cat(&state.db, cat_id, auth_user.user_id).await?;

    cat_toy::Entity::delete_many()
        .filter(cat_toy::Column::CatId.eq(cat.id))
        .filter(cat_toy::Column::ToyId.eq(toy_id))
        .exec(&state.db)
        .await?;

    Ok(redirect_to_cat(cat.id))
}
