use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::*;
use serde_json::json;
use tracing::instrument;

use crate::entity::{cat_toy, toy};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::form::AppForm;
use crate::models::cat::FormErrorsView;
use crate::models::toy::{ToyForm, ToyView, validate_toy_form};
use crate::state::AppState;

async fn find_toy<C: ConnectionTrait>(db: &C, toy_id: i32) -> Result<toy::Model, AppError> {
    toy::Entity::find_by_id(toy_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Toy not found".into()))
}

/// The toy catalog is global: every authenticated user sees all toys.
#[instrument(skip(state, _auth_user))]
pub async fn toys_index(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ToyView>>, AppError> {
    let toys = toy::Entity::find()
        .order_by_asc(toy::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(toys.into_iter().map(ToyView::from).collect()))
}

#[instrument(skip(state, _auth_user), fields(toy_id = id))]
pub async fn toys_detail(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ToyView>, AppError> {
    let toy = find_toy(&state.db, id).await?;
    Ok(Json(toy.into()))
}

/// Blank toy form document.
pub async fn new_toy_form(_auth_user: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "fields": ["name", "color"] }))
}

#[instrument(skip(state, _auth_user, form))]
pub async fn create_toy(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppForm(form): AppForm<ToyForm>,
) -> Result<Response, AppError> {
    let (name, color) = match validate_toy_form(&form) {
        Ok(valid) => valid,
        Err(errors) => return Ok(Json(FormErrorsView { errors }).into_response()),
    };

    let new_toy = toy::ActiveModel {
        name: Set(name),
        color: Set(color),
        ..Default::default()
    };

    let model = new_toy.insert(&state.db).await?;

    Ok(Redirect::to(&format!("/toys/{}/", model.id)).into_response())
}

/// Current resource as the update form's initial data.
#[instrument(skip(state, _auth_user), fields(toy_id = id))]
pub async fn edit_toy_form(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ToyView>, AppError> {
    let toy = find_toy(&state.db, id).await?;
    Ok(Json(toy.into()))
}

#[instrument(skip(state, _auth_user, form), fields(toy_id = id))]
pub async fn update_toy(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppForm(form): AppForm<ToyForm>,
) -> Result<Response, AppError> {
    let toy = find_toy(&state.db, id).await?;

    let (name, color) = match validate_toy_form(&form) {
        Ok(valid) => valid,
        Err(errors) => return Ok(Json(FormErrorsView { errors }).into_response()),
    };

    let mut active: toy::ActiveModel = toy.into();
    active.name = Set(name);
    active.color = Set(color);
    let model = active.update(&state.db).await?;

    Ok(Redirect::to(&format!("/toys/{}/", model.id)).into_response())
}

/// Confirmation document for the delete form.
#[instrument(skip(state, _auth_user), fields(toy_id = id))]
pub async fn delete_toy_form(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let toy = find_toy(&state.db, id).await?;
    Ok(Json(
        json!({ "confirm": format!("Delete {}?", toy.name), "toy": ToyView::from(toy) }),
    ))
}

/// Delete a toy from the catalog, detaching it from every cat first.
#[instrument(skip(state, _auth_user), fields(toy_id = id))]
pub async fn delete_toy(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let txn = state.db.begin().await?;

    let toy = find_toy(&txn, id).await?;

    cat_toy::Entity::delete_many()
        .filter(cat_toy::Column::ToyId.eq(toy.id))
        .exec(&txn)
        .await?;

    let active: toy::ActiveModel = toy.into();
    active.delete(&txn).await?;

    txn.commit().await?;

    Ok(Redirect::to("/toys/"))
}
