use axum::{
    Router,
    routing::{get, post},
};

use crate::config::StorageConfig;
use crate::handlers;
use crate::state::AppState;

/// The full HTTP surface. Only GET and POST exist anywhere; update and delete
/// are carried over POST the way an HTML form submits them.
pub fn app_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/about/", get(handlers::pages::about))
        .merge(cat_routes(storage))
        .merge(toy_routes())
        .merge(account_routes())
}

fn cat_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .route("/cats/", get(handlers::cat::cats_index))
        .route(
            "/cats/create/",
            get(handlers::cat::new_cat_form).post(handlers::cat::create_cat),
        )
        .route("/cats/{id}/", get(handlers::cat::cats_detail))
        .route(
            "/cats/{id}/update/",
            get(handlers::cat::edit_cat_form).post(handlers::cat::update_cat),
        )
        .route(
            "/cats/{id}/delete/",
            get(handlers::cat::delete_cat_form).post(handlers::cat::delete_cat),
        )
        .route(
            "/cats/{id}/add_feeding/",
            post(handlers::feeding::add_feeding),
        )
        .route(
            "/cats/{id}/add_photo/",
            post(handlers::photo::add_photo)
                .layer(handlers::photo::photo_body_limit(storage.max_object_size)),
        )
        .route(
            "/cats/{id}/assoc_toy/{toy_id}/",
            post(handlers::cat::assoc_toy),
        )
        .route(
            "/cats/{id}/unassoc_toy/{toy_id}/",
            post(handlers::cat::unassoc_toy),
        )
}

fn toy_routes() -> Router<AppState> {
    Router::new()
        .route("/toys/", get(handlers::toy::toys_index))
        .route(
            "/toys/create/",
            get(handlers::toy::new_toy_form).post(handlers::toy::create_toy),
        )
        .route("/toys/{id}/", get(handlers::toy::toys_detail))
        .route(
            "/toys/{id}/update/",
            get(handlers::toy::edit_toy_form).post(handlers::toy::update_toy),
        )
        .route(
            "/toys/{id}/delete/",
            get(handlers::toy::delete_toy_form).post(handlers::toy::delete_toy),
        )
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/signup/",
            get(handlers::accounts::signup_form).post(handlers::accounts::signup),
        )
        .route(
            "/accounts/login/",
            get(handlers::accounts::login_form).post(handlers::accounts::login),
        )
        .route("/accounts/logout/", post(handlers::accounts::logout))
}
