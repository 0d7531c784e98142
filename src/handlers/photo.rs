use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::Redirect,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::photo;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::handlers::cat::{find_owned_cat, redirect_to_cat};
use crate::state::AppState;
use crate::utils::photo_key;

/// Room for multipart boundaries and headers on top of the object itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request body cap for the upload route, sized so anything the store would
/// accept fits but nothing much larger gets buffered.
pub fn photo_body_limit(max_object_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_object_size as usize + MULTIPART_OVERHEAD)
}

/// Upload a photo for a cat. No file part means a no-op redirect. A failed or
/// timed-out upload is logged and swallowed: no photo row, no retry, no
/// user-visible error; the redirect proceeds as if nothing happened.
#[instrument(skip(state, auth_user, multipart), fields(cat_id))]
pub async fn add_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(cat_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let cat = find_owned_cat(&state.db, cat_id, auth_user.user_id).await?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        // First field carrying a filename is the photo; the rest is ignored.
        if upload.is_none()
            && let Some(filename) = field.file_name()
        {
            let filename = filename.to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let Some((filename, bytes)) = upload else {
        return Ok(redirect_to_cat(cat.id));
    };

    let storage = &state.config.storage;
    let key = photo_key::storage_key(&filename);
    let put = state.store.put(&storage.bucket, &key, &bytes);

    match tokio::time::timeout(Duration::from_secs(storage.upload_timeout_secs), put).await {
        Ok(Ok(())) => {
            let url = format!(
                "{}/{}/{}",
                storage.base_url.trim_end_matches('/'),
                storage.bucket,
                key
            );
            let new_photo = photo::ActiveModel {
                url: Set(url),
                cat_id: Set(cat.id),
                ..Default::default()
            };
            new_photo.insert(&state.db).await?;
        }
        Ok(Err(e)) => {
            tracing::error!(cat_id = cat.id, key, "photo upload failed: {e}");
        }
        Err(_) => {
            tracing::error!(
                cat_id = cat.id,
                key,
                "photo upload timed out after {}s",
                storage.upload_timeout_secs
            );
        }
    }

    Ok(redirect_to_cat(cat.id))
}
