use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use catcollector::entity::photo;

use crate::common::{BASE_URL, BUCKET, FailingStore, TestApp};

async fn photos_of(app: &TestApp, cat_id: i32) -> Vec<photo::Model> {
    photo::Entity::find()
        .filter(photo::Column::CatId.eq(cat_id))
        .all(&app.db)
        .await
        .unwrap()
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn a_successful_upload_stores_the_object_and_persists_its_url() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let res = alice
            .upload(
                &format!("/cats/{cat_id}/add_photo/"),
                "fluffy.jpg",
                b"jpeg-bytes".to_vec(),
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(&*format!("/cats/{cat_id}/")));

        let photos = photos_of(&app, cat_id).await;
        assert_eq!(photos.len(), 1);

        // URL is {base}/{bucket}/{key} with a 6-hex key keeping the extension.
        let prefix = format!("{BASE_URL}/{BUCKET}/");
        let key = photos[0].url.strip_prefix(&prefix).unwrap();
        assert!(key.ends_with(".jpg"), "key: {key}");
        assert_eq!(key.len(), "ffffff.jpg".len());
        assert!(key[..6].chars().all(|c| c.is_ascii_hexdigit()));

        // The binary actually landed in the store.
        let object = app.store_root.join(BUCKET).join(key);
        assert_eq!(std::fs::read(object).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn an_upload_past_the_object_size_cap_is_refused_without_buffering() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        // Past the configured max_object_size plus overhead: the body cap
        // cuts the read short instead of buffering the whole thing for the
        // store to reject.
        let res = alice
            .upload(
                &format!("/cats/{cat_id}/add_photo/"),
                "huge.jpg",
                vec![0u8; 1024 * 1024 + 128 * 1024],
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(photos_of(&app, cat_id).await.len(), 0);
    }

    #[tokio::test]
    async fn a_request_without_a_file_is_a_noop_redirect() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        // Multipart body with a text-only field, no filename anywhere.
        let form = reqwest::multipart::Form::new().text("note", "no photo here");
        let res = alice
            .post_multipart(&format!("/cats/{cat_id}/add_photo/"), form)
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(photos_of(&app, cat_id).await.len(), 0);
    }

    #[tokio::test]
    async fn uploading_to_a_foreign_cat_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let bob = app.session();
        bob.sign_up("bob").await;
        let res = bob
            .upload(
                &format!("/cats/{cat_id}/add_photo/"),
                "sneaky.jpg",
                b"x".to_vec(),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(photos_of(&app, cat_id).await.len(), 0);
    }

    #[tokio::test]
    async fn an_unauthenticated_upload_redirects_to_login() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let anon = app.session();
        let res = anon
            .upload(&format!("/cats/{cat_id}/add_photo/"), "x.jpg", b"x".to_vec())
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/accounts/login/"));
        assert_eq!(photos_of(&app, cat_id).await.len(), 0);
    }
}

mod failure_policy {
    use super::*;

    #[tokio::test]
    async fn a_failed_upload_is_swallowed_with_no_photo_row() {
        let app = TestApp::spawn_with_store(Arc::new(FailingStore)).await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let res = alice
            .upload(
                &format!("/cats/{cat_id}/add_photo/"),
                "fluffy.jpg",
                b"jpeg-bytes".to_vec(),
            )
            .await;

        // Fire-and-forget: the user still gets the normal redirect.
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(&*format!("/cats/{cat_id}/")));
        assert_eq!(photos_of(&app, cat_id).await.len(), 0);
    }
}
