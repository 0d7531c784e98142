use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use catcollector::entity::cat_toy;

use crate::common::TestApp;

mod catalog_crud {
    use super::*;

    #[tokio::test]
    async fn toy_lifecycle_create_update_delete() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;

        let toy_id = alice.create_toy("Mouse", "Grey").await;

        let detail = alice.get(&format!("/toys/{toy_id}/")).await;
        assert_eq!(detail.status, 200);
        assert_eq!(detail.body["name"], "Mouse");
        assert_eq!(detail.body["color"], "Grey");

        let res = alice
            .post_form(
                &format!("/toys/{toy_id}/update/"),
                &[("name", "Felt Mouse"), ("color", "Pink")],
            )
            .await;
        assert_eq!(res.status, 303);
        let updated = alice.get(&format!("/toys/{toy_id}/")).await;
        assert_eq!(updated.body["name"], "Felt Mouse");
        assert_eq!(updated.body["color"], "Pink");

        let res = alice.post(&format!("/toys/{toy_id}/delete/")).await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/toys/"));
        assert_eq!(alice.get(&format!("/toys/{toy_id}/")).await.status, 404);
    }

    #[tokio::test]
    async fn the_catalog_is_shared_between_users() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        alice.create_toy("Mouse", "Grey").await;

        let bob = app.session();
        bob.sign_up("bob").await;

        let list = bob.get("/toys/").await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_toy_form_rerenders_field_errors() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;

        let res = alice
            .post_form("/toys/create/", &[("name", ""), ("color", "")])
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["errors"]["name"].is_string());
        assert!(res.body["errors"]["color"].is_string());
    }

    #[tokio::test]
    async fn deleting_a_toy_detaches_it_from_cats() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;
        let toy_id = alice.create_toy("Mouse", "Grey").await;
        alice
            .post(&format!("/cats/{cat_id}/assoc_toy/{toy_id}/"))
            .await;

        alice.post(&format!("/toys/{toy_id}/delete/")).await;

        let links = cat_toy::Entity::find()
            .filter(cat_toy::Column::ToyId.eq(toy_id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(links, 0);
    }
}

mod association {
    use super::*;

    #[tokio::test]
    async fn associating_twice_leaves_exactly_one_link() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;
        let toy_id = alice.create_toy("Mouse", "Grey").await;

        for _ in 0..2 {
            let res = alice
                .post(&format!("/cats/{cat_id}/assoc_toy/{toy_id}/"))
                .await;
            assert_eq!(res.status, 303);
            assert_eq!(res.location.as_deref(), Some(&*format!("/cats/{cat_id}/")));
        }

        let links = cat_toy::Entity::find()
            .filter(cat_toy::Column::CatId.eq(cat_id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(links, 1);

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["toys"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn disassociating_an_absent_toy_is_a_noop() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;
        let toy_id = alice.create_toy("Mouse", "Grey").await;

        let res = alice
            .post(&format!("/cats/{cat_id}/unassoc_toy/{toy_id}/"))
            .await;

        assert_eq!(res.status, 303);
        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["toys"].as_array().unwrap().len(), 0);
        assert_eq!(detail.body["available_toys"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn associating_an_unknown_toy_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let res = alice.post(&format!("/cats/{cat_id}/assoc_toy/999/")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn owned_and_available_toys_partition_the_catalog() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let mouse = alice.create_toy("Mouse", "Grey").await;
        let ball = alice.create_toy("Ball", "Red").await;
        let wand = alice.create_toy("Wand", "Purple").await;
        alice
            .post(&format!("/cats/{cat_id}/assoc_toy/{mouse}/"))
            .await;

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        let ids = |key: &str| -> BTreeSet<i64> {
            detail.body[key]
                .as_array()
                .unwrap()
                .iter()
                .map(|toy| toy["id"].as_i64().unwrap())
                .collect()
        };

        let owned = ids("toys");
        let available = ids("available_toys");
        let all: BTreeSet<i64> = [mouse, ball, wand].iter().map(|&id| id as i64).collect();

        assert_eq!(owned.union(&available).copied().collect::<BTreeSet<_>>(), all);
        assert!(owned.is_disjoint(&available));
        assert_eq!(owned, BTreeSet::from([mouse as i64]));

        // The complement reflects current state: disassociate and re-read.
        alice
            .post(&format!("/cats/{cat_id}/unassoc_toy/{mouse}/"))
            .await;
        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["toys"].as_array().unwrap().len(), 0);
        assert_eq!(detail.body["available_toys"].as_array().unwrap().len(), 3);
    }
}
