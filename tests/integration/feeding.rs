use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use catcollector::entity::feeding;

use crate::common::TestApp;

async fn feeding_count(app: &TestApp, cat_id: i32) -> u64 {
    feeding::Entity::find()
        .filter(feeding::Column::CatId.eq(cat_id))
        .count(&app.db)
        .await
        .unwrap()
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

mod recording {
    use super::*;

    #[tokio::test]
    async fn a_valid_submission_creates_a_feeding_and_redirects() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let res = alice
            .post_form(
                &format!("/cats/{cat_id}/add_feeding/"),
                &[("date", "2024-01-10"), ("meal", "L")],
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(&*format!("/cats/{cat_id}/")));
        assert_eq!(feeding_count(&app, cat_id).await, 1);

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        let feedings = detail.body["feedings"].as_array().unwrap();
        assert_eq!(feedings[0]["meal"], "L");
        assert_eq!(feedings[0]["meal_label"], "Lunch");
        assert_eq!(feedings[0]["date"], "2024-01-10");
    }

    #[tokio::test]
    async fn feedings_are_listed_newest_date_first() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        for date in ["2024-01-08", "2024-01-12", "2024-01-10"] {
            alice
                .post_form(
                    &format!("/cats/{cat_id}/add_feeding/"),
                    &[("date", date), ("meal", "B")],
                )
                .await;
        }

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        let dates: Vec<&str> = detail.body["feedings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, ["2024-01-12", "2024-01-10", "2024-01-08"]);
    }

    #[tokio::test]
    async fn an_unknown_meal_code_is_silently_dropped() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let res = alice
            .post_form(
                &format!("/cats/{cat_id}/add_feeding/"),
                &[("date", "2024-01-10"), ("meal", "Snack")],
            )
            .await;

        // No error surfaced, no row created.
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(&*format!("/cats/{cat_id}/")));
        assert_eq!(feeding_count(&app, cat_id).await, 0);
    }

    #[tokio::test]
    async fn an_unparsable_date_is_silently_dropped() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        for bad in ["2024-13-40", "Jan 10 2024", ""] {
            let res = alice
                .post_form(
                    &format!("/cats/{cat_id}/add_feeding/"),
                    &[("date", bad), ("meal", "B")],
                )
                .await;
            assert_eq!(res.status, 303, "date: {bad:?}");
        }
        assert_eq!(feeding_count(&app, cat_id).await, 0);
    }

    #[tokio::test]
    async fn feeding_a_foreign_cat_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        let bob = app.session();
        bob.sign_up("bob").await;
        let res = bob
            .post_form(
                &format!("/cats/{cat_id}/add_feeding/"),
                &[("date", "2024-01-10"), ("meal", "B")],
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(feeding_count(&app, cat_id).await, 0);
    }
}

mod fed_for_today {
    use super::*;

    #[tokio::test]
    async fn three_feedings_today_mark_the_cat_fed_even_with_duplicate_meals() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;
        let today = today();

        // Two breakfasts and a lunch; dinner never happens.
        for meal in ["B", "B", "L"] {
            alice
                .post_form(
                    &format!("/cats/{cat_id}/add_feeding/"),
                    &[("date", &today), ("meal", meal)],
                )
                .await;
        }

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["fed_for_today"], true);
    }

    #[tokio::test]
    async fn two_feedings_today_are_not_enough() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;
        let today = today();

        for meal in ["B", "L"] {
            alice
                .post_form(
                    &format!("/cats/{cat_id}/add_feeding/"),
                    &[("date", &today), ("meal", meal)],
                )
                .await;
        }

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["fed_for_today"], false);
    }

    #[tokio::test]
    async fn feedings_on_other_days_do_not_count() {
        let app = TestApp::spawn().await;
        let alice = app.session();
        alice.sign_up("alice").await;
        let cat_id = alice.create_cat("Maki").await;

        for meal in ["B", "L", "D"] {
            alice
                .post_form(
                    &format!("/cats/{cat_id}/add_feeding/"),
                    &[("date", "2020-05-05"), ("meal", meal)],
                )
                .await;
        }

        let detail = alice.get(&format!("/cats/{cat_id}/")).await;
        assert_eq!(detail.body["fed_for_today"], false);
    }
}
