use axum::Json;
use serde_json::{Value, json};

/// Landing page document.
pub async fn home() -> Json<Value> {
    Json(json!({
        "title": "Cat Collector",
        "links": ["/about/", "/cats/", "/toys/", "/accounts/signup/", "/accounts/login/"],
    }))
}

/// Static info page document.
pub async fn about() -> Json<Value> {
    Json(json!({
        "title": "About the CatCollector",
        "description": "Register cats, track feedings, collect toys, upload photos.",
    }))
}
