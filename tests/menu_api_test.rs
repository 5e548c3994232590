mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::spawn_app;

fn menu_body(name: &str, price: i64, available: bool) -> serde_json::Value {
    json!({
        "name": name,
        "image": "https://example.com/item.jpg",
        "type": "Main Course",
        "price": price,
        "available": available
    })
}

#[tokio::test]
async fn create_and_fetch_by_id() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, created) = app
        .request(
            Method::POST,
            "/admin/menu",
            Some(&token),
            Some(menu_body("Tea", 8000, true)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Tea");
    assert_eq!(created["type"], "Main Course");
    assert_eq!(created["price"], 8000);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app
        .request(Method::GET, &format!("/admin/menu/id/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = app.request(Method::GET, "/users/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = spawn_app().await;
    let token = app.login().await;

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = app
            .request(method, "/admin/menu/id/42", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Menu not found");
    }

    let (status, _) = app
        .request(
            Method::PUT,
            "/admin/menu/id/42",
            Some(&token),
            Some(menu_body("Tea", 8000, true)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, body) = app
        .request(Method::GET, "/admin/menu/id/tea", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn name_lookup_returns_only_the_first_match() {
    let app = spawn_app().await;
    let token = app.login().await;
    let first = app.create_menu(&token, "nasi goreng", 35000, true).await;
    app.create_menu(&token, "mie goreng", 30000, true).await;

    let (status, body) = app
        .request(Method::GET, "/admin/menu/name/goreng", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
    assert_eq!(body["id"], first["id"]);

    let (status, _) = app
        .request(Method::GET, "/admin/menu/name/soto", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_by_name() {
    let app = spawn_app().await;
    let token = app.login().await;
    let created = app.create_menu(&token, "Mie Goreng", 30000, true).await;

    let (status, updated) = app
        .request(
            Method::PUT,
            "/admin/menu/name/Mie%20Goreng",
            Some(&token),
            Some(menu_body("Mie Goreng Pedas", 32000, false)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Mie Goreng Pedas");
    assert_eq!(updated["price"], 32000);
    assert_eq!(updated["available"], false);

    let (status, _) = app
        .request(Method::DELETE, "/admin/menu/name/Mie%20Goreng", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request(
            Method::DELETE,
            "/admin/menu/name/Mie%20Goreng%20Pedas",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Menu deleted successfully");

    let (_, listed) = app.request(Method::GET, "/admin/menu", Some(&token), None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/admin/menu",
            Some(&token),
            Some(menu_body("Tea", -1, true)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price must not be negative");
}
