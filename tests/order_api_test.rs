mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::{TestApp, spawn_app};

async fn place_order(app: &TestApp, user_id: &Value, lines: Value) -> (StatusCode, Value) {
    app.request(
        Method::POST,
        "/users/orders",
        None,
        Some(json!({ "user_id": user_id, "menu_items": lines })),
    )
    .await
}

#[tokio::test]
async fn jane_orders_two_teas() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;

    let (status, body) = place_order(
        &app,
        &jane["id"],
        json!([{ "menu_id": tea["id"], "quantity": 2 }]),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["total_price"], 16000);
    assert_eq!(body["order"]["user_id"], jane["id"]);
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["payment_status"], "unpaid");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], 16000);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["menu_id"], tea["id"]);
}

#[tokio::test]
async fn unavailable_item_is_rejected_without_side_effects() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;
    let juice = app.create_menu(&token, "Juice Alpukat", 15000, false).await;

    let (status, body) = place_order(
        &app,
        &jane["id"],
        json!([
            { "menu_id": tea["id"], "quantity": 1 },
            { "menu_id": juice["id"], "quantity": 1 }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Menu item Juice Alpukat is not available");

    let (_, orders) = app.request(Method::GET, "/admin/orders", Some(&token), None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn unknown_menu_item_creates_no_order() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;

    let (status, body) = place_order(
        &app,
        &jane["id"],
        json!([
            { "menu_id": tea["id"], "quantity": 1 },
            { "menu_id": 999, "quantity": 1 }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Menu item with ID 999 not found");

    let (_, orders) = app.request(Method::GET, "/admin/orders", Some(&token), None).await;
    assert_eq!(orders, json!([]));
    let uri = format!("/users/orders/{}", jane["id"]);
    let (_, own) = app.request(Method::GET, &uri, None, None).await;
    assert_eq!(own, json!([]));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = spawn_app().await;
    let token = app.login().await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;

    let (status, body) =
        place_order(&app, &json!(12), json!([{ "menu_id": tea["id"], "quantity": 1 }])).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    app.create_user("Jane", "jane@x.com", 2).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/users",
            None,
            Some(json!({ "name": "Jane Again", "email": "jane@x.com", "table_number": 5 })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn walk_in_registration_is_accepted() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/users",
            None,
            Some(json!({ "name": "Walk-in", "email": "walkin", "table_number": 0 })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["table_number"], 0);
    assert_eq!(body["email"], "walkin");
}

#[tokio::test]
async fn user_without_orders_gets_an_empty_list() {
    let app = spawn_app().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;

    let uri = format!("/users/orders/{}", jane["id"]);
    let (status, body) = app.request(Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn admin_view_includes_user_and_snapshot_prices() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;
    let (_, placed) = place_order(
        &app,
        &jane["id"],
        json!([{ "menu_id": tea["id"], "quantity": 2 }]),
    )
    .await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/admin/menu/id/{}", tea["id"]),
            Some(&token),
            Some(json!({
                "name": "Tea",
                "image": "",
                "type": "Beverage",
                "price": 10000,
                "available": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/admin/orders/{}", placed["order"]["id"]);
    let (status, view) = app.request(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["user"]["email"], "jane@x.com");
    assert_eq!(view["items"][0]["price"], 16000);
    assert_eq!(view["order"]["total_price"], 16000);

    let (status, all) = app.request(Method::GET, "/admin/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([view]));
}

#[tokio::test]
async fn missing_order_is_not_found() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, body) = app
        .request(Method::GET, "/admin/orders/9", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");

    let (status, _) = app
        .request(
            Method::PUT,
            "/admin/orders/9/status",
            Some(&token),
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_order_wins_over_malformed_body() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/admin/orders/999/status",
            Some(&token),
            Some(json!({ "state": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");

    let (status, _) = app
        .request(
            Method::PUT,
            "/admin/orders/999/payment",
            Some(&token),
            Some(json!({ "paid": true })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_on_existing_order_is_a_bad_request() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;
    let (_, placed) = place_order(
        &app,
        &jane["id"],
        json!([{ "menu_id": tea["id"], "quantity": 1 }]),
    )
    .await;

    let uri = format!("/admin/orders/{}/status", placed["order"]["id"]);
    let (status, body) = app
        .request(Method::PUT, &uri, Some(&token), Some(json!({ "state": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn status_and_payment_updates() {
    let app = spawn_app().await;
    let token = app.login().await;
    let jane = app.create_user("Jane", "jane@x.com", 2).await;
    let tea = app.create_menu(&token, "Tea", 8000, true).await;
    let (_, placed) = place_order(
        &app,
        &jane["id"],
        json!([{ "menu_id": tea["id"], "quantity": 1 }]),
    )
    .await;
    let order_uri = format!("/admin/orders/{}", placed["order"]["id"]);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("{}/status", order_uri),
            Some(&token),
            Some(json!({ "status": "shipped" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid status. Must be one of: pending, processing, completed, cancelled"
    );
    let (_, unchanged) = app.request(Method::GET, &order_uri, Some(&token), None).await;
    assert_eq!(unchanged["order"]["status"], "pending");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("{}/status", order_uri),
            Some(&token),
            Some(json!({ "status": "processing" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "processing");
    assert_eq!(body["user"]["name"], "Jane");
    assert_eq!(body["items"][0]["price"], 8000);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("{}/payment", order_uri),
            Some(&token),
            Some(json!({ "payment_status": "pending" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, unchanged) = app.request(Method::GET, &order_uri, Some(&token), None).await;
    assert_eq!(unchanged["order"]["payment_status"], "unpaid");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("{}/payment", order_uri),
            Some(&token),
            Some(json!({ "payment_status": "paid" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["payment_status"], "paid");
    assert_eq!(body["order"]["status"], "processing");
}

#[tokio::test]
async fn status_routes_require_a_token() {
    let app = spawn_app().await;
    let (status, _) = app
        .request(
            Method::PUT,
            "/admin/orders/1/status",
            None,
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
