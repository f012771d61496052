//! HTTP API tests through the axum router.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use hielitos_integration_tests::{PNG_PHOTO, TestApp, decimal};

async fn create_recipe(app: &TestApp) -> String {
    let (status, body) = app
        .json(
            Method::POST,
            "/api/recipes",
            Some(json!({
                "name": "Mango",
                "photo": PNG_PHOTO,
                "ingredients": [
                    { "name": "flour", "quantity": "2", "unit": "kg", "unitPrice": 3 },
                    { "name": "", "quantity": 1, "unit": "kg", "unitPrice": 1 }
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_order(app: &TestApp, recipe_id: &str) -> Value {
    let (status, body) = app
        .json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "recipeId": recipe_id,
                "batchCount": "2",
                "unitsPerBatch": 10,
                "extraCost": 4
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_recipe_lifecycle() {
    let app = TestApp::new();
    let id = create_recipe(&app).await;

    let (status, body) = app.json(Method::GET, "/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["ingredients"].as_array().map(Vec::len), Some(1));
    assert_eq!(decimal(&recipes[0]["cost"]), Some(Decimal::from(6)));

    let (status, _) = app.send(Method::DELETE, &format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_validation_is_a_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/recipes",
            Some(json!({ "name": "Mango", "photo": PNG_PHOTO, "ingredients": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ingredient"));

    let (_, body) = app.json(Method::GET, "/api/recipes", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_order_and_sales_flow() {
    let app = TestApp::new();
    let recipe_id = create_recipe(&app).await;
    let order = create_order(&app, &recipe_id).await;
    let order_id = order["id"].as_str().unwrap();
    assert_eq!(decimal(&order["totalCost"]), Some(Decimal::from(16)));
    assert_eq!(decimal(&order["costPerBatch"]), Some(Decimal::from(8)));

    let (status, _) = app
        .json(
            Method::POST,
            "/api/sales",
            Some(json!({ "orderId": order_id, "unitsSold": 15, "unitsSpoiled": 5, "unitPrice": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, available) = app.json(Method::GET, "/api/orders/available", None).await;
    assert_eq!(available, json!([]));

    let (status, _) = app
        .send(
            Method::POST,
            "/api/sales",
            Some(json!({ "orderId": order_id, "unitsSold": 1, "unitPrice": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, overview) = app.json(Method::GET, "/api/orders/overview", None).await;
    let row = &overview[0];
    assert_eq!(row["fulfillment"]["status"], "closed");
    assert_eq!(row["fulfillment"]["unitsRemaining"], 0);
    assert_eq!(decimal(&row["fulfillment"]["profitability"]), Some(Decimal::from(14)));
    assert_eq!(row["sales"].as_array().map(Vec::len), Some(1));

    let (status, sales) = app
        .json(Method::GET, &format!("/api/orders/{order_id}/sales"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().map(Vec::len), Some(1));

    let (_, balance) = app.json(Method::GET, "/api/balance", None).await;
    assert_eq!(decimal(&balance["salesRevenue"]), Some(Decimal::from(30)));
    assert_eq!(decimal(&balance["orderCost"]), Some(Decimal::from(16)));
    assert_eq!(decimal(&balance["balance"]), Some(Decimal::from(14)));

    let (_, top) = app.json(Method::GET, "/api/bi/top-recipes", None).await;
    assert_eq!(top[0]["name"], "Mango");
    assert_eq!(decimal(&top[0]["revenue"]), Some(Decimal::from(30)));
}

#[tokio::test]
async fn test_update_batches() {
    let app = TestApp::new();
    let recipe_id = create_recipe(&app).await;
    let order = create_order(&app, &recipe_id).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, updated) = app
        .json(
            Method::PATCH,
            &format!("/api/orders/{order_id}"),
            Some(json!({ "batchCount": 3, "unitsPerBatch": 12 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["batchCount"], 3);
    assert_eq!(updated["unitsPerBatch"], 12);
    assert_eq!(decimal(&updated["totalCost"]), Some(Decimal::from(16)));

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/orders/{order_id}"),
            Some(json!({ "batchCount": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::PATCH, "/api/orders/missing", Some(json!({ "batchCount": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cash_movements_and_series() {
    let app = TestApp::new();
    for body in [
        json!({ "amount": 50, "kind": "investment", "user": "ana" }),
        json!({ "amount": "7.5", "user": "ana", "comment": "ice" }),
        json!({ "amount": 10, "kind": "withdrawal", "user": "luis" }),
    ] {
        let (status, _) = app.json(Method::POST, "/api/cash-movements", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = app
        .send(Method::POST, "/api/cash-movements", Some(json!({ "amount": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, movements) = app.json(Method::GET, "/api/cash-movements", None).await;
    assert_eq!(movements.as_array().map(Vec::len), Some(3));

    let (_, balance) = app.json(Method::GET, "/api/balance", None).await;
    assert_eq!(decimal(&balance["cashExpense"]), Some(Decimal::new(675, 1)));
    assert_eq!(decimal(&balance["withdrawals"]), Some(Decimal::from(10)));
    assert_eq!(decimal(&balance["investments"]), Some(Decimal::from(50)));
    // 0 - 0 - 67.5 - 10 + 50
    assert_eq!(decimal(&balance["balance"]), Some(Decimal::new(-275, 1)));

    let (status, series) = app.json(Method::GET, "/api/balance/series?period=year", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(series["granularity"], "year");
    let periods = series["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(decimal(&periods[0]["balance"]), Some(Decimal::new(325, 1)));

    let (status, _) = app.send(Method::GET, "/api/balance/series?period=decade", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reports_render_html() {
    let app = TestApp::new();
    let recipe_id = create_recipe(&app).await;
    let order = create_order(&app, &recipe_id).await;
    let order_id = order["id"].as_str().unwrap();
    app.json(
        Method::POST,
        "/api/sales",
        Some(json!({ "orderId": order_id, "unitsSold": 4, "unitPrice": 2, "comment": "market" })),
    )
    .await;

    let (status, html) = app.send(Method::GET, &format!("/reports/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("PRODUCTION ORDER"));
    assert!(html.contains("Mango"));
    assert!(html.contains("$16.00"));
    assert!(html.contains(PNG_PHOTO));

    let (status, html) = app
        .send(Method::GET, &format!("/reports/orders/{order_id}/sales"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("SALES REPORT"));
    assert!(html.contains("market"));

    let (status, _) = app.send(Method::GET, "/reports/orders/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
