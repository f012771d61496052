//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Health check
//!
//! # Recipes
//! GET    /api/recipes                 - List recipes with their cost
//! POST   /api/recipes                 - Create recipe
//! DELETE /api/recipes/{id}            - Delete recipe
//!
//! # Production orders
//! GET    /api/orders                  - List orders, newest first
//! POST   /api/orders                  - Create order from a recipe
//! GET    /api/orders/available        - Orders with units left to sell
//! GET    /api/orders/overview         - Fulfillment figures per order
//! PATCH  /api/orders/{id}             - Edit batch count / units per batch
//! DELETE /api/orders/{id}             - Delete order
//! GET    /api/orders/{id}/sales       - Sales of one order, newest first
//!
//! # Sales
//! GET    /api/sales                   - List sales, newest first
//! POST   /api/sales                   - Record sale
//! DELETE /api/sales/{id}              - Delete sale
//!
//! # Cash movements
//! GET    /api/cash-movements          - List movements, newest first
//! POST   /api/cash-movements          - Record movement
//! DELETE /api/cash-movements/{id}     - Delete movement
//!
//! # Ledger
//! GET    /api/balance                 - Overall balance
//! GET    /api/balance/series          - Per-period balance (?period=day|week|month|year)
//! GET    /api/bi/top-recipes          - Top recipes by revenue
//!
//! # Reports (HTML)
//! GET    /reports/orders/{id}         - Production order report
//! GET    /reports/orders/{id}/sales   - Sales history report
//! ```

pub mod balance;
pub mod cash;
pub mod orders;
pub mod recipes;
pub mod reports;
pub mod sales;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the full admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(recipes::router())
        .merge(orders::router())
        .merge(sales::router())
        .merge(cash::router())
        .merge(balance::router())
        .merge(reports::router())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
