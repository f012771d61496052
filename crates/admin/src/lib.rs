//! Hielitos admin library.
//!
//! Bookkeeping for a small frozen-treat business: recipes, production
//! orders, sales and cash movements, with the ledger views derived from
//! them (order fulfillment, period balances, top recipes) and printable
//! reports.
//!
//! The crate is a library so the binary, the CLI and the integration tests
//! share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// The admin router with state applied, without the tracing and Sentry
/// layers the binary adds.
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}
