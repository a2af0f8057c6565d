//! Application setup and server configuration.

use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    /// Default age threshold for the listing purge endpoint.
    pub listing_purge_age_days: i64,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let app_state = AppState {
        db_pool: pool,
        listing_purge_age_days: config.listing_purge_age_days,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_handler))
        // Customers
        .route("/customers", post(routes::customers::create_customer))
        .route("/customers/:id", get(routes::customers::get_customer))
        .route(
            "/customers/:id/verify",
            post(routes::customers::verify_customer),
        )
        // Listing moderation lifecycle
        .route(
            "/listings",
            post(routes::listings::submit_listing).get(routes::listings::list_listings),
        )
        .route(
            "/listings/:id",
            get(routes::listings::get_listing).delete(routes::listings::delete_listing),
        )
        .route("/listings/:id/approve", post(routes::listings::approve_listing))
        .route("/listings/:id/reject", post(routes::listings::reject_listing))
        .route("/listings/:id/harmful", post(routes::listings::mark_harmful))
        .route("/listings/:id/repost", post(routes::listings::repost_listing))
        .route("/listings/bulk/approve", post(routes::listings::bulk_approve))
        .route("/listings/bulk/reject", post(routes::listings::bulk_reject))
        .route("/listings/bulk/harmful", post(routes::listings::bulk_mark_harmful))
        .route("/listings/bulk/repost", post(routes::listings::bulk_repost))
        .route("/listings/bulk/delete", post(routes::listings::bulk_delete))
        .route("/listings/purge", post(routes::listings::purge_listings))
        // Paid placements
        .route("/placements", post(routes::placements::purchase_placement))
        .route("/placements/:id", get(routes::placements::get_placement))
        .route(
            "/placements/:id/active",
            get(routes::placements::placement_activity),
        )
        .route("/placements/:id/pay", post(routes::placements::confirm_payment))
        .route(
            "/placements/:id/cancel",
            post(routes::placements::cancel_placement),
        )
        .route(
            "/placements/:id/expire",
            post(routes::placements::expire_placement),
        )
        .route("/placements/sweep", post(routes::placements::sweep_placements))
        // Revenue ledger
        .route("/revenue", post(routes::revenue::record_entry))
        .route("/revenue/report", get(routes::revenue::revenue_report))
        .route("/revenue/:id", get(routes::revenue::get_entry))
        .route("/revenue/:id/confirm", post(routes::revenue::confirm_entry))
        .route("/revenue/:id/refund", post(routes::revenue::refund_entry))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
}
