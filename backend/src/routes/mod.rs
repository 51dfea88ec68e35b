//! Route definitions for the SGE Retail Management Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        // Session routes (protected)
        .merge(session_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - store management
        .nest("/stores", store_routes())
        // Protected routes - sell orders
        .nest("/sorders", sell_order_routes())
        // Protected routes - purchase orders
        .nest("/porders", purchase_order_routes())
        // Protected routes - empty-crate ledger
        .nest("/emptycrates", empty_crate_routes())
        // Protected routes - sub-agent management
        .nest("/subagents", sub_agent_routes())
        // Protected routes - vehicle management
        .nest("/vehicles", vehicle_routes())
        // Protected routes - user management
        .nest("/users", user_routes())
        // Protected routes - reporting
        .nest("/reports", report_routes())
}

/// Current-user and logout routes (protected)
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/current-user", get(handlers::current_user))
        .route("/logout", post(handlers::logout))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Store management routes (protected)
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stores).post(handlers::create_store))
        .route(
            "/:store_id",
            get(handlers::get_store)
                .put(handlers::update_store)
                .delete(handlers::delete_store),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sell order routes (protected)
fn sell_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sell_orders).post(handlers::create_sell_order))
        .route("/:order_id", get(handlers::get_sell_order))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase order routes (protected)
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route(
            "/:order_id",
            get(handlers::get_purchase_order).put(handlers::update_purchase_order),
        )
        .route("/:order_id/accept", put(handlers::accept_purchase_order))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Empty-crate ledger routes (protected)
fn empty_crate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_empty_crates))
        .route("/:store_id", get(handlers::get_empty_crates))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sub-agent management routes (protected)
fn sub_agent_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sub_agents).post(handlers::create_sub_agent),
        )
        .route(
            "/:sub_agent_id",
            get(handlers::get_sub_agent)
                .put(handlers::update_sub_agent)
                .delete(handlers::delete_sub_agent),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Vehicle management routes (protected)
fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_vehicles).post(handlers::create_vehicle))
        .route(
            "/:vehicle_id",
            get(handlers::get_vehicle)
                .put(handlers::update_vehicle)
                .delete(handlers::delete_vehicle),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// User management routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users))
        .route("/register", post(handlers::register_user))
        .route(
            "/:user_id",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard_metrics))
        .route("/sells", get(handlers::get_sell_report))
        .route("/sells/export", get(handlers::export_sell_report))
        .route_layer(middleware::from_fn(auth_middleware))
}
