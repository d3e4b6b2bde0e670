//! Recipe API: a small CRUD service for recipes, their ingredients and a
//! nominal owning user, stored in SQLite and served over HTTP as JSON.

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use services::recipe_service::RecipeService;

/// Build the full application: routes, request tracing and a CORS policy
/// that accepts any origin.
pub fn app(service: RecipeService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}
