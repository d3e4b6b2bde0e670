//! Defines routes for the recipe API.
//!
//! ## Structure
//! - **Status endpoints**
//!   - `GET    /`        — service banner
//!   - `GET    /healthz` — liveness
//!   - `GET    /readyz`  — readiness (database probe)
//!
//! - **User endpoints**
//!   - `POST   /api/users` — create user
//!
//! - **Recipe endpoints**
//!   - `GET    /api/recipes`      — list recipes
//!   - `POST   /api/recipes`      — create recipe
//!   - `GET    /api/recipes/{id}` — fetch recipe
//!   - `PUT    /api/recipes/{id}` — update recipe
//!   - `DELETE /api/recipes/{id}` — delete recipe

use crate::{
    handlers::{
        health_handlers::{healthz, index, readyz},
        recipe_handlers::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
        user_handlers::create_user,
    },
    services::recipe_service::RecipeService,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for every endpoint.
///
/// The router carries shared state (`RecipeService`) to all handlers.
pub fn routes() -> Router<RecipeService> {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/users", post(create_user))
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}
