//! HTTP handlers for recipe operations.
//! Bodies are read as raw bytes and parsed as JSON whatever the content type;
//! storage concerns are delegated to `RecipeService`.

use crate::{
    errors::AppError,
    models::{
        recipe::RecipeWithIngredients,
        requests::{CreateRecipeRequest, UpdateRecipeRequest, parse_payload},
    },
    services::recipe_service::RecipeService,
};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};

/// Recipe id taken from the `{id}` path segment.
///
/// Only plain decimal digits match; anything else is answered with a JSON 404
/// the same way an id with no row is.
pub struct RecipeId(pub i64);

impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Not found"))?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::not_found(format!("Recipe {raw} not found")));
        }
        raw.parse::<i64>()
            .map(RecipeId)
            .map_err(|_| AppError::not_found(format!("Recipe {raw} not found")))
    }
}

/// POST `/api/recipes` — create a recipe owned by the default user.
pub async fn create_recipe(
    State(service): State<RecipeService>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let new_recipe = parse_payload::<CreateRecipeRequest>(&body)?
        .unwrap_or_default()
        .validate()?;
    let recipe = service.create_recipe(new_recipe).await?;

    tracing::info!(
        recipe_id = recipe.recipe.id,
        ingredients = recipe.ingredients.len(),
        "recipe created"
    );
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET `/api/recipes` — every recipe with its ingredients.
pub async fn list_recipes(
    State(service): State<RecipeService>,
) -> Result<Json<Vec<RecipeWithIngredients>>, AppError> {
    let recipes = service.list_recipes().await?;
    Ok(Json(recipes))
}

/// GET `/api/recipes/{id}`
pub async fn get_recipe(
    State(service): State<RecipeService>,
    RecipeId(id): RecipeId,
) -> Result<Json<RecipeWithIngredients>, AppError> {
    let recipe = service.get_recipe(id).await?;
    Ok(Json(recipe))
}

/// PUT `/api/recipes/{id}` — partial update; `ingredients` replaces the list.
pub async fn update_recipe(
    State(service): State<RecipeService>,
    RecipeId(id): RecipeId,
    body: Bytes,
) -> Result<Json<RecipeWithIngredients>, AppError> {
    let Some(request) = parse_payload::<UpdateRecipeRequest>(&body)? else {
        return Err(AppError::bad_request("No data provided"));
    };
    let changes = request.validate()?;
    let recipe = service.update_recipe(id, changes).await?;

    tracing::info!(
        recipe_id = id,
        ingredients = recipe.ingredients.len(),
        "recipe updated"
    );
    Ok(Json(recipe))
}

/// DELETE `/api/recipes/{id}` — removes the recipe and its ingredients.
pub async fn delete_recipe(
    State(service): State<RecipeService>,
    RecipeId(id): RecipeId,
) -> Result<StatusCode, AppError> {
    service.delete_recipe(id).await?;

    tracing::info!(recipe_id = id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
