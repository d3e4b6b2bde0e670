//! src/services/recipe_service.rs
//!
//! RecipeService — users, recipes and ingredients backed by SQLite. Every
//! mutating operation runs inside a single transaction; dropping the
//! transaction on an early `?` return rolls it back.

use crate::models::{
    ingredient::{Ingredient, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeChanges, RecipeWithIngredients},
    user::{DEFAULT_EMAIL, DEFAULT_USERNAME, NewUser, User},
};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// RecipeService provides the CRUD operations behind the HTTP API:
/// - Create users (username and email unique)
/// - Create, list, fetch, update and delete recipes with nested ingredients
/// - Check-or-create the default owner at startup
#[derive(Clone)]
pub struct RecipeService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl RecipeService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Lightweight connectivity probe used by `/readyz`.
    pub async fn ping(&self) -> ServiceResult<i64> {
        let value = sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        Ok(value)
    }

    /// Return the default user, inserting it first if it does not exist yet.
    ///
    /// The insert is conditional on the username, so running this any number
    /// of times (or from several processes at once) leaves exactly one row.
    pub async fn ensure_default_user(&self) -> ServiceResult<User> {
        let mut tx = self.db.begin().await?;
        let user = ensure_default_user_in(&mut tx).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Insert a new user.
    ///
    /// Returns Conflict if the username or email is already taken.
    pub async fn create_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let mut tx = self.db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email) VALUES (?, ?)
             RETURNING id, username, email",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::Conflict("A user with that username or email already exists".into())
            } else {
                ServiceError::Sqlx(err)
            }
        })?;

        tx.commit().await?;
        Ok(user)
    }

    /// Insert a recipe and its ingredients, owned by the default user.
    pub async fn create_recipe(&self, new_recipe: NewRecipe) -> ServiceResult<RecipeWithIngredients> {
        let mut tx = self.db.begin().await?;
        let owner = ensure_default_user_in(&mut tx).await?;

        let recipe = sqlx::query_as::<_, Recipe>(
            "INSERT INTO recipes (title, instructions, created_at, user_id)
             VALUES (?, ?, ?, ?)
             RETURNING id, title, instructions, created_at, user_id",
        )
        .bind(&new_recipe.title)
        .bind(&new_recipe.instructions)
        .bind(Utc::now())
        .bind(owner.id)
        .fetch_one(&mut *tx)
        .await?;

        let ingredients = insert_ingredients(&mut tx, recipe.id, &new_recipe.ingredients).await?;

        tx.commit().await?;
        Ok(RecipeWithIngredients {
            recipe,
            ingredients,
        })
    }

    /// All recipes in id order, each with its ingredients.
    pub async fn list_recipes(&self) -> ServiceResult<Vec<RecipeWithIngredients>> {
        let mut conn = self.db.acquire().await?;

        let recipes = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, instructions, created_at, user_id FROM recipes ORDER BY id ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        let rows = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, quantity, recipe_id FROM ingredients ORDER BY recipe_id ASC, id ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut by_recipe: HashMap<i64, Vec<Ingredient>> = HashMap::new();
        for ingredient in rows {
            by_recipe
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let ingredients = by_recipe.remove(&recipe.id).unwrap_or_default();
                RecipeWithIngredients {
                    recipe,
                    ingredients,
                }
            })
            .collect())
    }

    /// Fetch one recipe with its ingredients.
    ///
    /// Returns NotFound if no recipe has this id.
    pub async fn get_recipe(&self, id: i64) -> ServiceResult<RecipeWithIngredients> {
        let mut conn = self.db.acquire().await?;
        load_recipe(&mut conn, id).await
    }

    /// Apply `changes` to an existing recipe.
    ///
    /// Title and instructions are overwritten when present. A present
    /// ingredient list replaces every existing ingredient, even when empty.
    pub async fn update_recipe(
        &self,
        id: i64,
        changes: RecipeChanges,
    ) -> ServiceResult<RecipeWithIngredients> {
        let mut tx = self.db.begin().await?;
        let current = fetch_recipe(&mut tx, id).await?;

        let title = changes.title.unwrap_or(current.title);
        let instructions = changes.instructions.unwrap_or(current.instructions);
        sqlx::query("UPDATE recipes SET title = ?, instructions = ? WHERE id = ?")
            .bind(&title)
            .bind(&instructions)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(ingredients) = changes.ingredients {
            let removed = sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            debug!(
                recipe_id = id,
                removed = removed.rows_affected(),
                inserted = ingredients.len(),
                "replacing ingredients"
            );
            insert_ingredients(&mut tx, id, &ingredients).await?;
        }

        let updated = load_recipe(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a recipe. Its ingredients go with it via `ON DELETE CASCADE`.
    ///
    /// Returns NotFound if no row was removed.
    pub async fn delete_recipe(&self, id: i64) -> ServiceResult<()> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound {
                entity: "Recipe",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn ensure_default_user_in(conn: &mut SqliteConnection) -> ServiceResult<User> {
    let inserted = sqlx::query(
        "INSERT INTO users (username, email) VALUES (?, ?)
         ON CONFLICT(username) DO NOTHING",
    )
    .bind(DEFAULT_USERNAME)
    .bind(DEFAULT_EMAIL)
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() > 0 {
        debug!("created default user");
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email FROM users WHERE username = ?",
    )
    .bind(DEFAULT_USERNAME)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

async fn fetch_recipe(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Recipe> {
    sqlx::query_as::<_, Recipe>(
        "SELECT id, title, instructions, created_at, user_id FROM recipes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(ServiceError::NotFound {
        entity: "Recipe",
        id,
    })
}

async fn load_recipe(conn: &mut SqliteConnection, id: i64) -> ServiceResult<RecipeWithIngredients> {
    let recipe = fetch_recipe(conn, id).await?;

    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, quantity, recipe_id FROM ingredients
         WHERE recipe_id = ? ORDER BY id ASC",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(RecipeWithIngredients {
        recipe,
        ingredients,
    })
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredients: &[NewIngredient],
) -> ServiceResult<Vec<Ingredient>> {
    let mut inserted = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        let row = sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (name, quantity, recipe_id) VALUES (?, ?, ?)
             RETURNING id, name, quantity, recipe_id",
        )
        .bind(&ingredient.name)
        .bind(&ingredient.quantity)
        .bind(recipe_id)
        .fetch_one(&mut *conn)
        .await?;
        inserted.push(row);
    }
    Ok(inserted)
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation()
    )
}
