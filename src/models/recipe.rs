//! Represents a recipe and its nested ingredient list.

use crate::models::ingredient::{Ingredient, NewIngredient};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

pub const TITLE_MAX_LEN: usize = 100;

/// A recipe row as stored in the `recipes` table.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq)]
pub struct Recipe {
    /// System-assigned primary key.
    pub id: i64,

    /// Short display title.
    pub title: String,

    /// Free-form preparation text.
    pub instructions: String,

    /// Set once when the row is inserted.
    pub created_at: DateTime<Utc>,

    /// Owning user. No operation changes it after creation.
    pub user_id: i64,
}

/// A recipe together with its ingredients in insertion order.
///
/// This is the shape every recipe endpoint responds with: the recipe fields
/// flattened at the top level plus an `ingredients` array.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecipeWithIngredients {
    #[serde(flatten)]
    pub recipe: Recipe,

    pub ingredients: Vec<Ingredient>,
}

/// Validated input for creating a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub instructions: String,
    pub ingredients: Vec<NewIngredient>,
}

/// Validated changes for an existing recipe.
///
/// `None` leaves the field untouched. `Some(vec![])` for `ingredients`
/// removes every ingredient.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Option<Vec<NewIngredient>>,
}
