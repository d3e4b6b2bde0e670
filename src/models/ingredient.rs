//! Represents a single ingredient line of a recipe.

use serde::Serialize;
use sqlx::FromRow;

pub const NAME_MAX_LEN: usize = 100;
pub const QUANTITY_MAX_LEN: usize = 50;

/// An ingredient row, always owned by exactly one recipe.
///
/// `quantity` is free text ("1 cup", "a pinch") rather than a typed amount.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub quantity: String,
    /// Foreign key to the parent recipe; rows are removed with it.
    pub recipe_id: i64,
}

/// Validated ingredient input, not yet attached to a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: String,
}
