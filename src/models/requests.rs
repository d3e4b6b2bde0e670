//! Request payloads accepted by the JSON endpoints.
//!
//! Every field is optional at the serde level so that a missing key turns into
//! a validation message instead of a deserialization failure. `validate`
//! converts a payload into the typed input the service works with.

use crate::{
    models::{
        ingredient::{NAME_MAX_LEN, NewIngredient, QUANTITY_MAX_LEN},
        recipe::{NewRecipe, RecipeChanges, TITLE_MAX_LEN},
        user::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN},
    },
    services::recipe_service::{ServiceError, ServiceResult},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

/// Body of `POST /api/users`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Body of `POST /api/recipes`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Option<Vec<IngredientPayload>>,
}

/// Body of `PUT /api/recipes/{id}`. Any subset of fields may be present.
///
/// `title` and `instructions` keep an explicit `null` apart from an absent
/// key (`Some(None)` vs `None`) so that nulling a required column is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub instructions: Option<Option<String>>,
    pub ingredients: Option<Vec<IngredientPayload>>,
}

/// One entry of an `ingredients` array.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientPayload {
    pub name: Option<String>,
    pub quantity: Option<Quantity>,
}

/// Quantities are free text, but clients often send bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Text(String),
    Number(serde_json::Number),
}

impl Quantity {
    fn into_text(self) -> String {
        match self {
            Quantity::Text(text) => text,
            Quantity::Number(number) => number.to_string(),
        }
    }
}

/// Parse a raw request body into `T`.
///
/// Returns `Ok(None)` when there is nothing to work with: an empty body,
/// JSON `null`, or an empty object.
pub fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> ServiceResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ServiceError::Validation(format!("Invalid JSON body: {err}")))?;

    match &value {
        Value::Null => return Ok(None),
        Value::Object(map) if map.is_empty() => return Ok(None),
        _ => {}
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| ServiceError::Validation(format!("Invalid JSON body: {err}")))
}

impl CreateUserRequest {
    pub fn validate(self) -> ServiceResult<NewUser> {
        let (Some(username), Some(email)) = (self.username, self.email) else {
            return Err(ServiceError::Validation(
                "Missing required fields: username and email".into(),
            ));
        };
        ensure_max_len("username", &username, USERNAME_MAX_LEN)?;
        ensure_max_len("email", &email, EMAIL_MAX_LEN)?;

        Ok(NewUser { username, email })
    }
}

impl CreateRecipeRequest {
    pub fn validate(self) -> ServiceResult<NewRecipe> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.instructions.is_none() {
            missing.push("instructions");
        }

        let (Some(title), Some(instructions)) = (self.title, self.instructions) else {
            return Err(ServiceError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };
        ensure_max_len("title", &title, TITLE_MAX_LEN)?;

        let ingredients = validate_ingredients(self.ingredients.unwrap_or_default())?;

        Ok(NewRecipe {
            title,
            instructions,
            ingredients,
        })
    }
}

impl UpdateRecipeRequest {
    pub fn validate(self) -> ServiceResult<RecipeChanges> {
        let title = self.title.map(|v| non_null("title", v)).transpose()?;
        let instructions = self
            .instructions
            .map(|v| non_null("instructions", v))
            .transpose()?;
        if let Some(title) = &title {
            ensure_max_len("title", title, TITLE_MAX_LEN)?;
        }

        let ingredients = self.ingredients.map(validate_ingredients).transpose()?;

        Ok(RecipeChanges {
            title,
            instructions,
            ingredients,
        })
    }
}

/// Wraps whatever the key holds, `null` included, in `Some`. Paired with
/// `#[serde(default)]` so an absent key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_null(field: &str, value: Option<String>) -> ServiceResult<String> {
    value.ok_or_else(|| ServiceError::Validation(format!("Field `{field}` must not be null")))
}

fn validate_ingredients(entries: Vec<IngredientPayload>) -> ServiceResult<Vec<NewIngredient>> {
    entries
        .into_iter()
        .map(|entry| {
            let (Some(name), Some(quantity)) = (entry.name, entry.quantity) else {
                return Err(ServiceError::Validation("Invalid ingredient data".into()));
            };
            let quantity = quantity.into_text();
            ensure_max_len("ingredient name", &name, NAME_MAX_LEN)?;
            ensure_max_len("ingredient quantity", &quantity, QUANTITY_MAX_LEN)?;

            Ok(NewIngredient { name, quantity })
        })
        .collect()
}

fn ensure_max_len(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    if value.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "Field `{field}` must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(err: ServiceError) -> String {
        match err {
            ServiceError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_null_and_empty_object_bodies_parse_to_none() {
        for body in [&b""[..], &b"   "[..], &b"null"[..], &b"{}"[..]] {
            let parsed = parse_payload::<CreateRecipeRequest>(body).unwrap();
            assert!(parsed.is_none(), "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_payload::<CreateRecipeRequest>(b"{\"title\": ").unwrap_err();
        assert!(validation_message(err).starts_with("Invalid JSON body"));
    }

    #[test]
    fn missing_recipe_fields_are_named() {
        let req: CreateRecipeRequest = parse_payload(br#"{"title":"X"}"#).unwrap().unwrap();
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Missing required fields: instructions");

        let req: CreateRecipeRequest = parse_payload(br#"{"notes":"x"}"#).unwrap().unwrap();
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Missing required fields: title, instructions");
    }

    #[test]
    fn ingredient_without_quantity_is_rejected() {
        let req: CreateRecipeRequest = parse_payload(
            br#"{"title":"Tea","instructions":"Boil","ingredients":[{"name":"Water"}]}"#,
        )
        .unwrap()
        .unwrap();
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Invalid ingredient data");
    }

    #[test]
    fn numeric_quantity_is_kept_as_text() {
        let req: CreateRecipeRequest = parse_payload(
            br#"{"title":"Eggs","instructions":"Fry","ingredients":[{"name":"Egg","quantity":2}]}"#,
        )
        .unwrap()
        .unwrap();
        let recipe = req.validate().unwrap();
        assert_eq!(recipe.ingredients[0].quantity, "2");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let req = CreateRecipeRequest {
            title: Some("t".repeat(TITLE_MAX_LEN + 1)),
            instructions: Some("x".into()),
            ingredients: None,
        };
        let msg = validation_message(req.validate().unwrap_err());
        assert!(msg.contains("title"));
    }

    #[test]
    fn update_distinguishes_absent_and_empty_ingredients() {
        let req: UpdateRecipeRequest = parse_payload(br#"{"title":"New"}"#).unwrap().unwrap();
        let changes = req.validate().unwrap();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert!(changes.ingredients.is_none());

        let req: UpdateRecipeRequest = parse_payload(br#"{"ingredients":[]}"#).unwrap().unwrap();
        let changes = req.validate().unwrap();
        assert_eq!(changes.ingredients, Some(Vec::new()));
    }

    #[test]
    fn update_rejects_explicit_null_for_required_fields() {
        let req: UpdateRecipeRequest = parse_payload(br#"{"title":null}"#).unwrap().unwrap();
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Field `title` must not be null");

        let req: UpdateRecipeRequest =
            parse_payload(br#"{"title":"Kept","instructions":null}"#).unwrap().unwrap();
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Field `instructions` must not be null");
    }

    #[test]
    fn update_treats_null_ingredients_as_absent() {
        let req: UpdateRecipeRequest =
            parse_payload(br#"{"title":"New","ingredients":null}"#).unwrap().unwrap();
        let changes = req.validate().unwrap();
        assert!(changes.ingredients.is_none());
    }

    #[test]
    fn user_requires_both_fields() {
        let req = CreateUserRequest {
            username: Some("alice".into()),
            email: None,
        };
        let msg = validation_message(req.validate().unwrap_err());
        assert_eq!(msg, "Missing required fields: username and email");
    }
}
