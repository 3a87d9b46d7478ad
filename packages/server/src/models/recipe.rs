use common::{Recipe, RecipeFields, SortMode};
use serde::de::IntoDeserializer;
use serde::de::value::StrDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

use super::shared::{validate_max_chars, validate_optional_range, validate_title};

/// Query parameters for listing recipes.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct RecipeListQuery {
    /// Free-text search over title, description and ingredients.
    #[param(example = "basil")]
    pub q: Option<String>,
    /// `recent` (newest first) or `most` (most ingredients, then highest price).
    /// Omit (or send empty) to keep the catalog's default newest-first order.
    #[param(example = "most")]
    #[serde(default, deserialize_with = "empty_as_no_sort")]
    pub sort: Option<SortMode>,
}

/// `?sort=` is what a form with nothing selected submits.
fn empty_as_no_sort<'de, D>(deserializer: D) -> Result<Option<SortMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(mode) => {
            let mode: StrDeserializer<'_, D::Error> = mode.into_deserializer();
            SortMode::deserialize(mode).map(Some)
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeListResponse {
    pub data: Vec<Recipe>,
    /// Number of recipes in the catalog before filtering.
    #[schema(example = 12)]
    pub total: usize,
    /// Number of recipes that matched the query.
    #[schema(example = 3)]
    pub matched: usize,
}

/// A single recipe plus the values the detail view shows.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Price with two decimals, e.g. `"12.50"`.
    #[schema(example = "12.50")]
    pub display_price: Option<String>,
    /// Prep plus cook time in minutes.
    #[schema(example = 27)]
    pub total_time: Option<u32>,
}

impl From<Recipe> for RecipeDetail {
    fn from(recipe: Recipe) -> Self {
        Self {
            display_price: recipe.display_price(),
            total_time: recipe.total_time(),
            recipe,
        }
    }
}

pub const MAX_DESCRIPTION_CHARS: usize = 10_000;
pub const MAX_LINE_CHARS: usize = 1_000;
pub const MAX_LINES: usize = 200;
pub const MAX_MINUTES: u32 = 100_000;
pub const MAX_SERVINGS: u32 = 10_000;
pub const MAX_PRICE: f64 = 1_000_000.0;
pub const MAX_IMAGE_URL_CHARS: usize = 2_048;

/// Validate a mapped record before it reaches the store.
pub fn validate_recipe_fields(fields: &RecipeFields) -> Result<(), AppError> {
    validate_title(&fields.title)?;
    validate_max_chars(&fields.description, MAX_DESCRIPTION_CHARS, "Description")?;
    validate_lines(&fields.ingredients, "ingredient")?;
    validate_lines(&fields.instructions, "instruction")?;
    validate_optional_range(fields.prep_time, 0..=MAX_MINUTES, "Prep time")?;
    validate_optional_range(fields.cook_time, 0..=MAX_MINUTES, "Cook time")?;
    validate_optional_range(fields.servings, 1..=MAX_SERVINGS, "Servings")?;
    if let Some(price) = fields.price
        && !(price.is_finite() && (0.0..=MAX_PRICE).contains(&price))
    {
        return Err(AppError::Validation(format!(
            "Price must be between 0 and {MAX_PRICE}"
        )));
    }
    if let Some(ref url) = fields.image_url {
        validate_max_chars(url, MAX_IMAGE_URL_CHARS, "Image URL")?;
    }
    Ok(())
}

fn validate_lines(lines: &[String], name: &str) -> Result<(), AppError> {
    if lines.is_empty() {
        return Err(AppError::Validation(format!(
            "At least one {name} is required"
        )));
    }
    if lines.len() > MAX_LINES {
        return Err(AppError::Validation(format!(
            "Too many {name}s: max {MAX_LINES}"
        )));
    }
    for line in lines {
        validate_max_chars(line, MAX_LINE_CHARS, "Each line")?;
    }
    Ok(())
}
