//! Conversion between the free-text recipe form and [`RecipeFields`].
//!
//! Every form field is a string. List fields hold one entry per line; numeric
//! fields are either empty (absent) or a number.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recipe::{Recipe, RecipeFields};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Raw form input for creating or editing a recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RecipeForm {
    #[schema(example = "Chocolate Chip Cookies")]
    pub title: String,
    pub description: String,
    /// One ingredient per line.
    #[schema(example = "2 cups flour\n1 cup sugar\n3 eggs")]
    pub ingredients: String,
    /// One step per line.
    #[schema(example = "Preheat oven to 350F\nMix dry ingredients\nBake for 20 minutes")]
    pub instructions: String,
    #[schema(example = "15")]
    pub prep_time: String,
    #[schema(example = "30")]
    pub cook_time: String,
    #[schema(example = "4")]
    pub servings: String,
    #[schema(example = "12.50")]
    pub price: String,
    pub image_url: String,
}

impl RecipeForm {
    /// Map the form onto a record.
    ///
    /// Blank lines in list fields are dropped and the rest trimmed. Empty
    /// numeric fields become `None`.
    pub fn to_record(&self) -> Result<RecipeFields, FormError> {
        Ok(RecipeFields {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            ingredients: split_lines(&self.ingredients),
            instructions: split_lines(&self.instructions),
            prep_time: parse_optional("prep_time", &self.prep_time)?,
            cook_time: parse_optional("cook_time", &self.cook_time)?,
            servings: parse_optional("servings", &self.servings)?,
            price: parse_optional("price", &self.price)?,
            image_url: non_empty(&self.image_url),
        })
    }

    /// Hydrate a form from stored fields, the inverse of [`Self::to_record`].
    pub fn from_fields(fields: &RecipeFields) -> Self {
        Self {
            title: fields.title.clone(),
            description: fields.description.clone(),
            ingredients: fields.ingredients.join("\n"),
            instructions: fields.instructions.join("\n"),
            prep_time: render_optional(fields.prep_time),
            cook_time: render_optional(fields.cook_time),
            servings: render_optional(fields.servings),
            price: render_optional(fields.price),
            image_url: fields.image_url.clone().unwrap_or_default(),
        }
    }
}

impl From<&Recipe> for RecipeForm {
    fn from(recipe: &Recipe) -> Self {
        Self::from_fields(&recipe.fields())
    }
}

/// Split multi-line text into trimmed, non-blank lines, keeping order and
/// duplicates.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_optional<T: FromStr>(field: &'static str, text: &str) -> Result<Option<T>, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

fn render_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
