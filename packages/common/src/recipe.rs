use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the recipe store.
///
/// `id`, `created_at` and `updated_at` are assigned by the store and never
/// changed by callers; everything else lives in [`RecipeFields`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recipe {
    /// Opaque identifier assigned by the store.
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "Chocolate Chip Cookies")]
    pub title: String,
    #[schema(example = "Chewy cookies with a crisp edge")]
    pub description: String,
    /// Ingredient lines in the order they were entered.
    pub ingredients: Vec<String>,
    /// Steps in execution order.
    pub instructions: Vec<String>,
    /// Preparation time in minutes.
    #[schema(example = 15)]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    #[schema(example = 12)]
    pub cook_time: Option<u32>,
    #[schema(example = 24)]
    pub servings: Option<u32>,
    /// Total cost to make the recipe, in currency units.
    #[schema(example = 12.5)]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable part of a recipe: what gets inserted, and what an update
/// replaces wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeFields {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl Recipe {
    /// Split off the store-owned metadata, leaving the replaceable fields.
    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }

    /// Price with two decimal places, e.g. `12.50`.
    pub fn display_price(&self) -> Option<String> {
        self.price.map(format_price)
    }

    /// Prep plus cook time, when at least one of them is known.
    pub fn total_time(&self) -> Option<u32> {
        match (self.prep_time, self.cook_time) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }
}

/// Render a price for display with exactly two decimal places.
pub fn format_price(price: f64) -> String {
    // `+ 0.0` folds -0.0 into 0.0 so it never renders as "-0.00".
    format!("{:.2}", price + 0.0)
}
