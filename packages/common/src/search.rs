//! Search, filter and sort over an already-fetched recipe collection.
//!
//! Everything here is pure: the same `(collection, query, mode)` triple always
//! yields the same output and the collection is never reordered in place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// Ordering applied after filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep the collection's own order.
    #[default]
    None,
    /// Newest first by creation time.
    Recent,
    /// Most ingredients first, then highest price.
    Most,
}

impl SortMode {
    /// Apply a selection the way the filter buttons do: picking the active
    /// mode again clears it, picking another mode replaces it.
    pub fn toggle(self, selected: SortMode) -> SortMode {
        if self == selected {
            SortMode::None
        } else {
            selected
        }
    }
}

/// Filter `collection` by `query` and order the survivors by `mode`.
pub fn apply<'a>(collection: &'a [Recipe], query: &str, mode: SortMode) -> Vec<&'a Recipe> {
    let mut results: Vec<&Recipe> = if query.trim().is_empty() {
        collection.iter().collect()
    } else {
        let needle = query.to_lowercase();
        collection
            .iter()
            .filter(|recipe| matches_lowercase(recipe, &needle))
            .collect()
    };

    // `sort_by` is stable, so ties keep their relative input order.
    match mode {
        SortMode::None => {}
        SortMode::Recent => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Most => results.sort_by(|a, b| compare_most(a, b)),
    }

    results
}

fn matches_lowercase(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle))
}

fn compare_most(a: &Recipe, b: &Recipe) -> Ordering {
    b.ingredients
        .len()
        .cmp(&a.ingredients.len())
        .then_with(|| {
            let a_price = a.price.unwrap_or(0.0);
            let b_price = b.price.unwrap_or(0.0);
            // Equal prices tie, so -0.0 and an absent price keep input order.
            b_price.partial_cmp(&a_price).unwrap_or(Ordering::Equal)
        })
}
