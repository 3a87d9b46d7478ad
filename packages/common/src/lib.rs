pub mod form;
pub mod image;
pub mod recipe;
pub mod search;
pub mod storage;
pub mod store;

pub use form::{FormError, RecipeForm};
pub use recipe::{Recipe, RecipeFields};
pub use search::SortMode;
pub use store::{RecipeStore, StoreError};
