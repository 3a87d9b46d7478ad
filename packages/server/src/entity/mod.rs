pub mod image;
pub mod recipe;
