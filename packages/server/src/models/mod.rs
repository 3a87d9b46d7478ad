pub mod image;
pub mod recipe;
pub mod shared;
