pub mod ingredient;
pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;

pub use likes::Likes;
pub use list::ShoppingList;
pub use recipe::RecipeDetail;
pub use search::{PageButtons, SearchState};
