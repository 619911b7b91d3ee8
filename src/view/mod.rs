pub mod format;
pub mod terminal;

pub use terminal::TerminalView;

use crate::models::{PageButtons, RecipeDetail};
use crate::types::{Like, ListItem, RecipeSummary};

/// Region a loading indicator is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Results,
    Recipe,
}

/// Rendering port driven by the controllers. Implementations receive plain
/// data only.
pub trait View {
    fn clear_input(&mut self);
    fn clear_results(&mut self);
    fn render_loader(&mut self, area: Area);
    fn clear_loader(&mut self);
    fn render_results(&mut self, recipes: &[RecipeSummary], page: usize, buttons: PageButtons);
    fn highlight_selected(&mut self, id: &str);

    fn clear_recipe(&mut self);
    fn render_recipe(&mut self, recipe: &RecipeDetail, liked: bool);
    fn update_servings_ingredients(&mut self, recipe: &RecipeDetail);
    /// Blocking, user-facing error message.
    fn alert(&mut self, message: &str);
    /// Plain informational text, such as command help.
    fn message(&mut self, text: &str);

    fn render_list_item(&mut self, item: &ListItem);
    fn delete_list_item(&mut self, id: &str);
    fn render_list(&mut self, items: &[ListItem]);

    fn toggle_like_btn(&mut self, liked: bool);
    fn toggle_like_menu(&mut self, num_likes: usize);
    fn render_like(&mut self, like: &Like);
    fn delete_like(&mut self, id: &str);
}
