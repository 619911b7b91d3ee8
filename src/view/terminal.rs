use std::io::Write;

use colored::Colorize;

use crate::models::{PageButtons, RecipeDetail};
use crate::types::{Like, ListItem, RecipeSummary};
use crate::view::format::{TITLE_LIMIT, format_count, limit_title};
use crate::view::{Area, View};

/// Renders the application as coloured text on a writer, usually stdout.
pub struct TerminalView<W: Write> {
    out: W,
    selected: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            selected: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ingredient_line(&mut self, count: Option<f64>, unit: &str, ingredient: &str) {
        let _ = writeln!(
            self.out,
            "  {} {} {}",
            format_count(count).bold(),
            unit,
            ingredient
        );
    }

    fn ingredients(&mut self, recipe: &RecipeDetail) {
        for ingredient in &recipe.ingredients {
            self.ingredient_line(ingredient.count, &ingredient.unit, &ingredient.ingredient);
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn clear_input(&mut self) {}

    fn clear_results(&mut self) {
        self.selected = None;
    }

    fn render_loader(&mut self, area: Area) {
        let what = match area {
            Area::Results => "Searching recipes",
            Area::Recipe => "Loading recipe",
        };
        let _ = writeln!(self.out, "{}", format!("{what} ...").dimmed());
    }

    fn clear_loader(&mut self) {}

    fn render_results(&mut self, recipes: &[RecipeSummary], page: usize, buttons: PageButtons) {
        if recipes.is_empty() {
            let _ = writeln!(self.out, "{}", "No recipes found.".yellow());
        }
        for recipe in recipes {
            let marker = if self.selected.as_deref() == Some(recipe.id.as_str()) {
                "▸"
            } else {
                " "
            };
            let _ = writeln!(
                self.out,
                "{marker} {:<21} {} {}",
                limit_title(&recipe.title, TITLE_LIMIT).bold(),
                recipe.author.dimmed(),
                format!("#{}", recipe.id).cyan()
            );
        }
        let mut nav = Vec::new();
        if let Some(prev) = buttons.prev {
            nav.push(format!("◂ page {prev}"));
        }
        if let Some(next) = buttons.next {
            nav.push(format!("page {next} ▸"));
        }
        if !nav.is_empty() {
            let _ = writeln!(self.out, "{}  {}", format!("page {page}").dimmed(), nav.join("   "));
        }
    }

    fn highlight_selected(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    fn clear_recipe(&mut self) {}

    fn render_recipe(&mut self, recipe: &RecipeDetail, liked: bool) {
        let heart = if liked { "♥".red() } else { "♡".normal() };
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{} {}", recipe.title.to_uppercase().bold(), heart);
        let _ = writeln!(
            self.out,
            "{} minutes · {} servings",
            recipe.time.to_string().bold(),
            recipe.servings.to_string().bold()
        );
        self.ingredients(recipe);
        let _ = writeln!(
            self.out,
            "{} {}",
            format!("by {}", recipe.author).dimmed(),
            recipe.url.underline()
        );
    }

    fn update_servings_ingredients(&mut self, recipe: &RecipeDetail) {
        let _ = writeln!(self.out, "{} servings", recipe.servings.to_string().bold());
        self.ingredients(recipe);
    }

    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message.red().bold());
    }

    fn message(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn render_list_item(&mut self, item: &ListItem) {
        let _ = writeln!(
            self.out,
            "{} {} {} {}",
            "+".green(),
            format_count(item.count).bold(),
            item.unit,
            format!("{}  [{}]", item.ingredient, item.id).dimmed()
        );
    }

    fn delete_list_item(&mut self, id: &str) {
        let _ = writeln!(self.out, "{} {}", "-".red(), id.dimmed());
    }

    fn render_list(&mut self, items: &[ListItem]) {
        if items.is_empty() {
            let _ = writeln!(self.out, "{}", "Shopping list is empty.".yellow());
        }
        for item in items {
            let _ = writeln!(
                self.out,
                "  {} {} {} {}",
                format_count(item.count).bold(),
                item.unit,
                item.ingredient,
                format!("[{}]", item.id).dimmed()
            );
        }
    }

    fn toggle_like_btn(&mut self, liked: bool) {
        let label = if liked { "♥ liked".red() } else { "♡ not liked".normal() };
        let _ = writeln!(self.out, "{label}");
    }

    fn toggle_like_menu(&mut self, num_likes: usize) {
        let _ = writeln!(self.out, "{}", format!("Liked recipes: {num_likes}").dimmed());
    }

    fn render_like(&mut self, like: &Like) {
        let _ = writeln!(
            self.out,
            "  {} {} {}",
            limit_title(&like.title, TITLE_LIMIT).bold(),
            like.author.dimmed(),
            format!("#{}", like.id).cyan()
        );
    }

    fn delete_like(&mut self, id: &str) {
        let _ = writeln!(self.out, "{} {}", "unliked".dimmed(), format!("#{id}").cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TerminalView<Vec<u8>> {
        colored::control::set_override(false);
        TerminalView::new(Vec::new())
    }

    fn text(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    fn summary(id: &str, title: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            title: title.to_string(),
            author: "Closet Cooking".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn results_show_short_titles_and_navigation() {
        let mut view = plain();
        view.highlight_selected("2");
        view.render_results(
            &[summary("1", "Pasta with Pesto Cream Sauce"), summary("2", "Pizza Dip")],
            2,
            PageButtons {
                prev: Some(1),
                next: Some(3),
            },
        );
        let out = text(view);
        assert!(out.contains("Pasta with Pesto ..."));
        assert!(out.contains("▸ Pizza Dip"));
        assert!(out.contains("◂ page 1"));
        assert!(out.contains("page 3 ▸"));
    }

    #[test]
    fn recipe_shows_fractions_and_servings() {
        let mut view = plain();
        let recipe = RecipeDetail {
            id: "47746".into(),
            title: "Best Pizza Dough Ever".into(),
            author: "101 Cookbooks".into(),
            image: String::new(),
            url: "http://example.com".into(),
            ingredients: vec![crate::types::Ingredient {
                count: Some(4.5),
                unit: "cup".into(),
                ingredient: "flour".into(),
            }],
            time: 15,
            servings: 4,
        };
        view.render_recipe(&recipe, true);
        let out = text(view);
        assert!(out.contains("BEST PIZZA DOUGH EVER ♥"));
        assert!(out.contains("15 minutes · 4 servings"));
        assert!(out.contains("4 1/2 cup flour"));
    }
}
