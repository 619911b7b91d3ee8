//! Test doubles shared by the controller and event loop tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::api::RecipeApi;
use crate::error::{AppError, AppResult};
use crate::models::{PageButtons, RecipeDetail};
use crate::types::{Like, ListItem, RawRecipe, RecipeSummary};
use crate::view::{Area, View};

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    ClearInput,
    ClearResults,
    Loader(Area),
    ClearLoader,
    Results { ids: Vec<String>, page: usize, buttons: PageButtons },
    Highlight(String),
    ClearRecipe,
    Recipe { id: String, servings: u32, counts: Vec<Option<f64>>, liked: bool },
    Servings { servings: u32, counts: Vec<Option<f64>> },
    Alert(String),
    Message(String),
    ListItem(ListItem),
    DeleteListItem(String),
    List(usize),
    LikeButton(bool),
    LikeMenu(usize),
    Like(String),
    DeleteLike(String),
}

#[derive(Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn take(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

fn counts(recipe: &RecipeDetail) -> Vec<Option<f64>> {
    recipe.ingredients.iter().map(|i| i.count).collect()
}

impl View for RecordingView {
    fn clear_input(&mut self) {
        self.events.push(ViewEvent::ClearInput);
    }
    fn clear_results(&mut self) {
        self.events.push(ViewEvent::ClearResults);
    }
    fn render_loader(&mut self, area: Area) {
        self.events.push(ViewEvent::Loader(area));
    }
    fn clear_loader(&mut self) {
        self.events.push(ViewEvent::ClearLoader);
    }
    fn render_results(&mut self, recipes: &[RecipeSummary], page: usize, buttons: PageButtons) {
        self.events.push(ViewEvent::Results {
            ids: recipes.iter().map(|r| r.id.clone()).collect(),
            page,
            buttons,
        });
    }
    fn highlight_selected(&mut self, id: &str) {
        self.events.push(ViewEvent::Highlight(id.to_string()));
    }
    fn clear_recipe(&mut self) {
        self.events.push(ViewEvent::ClearRecipe);
    }
    fn render_recipe(&mut self, recipe: &RecipeDetail, liked: bool) {
        self.events.push(ViewEvent::Recipe {
            id: recipe.id.clone(),
            servings: recipe.servings,
            counts: counts(recipe),
            liked,
        });
    }
    fn update_servings_ingredients(&mut self, recipe: &RecipeDetail) {
        self.events.push(ViewEvent::Servings {
            servings: recipe.servings,
            counts: counts(recipe),
        });
    }
    fn alert(&mut self, message: &str) {
        self.events.push(ViewEvent::Alert(message.to_string()));
    }
    fn message(&mut self, text: &str) {
        self.events.push(ViewEvent::Message(text.to_string()));
    }
    fn render_list_item(&mut self, item: &ListItem) {
        self.events.push(ViewEvent::ListItem(item.clone()));
    }
    fn delete_list_item(&mut self, id: &str) {
        self.events.push(ViewEvent::DeleteListItem(id.to_string()));
    }
    fn render_list(&mut self, items: &[ListItem]) {
        self.events.push(ViewEvent::List(items.len()));
    }
    fn toggle_like_btn(&mut self, liked: bool) {
        self.events.push(ViewEvent::LikeButton(liked));
    }
    fn toggle_like_menu(&mut self, num_likes: usize) {
        self.events.push(ViewEvent::LikeMenu(num_likes));
    }
    fn render_like(&mut self, like: &Like) {
        self.events.push(ViewEvent::Like(like.id.clone()));
    }
    fn delete_like(&mut self, id: &str) {
        self.events.push(ViewEvent::DeleteLike(id.to_string()));
    }
}

/// Canned recipe API. Queries and ids not registered answer with an API error.
#[derive(Default)]
pub struct FakeApi {
    searches: HashMap<String, Vec<RecipeSummary>>,
    recipes: HashMap<String, RawRecipe>,
    delays: HashMap<String, Duration>,
    pub search_calls: AtomicUsize,
    pub recipe_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_search(mut self, query: &str, count: usize) -> Self {
        let results = (0..count)
            .map(|i| RecipeSummary {
                id: format!("{query}-{i}"),
                title: format!("{query} {i}"),
                author: "Closet Cooking".to_string(),
                image: format!("http://img/{i}.jpg"),
            })
            .collect();
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_recipe(mut self, id: &str, ingredients: &[&str]) -> Self {
        self.recipes.insert(
            id.to_string(),
            RawRecipe {
                id: id.to_string(),
                title: format!("Recipe {id}"),
                author: "101 Cookbooks".to_string(),
                image: format!("http://img/{id}.jpg"),
                url: format!("http://example.com/{id}"),
                ingredients: ingredients.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    /// Delay the answer for a query or recipe id.
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    fn wait(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            std::thread::sleep(*delay);
        }
    }
}

impl RecipeApi for FakeApi {
    fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(query);
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| AppError::Network(format!("no route for '{query}'")))
    }

    fn recipe(&self, id: &str) -> AppResult<RawRecipe> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(id);
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::Api(format!("Couldn't find recipe {id}")))
    }
}
