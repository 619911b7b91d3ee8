use std::sync::Arc;

use crate::api::{RecipeApi, fetch_recipe, fetch_search};
use crate::error::AppResult;
use crate::models::{Likes, RecipeDetail};
use crate::state::{AppState, Ticket};
use crate::types::{RawRecipe, RecipeSummary, ServingsChange};
use crate::view::{Area, View};

pub const RECIPE_ALERT: &str = "Could not process the recipe right now :(";

#[derive(Clone, Copy, Debug)]
pub struct ControllerOptions {
    pub page_size: usize,
    pub default_servings: u32,
}

/// A search that has been prepared and is waiting for its fetch.
#[derive(Debug)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: String,
}

/// A recipe navigation waiting for its fetch.
#[derive(Debug)]
pub struct RecipeRequest {
    pub ticket: Ticket,
    pub id: String,
}

/// Search, recipe, list and like controllers over one application state.
///
/// Fetching operations are split in two: `begin_*` prepares the state and
/// view and hands back a request, `finish_*` applies the fetch outcome. The
/// `control_*` helpers run both halves back to back.
pub struct Controller<V: View> {
    state: AppState,
    view: V,
    api: Arc<dyn RecipeApi>,
    options: ControllerOptions,
}

impl<V: View> Controller<V> {
    pub fn new(api: Arc<dyn RecipeApi>, likes: Likes, view: V, options: ControllerOptions) -> Self {
        Self {
            state: AppState::new(likes),
            view,
            api,
            options,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[cfg(test)]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn api(&self) -> Arc<dyn RecipeApi> {
        Arc::clone(&self.api)
    }

    pub fn notify(&mut self, text: &str) {
        self.view.message(text);
    }

    // SEARCH

    pub fn begin_search(&mut self, input: &str) -> Option<SearchRequest> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }
        let ticket = self.state.replace_search(query);

        self.view.clear_input();
        self.view.clear_results();
        self.view.render_loader(Area::Results);

        tracing::info!(query, "searching recipes");
        Some(SearchRequest {
            ticket,
            query: query.to_string(),
        })
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: AppResult<Vec<RecipeSummary>>) {
        if !self.state.is_current_search(ticket) {
            tracing::debug!(generation = ticket.generation(), "dropping stale search response");
            return;
        }
        self.view.clear_loader();
        match result {
            Ok(results) => {
                tracing::info!(count = results.len(), "search finished");
                if self.state.accept_search_results(ticket, results).is_some() {
                    self.render_page(1);
                }
            }
            Err(e) => tracing::error!(error = %e, "search failed"),
        }
    }

    pub async fn control_search(&mut self, input: &str) {
        if let Some(request) = self.begin_search(input) {
            let result = fetch_search(self.api(), request.query).await;
            self.finish_search(request.ticket, result);
        }
    }

    /// Re-render another page of the current results without fetching.
    pub fn go_to_page(&mut self, page: usize) {
        let Some(search) = self.state.search() else {
            tracing::debug!(page, "no active search to paginate");
            return;
        };
        let pages = search.page_count(self.options.page_size);
        if page == 0 || page > pages {
            tracing::warn!(page, pages, "page out of range");
            return;
        }
        self.view.clear_results();
        self.render_page(page);
    }

    fn render_page(&mut self, page: usize) {
        if let Some(search) = self.state.search() {
            let size = self.options.page_size;
            self.view
                .render_results(search.page(page, size), page, search.buttons(page, size));
        }
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
        self.view.clear_input();
        self.view.clear_results();
    }

    // RECIPE

    /// Prepare a navigation to `#<id>`. An empty fragment is ignored.
    pub fn begin_recipe(&mut self, fragment: &str) -> Option<RecipeRequest> {
        let id = fragment.trim().trim_start_matches('#').trim();
        if id.is_empty() {
            return None;
        }

        self.view.clear_recipe();
        self.view.render_loader(Area::Recipe);
        if self.state.search().is_some() {
            self.view.highlight_selected(id);
        }

        let ticket = self.state.begin_recipe(id);
        tracing::info!(id, "loading recipe");
        Some(RecipeRequest {
            ticket,
            id: id.to_string(),
        })
    }

    pub fn finish_recipe(&mut self, ticket: Ticket, result: AppResult<RawRecipe>) {
        if !self.state.is_current_recipe(ticket) {
            tracing::debug!(generation = ticket.generation(), "dropping stale recipe response");
            return;
        }

        let servings = self.options.default_servings;
        match result.and_then(|raw| RecipeDetail::from_raw(raw, servings)) {
            Ok(recipe) => {
                let liked = self.state.likes().is_liked(&recipe.id);
                self.view.clear_loader();
                if let Some(recipe) = self.state.accept_recipe(ticket, recipe) {
                    self.view.render_recipe(recipe, liked);
                }
            }
            Err(e) => {
                let id = self.state.fail_recipe(ticket).unwrap_or_default();
                tracing::error!(id, error = %e, "recipe could not be processed");
                self.view.clear_loader();
                self.view.alert(RECIPE_ALERT);
            }
        }
    }

    pub async fn control_recipe(&mut self, fragment: &str) {
        if let Some(request) = self.begin_recipe(fragment) {
            let result = fetch_recipe(self.api(), request.id).await;
            self.finish_recipe(request.ticket, result);
        }
    }

    pub fn update_servings(&mut self, change: ServingsChange) {
        let Some(recipe) = self.state.recipe_mut() else {
            tracing::debug!("no recipe loaded, ignoring servings change");
            return;
        };
        if change == ServingsChange::Decrease && recipe.servings <= 1 {
            return;
        }
        recipe.update_servings(change);
        self.view.update_servings_ingredients(recipe);
    }

    /// Jump straight to a number of servings, rescaling once.
    pub fn set_servings(&mut self, servings: u32) {
        let Some(recipe) = self.state.recipe_mut() else {
            return;
        };
        let servings = servings.max(1);
        if recipe.servings == servings {
            return;
        }
        recipe.scale_to(servings);
        self.view.update_servings_ingredients(recipe);
    }

    pub fn close_recipe(&mut self) {
        self.state.clear_recipe();
        self.view.clear_recipe();
    }

    // LIST

    /// Append every ingredient of the loaded recipe. Returns how many items
    /// were added.
    pub fn add_recipe_to_list(&mut self) -> usize {
        let Some(recipe) = self.state.recipe() else {
            tracing::debug!("no recipe loaded, nothing to add to the list");
            return 0;
        };
        let ingredients = recipe.ingredients.clone();
        let list = self.state.list_mut();
        for ingredient in &ingredients {
            let item = list.add_item(ingredient.count, &ingredient.unit, &ingredient.ingredient);
            self.view.render_list_item(&item);
        }
        ingredients.len()
    }

    pub fn delete_list_item(&mut self, id: &str) {
        match self.state.list_mut().delete_item(id) {
            Some(_) => self.view.delete_list_item(id),
            None => tracing::warn!(id, "no shopping list item with this id"),
        }
    }

    pub fn update_list_count(&mut self, id: &str, input: &str) {
        let count = match input.trim().parse::<f64>() {
            Ok(count) if count.is_finite() => count,
            _ => {
                tracing::warn!(id, input, "ignoring non-numeric count");
                return;
            }
        };
        if self.state.list_mut().update_count(id, count).is_none() {
            tracing::warn!(id, "no shopping list item with this id");
        }
    }

    pub fn show_list(&mut self) {
        let items = self.state.list().map(|l| l.items()).unwrap_or_default();
        self.view.render_list(items);
    }

    pub fn clear_list(&mut self) {
        self.state.clear_list();
        self.view.render_list(&[]);
    }

    // LIKES

    /// Rehydrate likes from storage and render them. Runs once at start-up.
    pub fn load_likes(&mut self) {
        self.state.likes_mut().read_storage();
        self.show_likes();
    }

    pub fn show_likes(&mut self) {
        let likes = self.state.likes();
        self.view.toggle_like_menu(likes.num_likes());
        for like in likes.likes() {
            self.view.render_like(like);
        }
    }

    pub fn toggle_like(&mut self) {
        let Some(recipe) = self.state.recipe() else {
            tracing::debug!("no recipe loaded, nothing to like");
            return;
        };
        let id = recipe.id.clone();
        let title = recipe.title.clone();
        let author = recipe.author.clone();
        let image = recipe.image.clone();

        let likes = self.state.likes_mut();
        if !likes.is_liked(&id) {
            let like = likes.add_like(&id, &title, &author, &image);
            self.view.toggle_like_btn(true);
            self.view.render_like(&like);
        } else {
            likes.delete_like(&id);
            self.view.toggle_like_btn(false);
            self.view.delete_like(&id);
        }
        self.view.toggle_like_menu(self.state.likes().num_likes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageButtons;
    use crate::state::RecipeSlot;
    use crate::storage::MemoryLikesStore;
    use crate::testing::{FakeApi, RecordingView, ViewEvent};
    use std::sync::atomic::Ordering;

    const OPTIONS: ControllerOptions = ControllerOptions {
        page_size: 10,
        default_servings: 4,
    };

    fn pizza_api() -> FakeApi {
        FakeApi::default()
            .with_search("pizza", 25)
            .with_search("pasta", 3)
            .with_recipe("X", &["4 cups flour", "2 tsp salt", "tsp sugar", "3 eggs"])
            .with_recipe("Y", &["1 cup water"])
            .with_recipe("broken", &["fresh basil 1 tbsp"])
    }

    fn controller_with(api: Arc<FakeApi>, store: &MemoryLikesStore) -> Controller<RecordingView> {
        let mut likes = Likes::new(Box::new(store.clone()));
        likes.read_storage();
        Controller::new(api, likes, RecordingView::default(), OPTIONS)
    }

    fn controller() -> Controller<RecordingView> {
        controller_with(Arc::new(pizza_api()), &MemoryLikesStore::new())
    }

    fn ids(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|i| format!("{prefix}-{i}")).collect()
    }

    #[tokio::test]
    async fn empty_query_is_a_no_op() {
        let mut c = controller();
        c.control_search("   ").await;
        assert!(c.state().search().is_none());
        assert!(c.view().events.is_empty());
    }

    #[tokio::test]
    async fn search_clears_before_rendering_first_page() {
        let mut c = controller();
        c.control_search("pasta").await;
        c.view_mut().take();

        c.control_search("  pizza ").await;
        let events = c.view_mut().take();
        assert_eq!(
            events,
            vec![
                ViewEvent::ClearInput,
                ViewEvent::ClearResults,
                ViewEvent::Loader(Area::Results),
                ViewEvent::ClearLoader,
                ViewEvent::Results {
                    ids: ids("pizza", 0..10),
                    page: 1,
                    buttons: PageButtons { prev: None, next: Some(2) },
                },
            ]
        );
        assert_eq!(c.state().search().unwrap().query, "pizza");
    }

    #[tokio::test]
    async fn paging_does_not_refetch() {
        let api = Arc::new(pizza_api());
        let mut c = controller_with(api.clone(), &MemoryLikesStore::new());
        c.control_search("pizza").await;
        c.view_mut().take();

        c.go_to_page(2);
        assert_eq!(
            c.view_mut().take(),
            vec![
                ViewEvent::ClearResults,
                ViewEvent::Results {
                    ids: ids("pizza", 10..20),
                    page: 2,
                    buttons: PageButtons { prev: Some(1), next: Some(3) },
                },
            ]
        );
        assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);

        c.go_to_page(4);
        c.go_to_page(0);
        assert!(c.view().events.is_empty());
    }

    #[test]
    fn paging_without_a_search_is_a_no_op() {
        let mut c = controller();
        c.go_to_page(1);
        c.go_to_page(2);
        assert!(c.view().events.is_empty());
        assert!(c.state().search().is_none());
    }

    #[tokio::test]
    async fn failed_search_clears_loader_and_renders_nothing() {
        let mut c = controller();
        c.control_search("unknown").await;
        let events = c.view_mut().take();
        assert_eq!(events.last(), Some(&ViewEvent::ClearLoader));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::Results { .. })));
        assert!(c.state().search().unwrap().results.is_empty());
    }

    #[tokio::test]
    async fn navigation_renders_recipe_with_derived_fields() {
        let mut c = controller();
        c.control_search("pizza").await;
        c.view_mut().take();

        c.control_recipe("#X").await;
        let events = c.view_mut().take();
        assert_eq!(events[0], ViewEvent::ClearRecipe);
        assert_eq!(events[1], ViewEvent::Loader(Area::Recipe));
        assert_eq!(events[2], ViewEvent::Highlight("X".into()));
        assert_eq!(
            events.last(),
            Some(&ViewEvent::Recipe {
                id: "X".into(),
                servings: 4,
                counts: vec![Some(4.0), Some(2.0), None, Some(3.0)],
                liked: false,
            })
        );
        assert_eq!(c.state().recipe().unwrap().time, 30);
    }

    #[tokio::test]
    async fn no_highlight_without_search_and_empty_fragment_ignored() {
        let mut c = controller();
        c.control_recipe("#").await;
        assert!(c.view().events.is_empty());

        c.control_recipe("Y").await;
        assert!(!c.view().events.iter().any(|e| matches!(e, ViewEvent::Highlight(_))));
    }

    #[tokio::test]
    async fn recipe_failure_alerts_without_rendering() {
        let mut c = controller();
        c.control_recipe("broken").await;
        let events = c.view_mut().take();
        assert_eq!(events.last(), Some(&ViewEvent::Alert(RECIPE_ALERT.into())));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::Recipe { .. })));
        assert_eq!(c.state().recipe_slot(), &RecipeSlot::Errored { id: "broken".into() });

        c.control_recipe("missing").await;
        assert_eq!(c.view_mut().take().last(), Some(&ViewEvent::Alert(RECIPE_ALERT.into())));
    }

    #[tokio::test]
    async fn increasing_servings_scales_by_five_quarters() {
        let mut c = controller();
        c.control_recipe("X").await;
        c.view_mut().take();

        c.update_servings(ServingsChange::Increase);
        assert_eq!(
            c.view_mut().take(),
            vec![ViewEvent::Servings {
                servings: 5,
                counts: vec![Some(5.0), Some(2.5), None, Some(3.75)],
            }]
        );
    }

    #[tokio::test]
    async fn servings_never_drop_below_one() {
        let mut c = controller();
        c.control_recipe("Y").await;
        for _ in 0..3 {
            c.update_servings(ServingsChange::Decrease);
        }
        assert_eq!(c.state().recipe().unwrap().servings, 1);
        c.view_mut().take();

        c.update_servings(ServingsChange::Decrease);
        assert!(c.view().events.is_empty());
        assert_eq!(c.state().recipe().unwrap().servings, 1);
        assert_eq!(c.state().recipe().unwrap().ingredients[0].count, Some(0.25));
    }

    #[tokio::test]
    async fn set_servings_rescales_once_with_floor() {
        let mut c = controller();
        c.control_recipe("X").await;
        c.view_mut().take();

        c.set_servings(2);
        assert_eq!(
            c.view_mut().take(),
            vec![ViewEvent::Servings {
                servings: 2,
                counts: vec![Some(2.0), Some(1.0), None, Some(1.5)],
            }]
        );
        c.set_servings(0);
        assert_eq!(c.state().recipe().unwrap().servings, 1);
        c.view_mut().take();
        c.set_servings(1);
        assert!(c.view().events.is_empty());
    }

    #[tokio::test]
    async fn list_add_duplicates_and_delete_removes_one() {
        let mut c = controller();
        assert_eq!(c.add_recipe_to_list(), 0);

        c.control_recipe("X").await;
        assert_eq!(c.add_recipe_to_list(), 4);
        assert_eq!(c.add_recipe_to_list(), 4);
        let list = c.state().list().unwrap();
        assert_eq!(list.items().len(), 8);

        let ids: Vec<String> = list.items().iter().map(|i| i.id.clone()).collect();
        c.view_mut().take();
        c.delete_list_item(&ids[3]);
        assert_eq!(c.view_mut().take(), vec![ViewEvent::DeleteListItem(ids[3].clone())]);

        let remaining: Vec<String> =
            c.state().list().unwrap().items().iter().map(|i| i.id.clone()).collect();
        let mut expected = ids.clone();
        expected.remove(3);
        assert_eq!(remaining, expected);

        c.delete_list_item("missing");
        assert!(c.view().events.is_empty());
    }

    #[tokio::test]
    async fn list_count_edit_parses_numbers_only() {
        let mut c = controller();
        c.control_recipe("Y").await;
        c.add_recipe_to_list();
        let id = c.state().list().unwrap().items()[0].id.clone();

        c.update_list_count(&id, " 2.5 ");
        assert_eq!(c.state().list().unwrap().items()[0].count, Some(2.5));

        c.update_list_count(&id, "lots");
        assert_eq!(c.state().list().unwrap().items()[0].count, Some(2.5));
    }

    #[tokio::test]
    async fn like_toggle_is_involutive_and_persisted() {
        let store = MemoryLikesStore::new();
        let mut c = controller_with(Arc::new(pizza_api()), &store);
        c.control_recipe("X").await;
        c.view_mut().take();

        c.toggle_like();
        assert_eq!(
            c.view_mut().take(),
            vec![
                ViewEvent::LikeButton(true),
                ViewEvent::Like("X".into()),
                ViewEvent::LikeMenu(1),
            ]
        );
        assert!(store.raw().unwrap().contains("\"X\""));

        c.toggle_like();
        assert_eq!(
            c.view_mut().take(),
            vec![
                ViewEvent::LikeButton(false),
                ViewEvent::DeleteLike("X".into()),
                ViewEvent::LikeMenu(0),
            ]
        );
        assert_eq!(c.state().likes().num_likes(), 0);
        assert_eq!(store.raw().unwrap(), "[]");
    }

    #[tokio::test]
    async fn liked_recipe_survives_reload() {
        let store = MemoryLikesStore::new();
        let mut first = controller_with(Arc::new(pizza_api()), &store);
        first.control_recipe("X").await;
        first.toggle_like();

        let api = Arc::new(pizza_api());
        let mut c = Controller::new(
            api,
            Likes::new(Box::new(store.clone())),
            RecordingView::default(),
            OPTIONS,
        );
        c.load_likes();
        assert_eq!(
            c.view_mut().take(),
            vec![ViewEvent::LikeMenu(1), ViewEvent::Like("X".into())]
        );

        c.control_recipe("X").await;
        assert!(matches!(
            c.view().events.last(),
            Some(ViewEvent::Recipe { liked: true, .. })
        ));
    }

    #[tokio::test]
    async fn stale_completions_are_dropped() {
        let mut c = controller();
        let old = c.begin_search("pizza").unwrap();
        let new = c.begin_search("pasta").unwrap();
        c.finish_search(new.ticket, Ok(vec![]));
        c.view_mut().take();

        c.finish_search(old.ticket, Ok(vec![]));
        assert!(c.view().events.is_empty());

        let old = c.begin_recipe("X").unwrap();
        let new = c.begin_recipe("Y").unwrap();
        let raw_x = c.api().recipe("X").unwrap();
        c.finish_recipe(old.ticket, Ok(raw_x));
        assert!(matches!(c.state().recipe_slot(), RecipeSlot::Loading { id, .. } if id == "Y"));

        let raw_y = c.api().recipe("Y").unwrap();
        c.finish_recipe(new.ticket, Ok(raw_y));
        assert_eq!(c.state().recipe().unwrap().id, "Y");
    }
}
