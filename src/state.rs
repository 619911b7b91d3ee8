use crate::models::{Likes, RecipeDetail, SearchState, ShoppingList};
use crate::types::RecipeSummary;

/// Tags an in-flight fetch with the generation of the slot it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Lifecycle of the recipe view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RecipeSlot {
    #[default]
    Idle,
    Loading {
        id: String,
        ticket: Ticket,
    },
    Rendered(RecipeDetail),
    Errored {
        id: String,
    },
}

/// Application state. One value per slot, replaced wholesale by the
/// controllers and never shared outside the event loop.
pub struct AppState {
    search: Option<SearchState>,
    search_generation: u64,
    recipe: RecipeSlot,
    recipe_generation: u64,
    list: Option<ShoppingList>,
    likes: Likes,
}

impl AppState {
    pub fn new(likes: Likes) -> Self {
        Self {
            search: None,
            search_generation: 0,
            recipe: RecipeSlot::Idle,
            recipe_generation: 0,
            list: None,
            likes,
        }
    }

    // search slot

    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// Start a new search, dropping the previous one. Responses carrying an
    /// older ticket are refused from now on.
    pub fn replace_search(&mut self, query: &str) -> Ticket {
        self.search_generation += 1;
        self.search = Some(SearchState::new(query));
        Ticket(self.search_generation)
    }

    pub fn accept_search_results(
        &mut self,
        ticket: Ticket,
        results: Vec<RecipeSummary>,
    ) -> Option<&SearchState> {
        if ticket.0 != self.search_generation {
            return None;
        }
        let search = self.search.as_mut()?;
        search.results = results;
        Some(&*search)
    }

    pub fn is_current_search(&self, ticket: Ticket) -> bool {
        ticket.0 == self.search_generation && self.search.is_some()
    }

    pub fn clear_search(&mut self) {
        self.search_generation += 1;
        self.search = None;
    }

    // recipe slot

    #[cfg(test)]
    pub fn recipe_slot(&self) -> &RecipeSlot {
        &self.recipe
    }

    pub fn recipe(&self) -> Option<&RecipeDetail> {
        match &self.recipe {
            RecipeSlot::Rendered(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn recipe_mut(&mut self) -> Option<&mut RecipeDetail> {
        match &mut self.recipe {
            RecipeSlot::Rendered(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn begin_recipe(&mut self, id: &str) -> Ticket {
        self.recipe_generation += 1;
        let ticket = Ticket(self.recipe_generation);
        self.recipe = RecipeSlot::Loading {
            id: id.to_string(),
            ticket,
        };
        ticket
    }

    pub fn is_current_recipe(&self, ticket: Ticket) -> bool {
        matches!(&self.recipe, RecipeSlot::Loading { ticket: current, .. } if *current == ticket)
    }

    /// Settle a pending load with a parsed recipe. Refused when the ticket is
    /// stale.
    pub fn accept_recipe(&mut self, ticket: Ticket, recipe: RecipeDetail) -> Option<&RecipeDetail> {
        if !self.is_current_recipe(ticket) {
            return None;
        }
        self.recipe = RecipeSlot::Rendered(recipe);
        self.recipe()
    }

    /// Mark a pending load as failed. Returns the failed id, or `None` when
    /// the ticket is stale.
    pub fn fail_recipe(&mut self, ticket: Ticket) -> Option<&str> {
        let id = match &self.recipe {
            RecipeSlot::Loading { id, ticket: current } if *current == ticket => id.clone(),
            _ => return None,
        };
        self.recipe = RecipeSlot::Errored { id };
        match &self.recipe {
            RecipeSlot::Errored { id } => Some(id),
            _ => None,
        }
    }

    pub fn clear_recipe(&mut self) {
        self.recipe_generation += 1;
        self.recipe = RecipeSlot::Idle;
    }

    // list slot

    pub fn list(&self) -> Option<&ShoppingList> {
        self.list.as_ref()
    }

    /// The shopping list, created on first use.
    pub fn list_mut(&mut self) -> &mut ShoppingList {
        self.list.get_or_insert_with(ShoppingList::new)
    }

    pub fn clear_list(&mut self) {
        self.list = None;
    }

    // likes slot

    pub fn likes(&self) -> &Likes {
        &self.likes
    }

    pub fn likes_mut(&mut self) -> &mut Likes {
        &mut self.likes
    }
}
