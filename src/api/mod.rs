pub mod client;

use std::sync::Arc;

pub use client::{RecipeApi, create_recipe_client};

use crate::error::{AppError, AppResult};
use crate::types::{RawRecipe, RecipeSummary};

/// Run a search on the blocking pool so the event loop stays responsive.
pub async fn fetch_search(api: Arc<dyn RecipeApi>, query: String) -> AppResult<Vec<RecipeSummary>> {
    tokio::task::spawn_blocking(move || api.search(&query))
        .await
        .map_err(|e| AppError::Other(format!("spawn_blocking failed: {e}")))?
}

pub async fn fetch_recipe(api: Arc<dyn RecipeApi>, id: String) -> AppResult<RawRecipe> {
    tokio::task::spawn_blocking(move || api.recipe(&id))
        .await
        .map_err(|e| AppError::Other(format!("spawn_blocking failed: {e}")))?
}
