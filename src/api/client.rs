//! Recipe API Client
//!
//! Talks to a forkify-style recipe service:
//! - `GET {base}/search?q=<query>` for recipe summaries
//! - `GET {base}/get?rId=<id>` for full recipe detail

use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::{RawRecipe, RecipeSummary};

/// Source of recipe data.
pub trait RecipeApi: Send + Sync {
    fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>>;
    fn recipe(&self, id: &str) -> AppResult<RawRecipe>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Blocking HTTP client for the recipe API
pub struct RecipeClient {
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Failure { error: String },
    Success(T),
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    recipes: Vec<ApiSummary>,
}

#[derive(Debug, Deserialize)]
struct ApiSummary {
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct RecipeBody {
    recipe: ApiRecipe,
}

#[derive(Debug, Deserialize)]
struct ApiRecipe {
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
}

impl From<ApiSummary> for RecipeSummary {
    fn from(s: ApiSummary) -> Self {
        Self {
            id: s.recipe_id,
            title: s.title,
            author: s.publisher,
            image: s.image_url,
        }
    }
}

impl From<ApiRecipe> for RawRecipe {
    fn from(r: ApiRecipe) -> Self {
        Self {
            id: r.recipe_id,
            title: r.title,
            author: r.publisher,
            image: r.image_url,
            url: r.source_url,
            ingredients: r.ingredients,
        }
    }
}

impl RecipeClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, param: (&str, &str)) -> AppResult<String> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, param = param.1, "recipe API request");

        let response = match self.agent.get(&url).query(param.0, param.1).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response
                    .into_string()
                    .ok()
                    .and_then(|body| error_message(&body))
                    .unwrap_or_else(|| "no details".to_string());
                return Err(AppError::Api(format!("HTTP {code} from {path}: {detail}")));
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(AppError::Network(format!("Failed to reach {url}: {e}")));
            }
        };

        response
            .into_string()
            .map_err(|e| AppError::Network(format!("Failed to read response: {e}")))
    }
}

impl RecipeApi for RecipeClient {
    fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>> {
        let body = self.get("search", ("q", query))?;
        parse_search_body(&body)
    }

    fn recipe(&self, id: &str) -> AppResult<RawRecipe> {
        let body = self.get("get", ("rId", id))?;
        parse_recipe_body(&body)
    }
}

fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(Envelope::Failure { error }) => Some(error),
        _ => None,
    }
}

pub fn parse_search_body(body: &str) -> AppResult<Vec<RecipeSummary>> {
    match serde_json::from_str::<Envelope<SearchBody>>(body)? {
        Envelope::Failure { error } => Err(AppError::Api(error)),
        Envelope::Success(found) => Ok(found.recipes.into_iter().map(Into::into).collect()),
    }
}

pub fn parse_recipe_body(body: &str) -> AppResult<RawRecipe> {
    match serde_json::from_str::<Envelope<RecipeBody>>(body)? {
        Envelope::Failure { error } => Err(AppError::Api(error)),
        Envelope::Success(found) => Ok(found.recipe.into()),
    }
}

/// Helper function to create a client from a user-supplied base URL
pub fn create_recipe_client(base_url: &str, timeout: Duration) -> RecipeClient {
    let base_url = if base_url.starts_with("http") {
        base_url.to_string()
    } else {
        format!("https://{}", base_url)
    };

    RecipeClient::new(ClientConfig { base_url, timeout })
}
