use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::controller::ControllerOptions;
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::models::recipe::DEFAULT_SERVINGS;
use crate::models::search::DEFAULT_PAGE_SIZE;
use crate::storage::FileLikesStore;

pub const DEFAULT_API_URL: &str = "https://forkify-api.herokuapp.com/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const MAX_DEFAULT_SERVINGS: u32 = 1000;

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search recipes and print one page of results
    Search {
        /// Free-text query, e.g. "pizza"
        query: String,
        /// 1-based page of results to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a recipe with its ingredients
    Recipe {
        /// Recipe id, with or without a leading '#'
        id: String,
        /// Rescale the ingredients to this many servings
        #[arg(long)]
        servings: Option<u32>,
    },
    /// List liked recipes
    Likes,
    /// Like a recipe, or unlike it if it is already liked
    Like {
        /// Recipe id, with or without a leading '#'
        id: String,
    },
    /// Interactive session with search, shopping list and likes
    Shell {
        /// Recipe to open on start-up, e.g. "#47746"
        #[arg(long)]
        open: Option<String>,
    },
    /// Show the resolved configuration
    Status,
    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct Settings {
    /// Base URL of the recipe API
    #[arg(long, env = "RECIPE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Search results per page
    #[arg(long, env = "RECIPE_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Storage file for liked recipes (defaults to ~/.recipe-finder/storage.json)
    #[arg(long, env = "RECIPE_LIKES_FILE", global = true)]
    pub likes_file: Option<PathBuf>,

    /// Keep likes in memory only
    #[arg(long, env = "RECIPE_NO_PERSIST", default_value_t = false, global = true)]
    pub no_persist: bool,

    /// HTTP timeout in seconds
    #[arg(long, env = "RECIPE_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS, global = true)]
    pub http_timeout_secs: u64,

    /// Servings a freshly loaded recipe starts with
    #[arg(long, env = "RECIPE_DEFAULT_SERVINGS", default_value_t = DEFAULT_SERVINGS, global = true)]
    pub default_servings: u32,
}

impl Settings {
    #[cfg(test)]
    pub fn default_settings() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            likes_file: None,
            no_persist: false,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            default_servings: DEFAULT_SERVINGS,
        }
    }

    /// Validate CLI/environment-derived settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.trim().is_empty() {
            return Err("RECIPE_API_URL cannot be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("RECIPE_PAGE_SIZE must be at least 1".to_string());
        }
        if self.http_timeout_secs == 0 {
            return Err("RECIPE_HTTP_TIMEOUT_SECS must be at least 1".to_string());
        }
        if self.default_servings == 0 || self.default_servings > MAX_DEFAULT_SERVINGS {
            return Err(format!(
                "RECIPE_DEFAULT_SERVINGS must be between 1 and {MAX_DEFAULT_SERVINGS}"
            ));
        }
        if !self.no_persist && self.likes_path().is_none() {
            return Err(
                "No home directory found; set RECIPE_LIKES_FILE or RECIPE_NO_PERSIST".to_string(),
            );
        }
        Ok(())
    }

    /// Storage file in use, or `None` when likes are kept in memory.
    pub fn likes_path(&self) -> Option<PathBuf> {
        if self.no_persist {
            return None;
        }
        self.likes_file.clone().or_else(FileLikesStore::default_path)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            page_size: self.page_size,
            default_servings: self.default_servings,
        }
    }
}
