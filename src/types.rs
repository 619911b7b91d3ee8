use serde::{Deserialize, Serialize};

/// Abbreviated recipe shown in search results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
}

/// Recipe as returned by the API, before any derived fields are computed.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub url: String,
    pub ingredients: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// `None` when a unit appears without a leading quantity.
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    #[serde(default)]
    pub liked_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServingsChange {
    Increase,
    Decrease,
}
