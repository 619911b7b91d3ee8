use crate::error::AppResult;
use crate::models::ingredient::parse_ingredients;
use crate::types::{Ingredient, RawRecipe, ServingsChange};

pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes of preparation per started group of three ingredients.
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub url: String,
    pub ingredients: Vec<Ingredient>,
    /// Estimated time in minutes.
    pub time: u32,
    pub servings: u32,
}

pub fn calc_time(ingredient_count: usize) -> u32 {
    let periods = ingredient_count.div_ceil(INGREDIENTS_PER_PERIOD);
    periods as u32 * MINUTES_PER_PERIOD
}

impl RecipeDetail {
    /// Build the detail view model from an API recipe, parsing ingredients and
    /// computing the derived fields.
    pub fn from_raw(raw: RawRecipe, servings: u32) -> AppResult<Self> {
        let ingredients = parse_ingredients(&raw.ingredients)?;
        let time = calc_time(ingredients.len());
        Ok(Self {
            id: raw.id,
            title: raw.title,
            author: raw.author,
            image: raw.image,
            url: raw.url,
            ingredients,
            time,
            servings: servings.max(1),
        })
    }

    /// Step servings by one and rescale every ingredient count. The floor of
    /// one serving is the caller's responsibility.
    pub fn update_servings(&mut self, change: ServingsChange) -> u32 {
        let new_servings = match change {
            ServingsChange::Increase => self.servings.saturating_add(1),
            ServingsChange::Decrease => self.servings.saturating_sub(1),
        };
        self.scale_to(new_servings);
        new_servings
    }

    pub fn scale_to(&mut self, new_servings: u32) {
        if self.servings == 0 || new_servings == self.servings {
            self.servings = new_servings;
            return;
        }
        let (new, old) = (f64::from(new_servings), f64::from(self.servings));
        for ingredient in &mut self.ingredients {
            if let Some(count) = ingredient.count.as_mut() {
                *count = *count * new / old;
            }
        }
        self.servings = new_servings;
    }
}
