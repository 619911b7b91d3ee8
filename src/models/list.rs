use ulid::Ulid;

use crate::types::ListItem;

#[derive(Clone, Debug, Default)]
pub struct ShoppingList {
    items: Vec<ListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn add_item(&mut self, count: Option<f64>, unit: &str, ingredient: &str) -> ListItem {
        let item = ListItem {
            id: Ulid::new().to_string(),
            count,
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
        };
        self.items.push(item.clone());
        item
    }

    pub fn delete_item(&mut self, id: &str) -> Option<ListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn update_count(&mut self, id: &str, count: f64) -> Option<&ListItem> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.count = Some(count);
        Some(item)
    }
}
