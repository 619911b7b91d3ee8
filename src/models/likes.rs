use chrono::Utc;

use crate::storage::LikesStore;
use crate::types::Like;

/// Liked recipes, mirrored to the injected store after every mutation.
pub struct Likes {
    likes: Vec<Like>,
    store: Box<dyn LikesStore>,
}

impl Likes {
    pub fn new(store: Box<dyn LikesStore>) -> Self {
        Self {
            likes: Vec::new(),
            store,
        }
    }

    /// Replace the in-memory collection with whatever the store holds.
    pub fn read_storage(&mut self) {
        match self.store.load() {
            Ok(Some(likes)) => {
                tracing::debug!(count = likes.len(), "restored likes from storage");
                self.likes = likes;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "could not read stored likes"),
        }
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    pub fn add_like(&mut self, id: &str, title: &str, author: &str, image: &str) -> Like {
        if let Some(existing) = self.likes.iter().find(|l| l.id == id) {
            return existing.clone();
        }
        let like = Like {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            image: image.to_string(),
            liked_at: Utc::now().to_rfc3339(),
        };
        self.likes.push(like.clone());
        self.persist();
        like
    }

    pub fn delete_like(&mut self, id: &str) -> Option<Like> {
        let index = self.likes.iter().position(|l| l.id == id)?;
        let removed = self.likes.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|l| l.id == id)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.likes) {
            tracing::warn!(error = %e, "could not persist likes");
        }
    }
}
