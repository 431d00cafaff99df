//! Persisted favorites store.

use bevy::prelude::*;

use super::id_set::IdSet;

/// Liked wallpaper IDs, written through to the `favorites.json`
/// record on every mutation and rehydrated once at startup.
#[derive(Resource, Default)]
pub struct Favorites {
    set: IdSet,
}

impl Favorites {
    pub(super) fn replace(&mut self, set: IdSet) {
        self.set = set;
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.has(id)
    }

    pub fn toggle(&mut self, id: &str) {
        self.set.toggle(id);
    }

    pub fn list(&self) -> Vec<String> {
        self.set.list()
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Startup system rehydrating favorites from the persisted record.
pub fn load_favorites(mut favorites: ResMut<Favorites>) {
    favorites.replace(IdSet::load_or_default(crate::paths::favorites_file()));
    info!("favorites loaded: {} wallpapers", favorites.len());
}
