//! Current selection of wallpapers for batch actions.

use bevy::prelude::*;

use super::id_set::IdSet;

/// Wallpapers the user has checked for a batch action (e.g. download
/// all). Process-lifetime only; cleared on restart by construction.
#[derive(Resource, Default)]
pub struct WallsCart {
    set: IdSet,
}

impl WallsCart {
    pub fn is_selected(&self, id: &str) -> bool {
        self.set.has(id)
    }

    pub fn add(&mut self, id: &str) {
        self.set.add(id);
    }

    pub fn remove(&mut self, id: &str) {
        self.set.remove(id);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_selection_round_trip() {
        let mut cart = WallsCart::default();
        cart.add("a");
        cart.add("b");
        assert!(cart.is_selected("a"));
        assert_eq!(cart.len(), 2);

        cart.remove("a");
        assert!(!cart.is_selected("a"));

        cart.clear();
        assert!(cart.is_empty());
    }
}
