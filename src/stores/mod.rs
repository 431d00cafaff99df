//! User-owned wallpaper ID sets: favorites and the selection cart.
//!
//! Both stores own their set exclusively; views read through them and
//! mutate only via their methods. Favorites persist across sessions,
//! the cart does not.

mod cart;
mod favorites;
mod id_set;

pub use cart::WallsCart;
pub use favorites::Favorites;
pub use id_set::IdSet;

use bevy::prelude::*;

pub struct StoresPlugin;

impl Plugin for StoresPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Favorites>()
            .init_resource::<WallsCart>()
            .add_systems(Startup, favorites::load_favorites);
    }
}
