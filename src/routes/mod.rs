pub mod hello_world;
pub mod import;
pub mod media;
pub mod watchlist;

pub use hello_world::*;
pub use import::*;
pub use media::*;
pub use watchlist::*;
