mod get_watchlist;
mod remove_from_watchlist;
mod save_to_watchlist;
mod util;

pub use get_watchlist::*;
pub use remove_from_watchlist::*;
pub use save_to_watchlist::*;
pub use util::*;

use actix_web::{web, Scope};

pub fn watchlist_source() -> Scope {
    web::scope("/watchlist")
        .route("", web::get().to(get_watchlist))
        .route("", web::post().to(save_to_watchlist))
        .route(
            "/{media_type}/{tmdb_id}",
            web::delete().to(remove_watchlist_entry),
        )
}
