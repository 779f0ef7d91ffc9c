mod genres;
mod list_movies;
mod list_tv;
mod media_detail;
mod suggestion;
mod util;

pub use genres::*;
pub use list_movies::*;
pub use list_tv::*;
pub use media_detail::*;
pub use suggestion::*;
pub use util::*;

use actix_web::{web, Scope};

pub fn media_source() -> Scope {
    web::scope("/media")
        .route("/movies", web::get().to(get_movie_list))
        .route("/movies/now-playing", web::get().to(get_now_playing_movies))
        .route("/movies/{tmdb_id}", web::get().to(get_movie_detail))
        .route("/tv", web::get().to(get_tv_list))
        .route("/tv/{tmdb_id}", web::get().to(get_tv_detail))
        .route("/genres/movie", web::get().to(get_movie_genres))
        .route("/genres/tv", web::get().to(get_tv_genres))
        .route("/suggestion", web::post().to(get_suggestion))
}
