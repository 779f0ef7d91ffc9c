use crate::tmdb::TmdbClient;
use actix_web::{web::Data, HttpResponse};
use serde_json::json;

pub async fn get_movie_genres(tmdb: Data<TmdbClient>) -> HttpResponse {
    let genres = tmdb.movie_genres().await;
    HttpResponse::Ok().json(json!({
        "data": genres
    }))
}

pub async fn get_tv_genres(tmdb: Data<TmdbClient>) -> HttpResponse {
    let genres = tmdb.tv_genres().await;
    HttpResponse::Ok().json(json!({
        "data": genres
    }))
}
