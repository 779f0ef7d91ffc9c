use super::{fetch_cached_media, ListQuery};
use crate::tmdb::{MediaType, TmdbClient};
use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use serde_json::json;
use sqlx::PgPool;

/// Popular movies, or a title search when `query` is present. An empty
/// remote page (including remote failure) falls through to the cache.
pub async fn get_movie_list(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    info: Query<ListQuery>,
) -> HttpResponse {
    let query_span = tracing::info_span!("Movie list request");
    let page = info.page.unwrap_or(1).max(1);
    let search_term = info.query.as_deref().unwrap_or("").trim().to_string();

    let remote = if search_term.is_empty() {
        tmdb.popular_movies(page, info.genre_id).await
    } else {
        tmdb.search_movies(search_term.as_str(), page).await
    };

    if !remote.results.is_empty() {
        return HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": remote.total_pages,
                "results": remote.results
            },
            "source": "remote"
        }));
    }

    tracing::info!("Remote movie page is empty, serving from cache");
    // Cache rows carry no genre data, so genre_id only applies remotely.
    match fetch_cached_media(
        connection.as_ref(),
        Some(MediaType::Movie),
        page,
        false,
        query_span,
    )
    .await
    {
        Ok(records) => HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": 0,
                "results": records
            },
            "source": "cache"
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}

/// Now-playing flavor of the movie list. The cache fallback keeps only
/// rows whose release date is today or later.
pub async fn get_now_playing_movies(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    info: Query<ListQuery>,
) -> HttpResponse {
    let query_span = tracing::info_span!("Now playing list request");
    let page = info.page.unwrap_or(1).max(1);
    let search_term = info.query.as_deref().unwrap_or("").trim().to_string();

    let remote = if search_term.is_empty() {
        tmdb.now_playing_movies(page, info.genre_id).await
    } else {
        tmdb.search_movies(search_term.as_str(), page).await
    };

    if !remote.results.is_empty() {
        return HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": remote.total_pages,
                "results": remote.results
            },
            "source": "remote"
        }));
    }

    tracing::info!("Remote now-playing page is empty, serving from cache");
    match fetch_cached_media(
        connection.as_ref(),
        Some(MediaType::Movie),
        page,
        true,
        query_span,
    )
    .await
    {
        Ok(records) => HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": 0,
                "results": records
            },
            "source": "cache"
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
