use super::fetch_cached_media_by_id;
use crate::tmdb::{MediaType, TmdbClient};
use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use serde_json::json;
use sqlx::PgPool;

pub async fn get_movie_detail(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    path: Path<i32>,
) -> HttpResponse {
    let tmdb_id = path.into_inner();
    detail_response(&connection, &tmdb, tmdb_id, MediaType::Movie).await
}

pub async fn get_tv_detail(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    path: Path<i32>,
) -> HttpResponse {
    let tmdb_id = path.into_inner();
    detail_response(&connection, &tmdb, tmdb_id, MediaType::Tv).await
}

/// Remote detail first (credits and videos appended, image paths made
/// absolute), cached row second, 404 when neither side knows the id.
async fn detail_response(
    connection: &PgPool,
    tmdb: &TmdbClient,
    tmdb_id: i32,
    media_type: MediaType,
) -> HttpResponse {
    let query_span = tracing::info_span!("Media detail lookup", tmdb_id, %media_type);

    let remote = match media_type {
        MediaType::Movie => tmdb.movie_details(tmdb_id).await,
        MediaType::Tv => tmdb.tv_details(tmdb_id).await,
    };
    if let Some(detail) = remote {
        return HttpResponse::Ok().json(json!({
            "data": detail,
            "source": "remote"
        }));
    }

    tracing::info!("Remote detail lookup failed, trying the cache");
    match fetch_cached_media_by_id(connection, tmdb_id, media_type, query_span).await {
        Ok(Some(record)) => HttpResponse::Ok().json(json!({
            "data": record,
            "source": "cache"
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "media not found"
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
