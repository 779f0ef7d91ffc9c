use super::insert_watchlist_entry;
use crate::routes::media::fetch_cached_media_by_id;
use crate::tmdb::MediaType;
use crate::util::ResponseMessage;
use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

#[derive(Deserialize, Debug)]
pub struct WatchlistPayload {
    pub tmdb_id: i32,
    pub media_type: MediaType,
}

/// Copies a cached row into the watch list. Only cached media can be
/// saved, the watch list never stores records the cache does not know.
pub async fn save_to_watchlist(
    connection: Data<PgPool>,
    body: Json<WatchlistPayload>,
) -> HttpResponse {
    let query_span = tracing::info_span!("Watch list save", ?body);

    let record = match fetch_cached_media_by_id(
        connection.as_ref(),
        body.tmdb_id,
        body.media_type,
        query_span.clone(),
    )
    .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::info!("Media {} is not in the cache", body.tmdb_id);
            return HttpResponse::NotFound().json(json!({
                "error": "media not found in cache"
            }));
        }
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            return HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }));
        }
    };

    match insert_watchlist_entry(connection.as_ref(), &record, query_span).await {
        Ok(true) => HttpResponse::Ok().json(ResponseMessage::new("Saved to watch list")),
        Ok(false) => HttpResponse::Ok().json(ResponseMessage::new("Already in watch list")),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
