use super::delete_watchlist_entry;
use crate::tmdb::MediaType;
use crate::util::ResponseMessage;
use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use serde_json::json;
use sqlx::PgPool;

pub async fn remove_watchlist_entry(
    connection: Data<PgPool>,
    path: Path<(MediaType, i32)>,
) -> HttpResponse {
    let (media_type, tmdb_id) = path.into_inner();
    let query_span = tracing::info_span!("Watch list remove", tmdb_id, %media_type);

    match delete_watchlist_entry(connection.as_ref(), tmdb_id, media_type, query_span).await {
        Ok(0) => HttpResponse::NotFound().json(json!({
            "error": "media not in watch list"
        })),
        Ok(_) => HttpResponse::Ok().json(ResponseMessage::new("Removed from watch list")),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
