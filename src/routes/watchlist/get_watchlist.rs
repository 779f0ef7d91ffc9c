use super::fetch_watchlist_entries;
use actix_web::{web::Data, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

pub async fn get_watchlist(connection: Data<PgPool>) -> HttpResponse {
    let query_span = tracing::info_span!("Watch list fetch");

    match fetch_watchlist_entries(connection.as_ref(), query_span).await {
        Ok(records) => HttpResponse::Ok().json(json!({
            "data": records
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
