use super::run_import;
use crate::configuration::ImportSettings;
use crate::tmdb::TmdbClient;
use actix_web::{web::Data, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

/// Manual trigger for the import job, the scheduler owns the regular runs.
pub async fn trigger_import(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    settings: Data<ImportSettings>,
) -> HttpResponse {
    match run_import(connection.as_ref(), tmdb.as_ref(), settings.page).await {
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "data": outcome
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
