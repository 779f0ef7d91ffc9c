use dotenv::dotenv;
use moviedeck_backend::configuration::get_configuration;
use moviedeck_backend::routes::spawn_import_schedule;
use moviedeck_backend::startup;
use moviedeck_backend::telemetry::{get_subscriber, init_subscriber};
use moviedeck_backend::tmdb::TmdbClient;
use moviedeck_backend::util::check_for_necessary_env;
use sqlx::PgPool;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    check_for_necessary_env();

    let subscriber = get_subscriber("info", std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration("configuration").map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            "Failed to read `configuration.json`. Please make sure it exists and is valid JSON."
                .to_string(),
        )
    })?;

    let listener = TcpListener::bind(format!("0.0.0.0:{}", configuration.application_port))?;
    let connection_pool = PgPool::connect(configuration.database.connection_string().as_str())
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    let auth_token =
        std::env::var("MOVIE_DB_AUTH_TOKEN").expect("MOVIE_DB_AUTH_TOKEN must be set");
    let tmdb_client = TmdbClient::new(configuration.tmdb.clone(), auth_token);

    spawn_import_schedule(
        connection_pool.clone(),
        tmdb_client.clone(),
        configuration.import.clone(),
    );

    startup::run_server(
        listener,
        connection_pool,
        tmdb_client,
        configuration.import,
    )?
    .await
}
