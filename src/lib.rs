pub mod configuration;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod tmdb;
pub mod util;
