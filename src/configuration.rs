use config::{Config, File, FileFormat};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application_port: u16,
    pub tmdb: TmdbSettings,
    pub import: ImportSettings,
}

#[derive(Deserialize)]
pub struct DatabaseSettings {
    pub user_name: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Deserialize, Clone)]
pub struct TmdbSettings {
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
}

#[derive(Deserialize, Clone)]
pub struct ImportSettings {
    pub page: u32,
    pub interval_minutes: u64,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user_name, self.password, self.host, self.port, self.database_name
        )
    }
}

pub fn get_configuration(filename: &str) -> Result<Settings, config::ConfigError> {
    let mut builder = Config::builder();
    builder = builder.add_source(File::new(filename, FileFormat::Json));
    let config = builder.build()?;
    config.try_deserialize()
}
