use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub school: SchoolConfig,
    #[serde(default)]
    pub mailer: MailerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub uploads_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchoolConfig {
    /// Full name, used in document headers and acceptance mail.
    pub name: String,
    /// Compact name used in export filenames.
    pub short_name: String,
    pub student_id_prefix: String,
    pub default_region: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MailerConfig {
    #[serde(default)]
    pub enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.base_url", "http://localhost:3000")?
            .set_default("server.uploads_dir", "public/uploads")?
            .set_default("database.url", "sqlite://schoolhouse.db")?
            .set_default("database.max_connections", 10)?
            .set_default("school.name", "Ebegrace Zion Academy")?
            .set_default("school.short_name", "EbegraceZion")?
            .set_default("school.student_id_prefix", "EZ")?
            .set_default("school.default_region", "Greater Accra")?
            .set_default("mailer.enabled", false)?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Environment variables (SCHOOLHOUSE__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("SCHOOLHOUSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                base_url: "http://localhost:3000".to_string(),
                uploads_dir: "public/uploads".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://schoolhouse.db".to_string(),
                max_connections: 10,
            },
            school: SchoolConfig {
                name: "Ebegrace Zion Academy".to_string(),
                short_name: "EbegraceZion".to_string(),
                student_id_prefix: "EZ".to_string(),
                default_region: "Greater Accra".to_string(),
            },
            mailer: MailerConfig::default(),
        }
    }
}
