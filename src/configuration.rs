use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub wikipedia: WikipediaSettings,
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    pub import: ImportSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = match self.require_ssl {
            true => PgSslMode::Require,
            false => PgSslMode::Prefer,
        };

        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

#[derive(Deserialize, Clone)]
pub struct WikipediaSettings {
    pub api_url: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct AdminSettings {
    #[serde(default)]
    pub accounts: Vec<AdminAccount>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AdminAccount {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

#[derive(Deserialize, Clone, Copy)]
pub struct ImportSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_upload_bytes: usize,
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Falls back to `local` when `APP_ENVIRONMENT` is unset.
fn parse_environment(value: Option<String>) -> Result<Environment, config::ConfigError> {
    value
        .unwrap_or_else(|| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment = parse_environment(std::env::var("APP_ENVIRONMENT").ok())?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_APPLICATION__PORT=5001 sets Settings.application.port
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("gemini.api_key", std::env::var("GEMINI_API_KEY").ok())?
        .set_override_option("gemini.model", std::env::var("GEMINI_MODEL").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::{parse_environment, Environment};

    #[test]
    fn environment_parses_case_insensitively() {
        let env: Environment = "Production".to_string().try_into().unwrap();
        assert_eq!(env.as_str(), "production");
    }

    #[test]
    fn environment_rejects_unknown_names() {
        let env: Result<Environment, String> = "staging".to_string().try_into();
        assert!(env.is_err());
    }

    #[test]
    fn unset_environment_defaults_to_local_and_bad_values_are_errors() {
        assert_eq!(parse_environment(None).unwrap().as_str(), "local");

        let err = parse_environment(Some("staging".to_string())).unwrap_err();
        assert!(matches!(err, config::ConfigError::Message(ref m) if m.contains("staging")));
    }
}
