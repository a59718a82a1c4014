use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub token_ttl_minutes: i64,
}

impl JwtConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__GRPC_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Self::environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    // Example: JWT__TOKEN_TTL_MINUTES=15 overrides jwt.token_ttl_minutes
    fn environment() -> Environment {
        Environment::default().separator("__").try_parsing(true)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.token_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.token_ttl_minutes must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token_ttl_minutes: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/sso".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { grpc_port: 44044 },
            jwt: JwtConfig { token_ttl_minutes },
        }
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(config(90).jwt.token_ttl(), chrono::Duration::minutes(90));
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        assert!(config(60).validate().is_ok());
        assert!(config(0).validate().is_err());
        assert!(config(-1).validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/sso"

                [server]
                grpc_port = 50051

                [jwt]
                token_ttl_minutes = 15
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.grpc_port, 50051);
        assert_eq!(config.jwt.token_ttl(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_environment_overrides_file() {
        let overrides: config::Map<String, String> = [
            ("DATABASE__URL", "postgresql://db.internal/sso"),
            ("JWT__TOKEN_TTL_MINUTES", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/sso"

                [server]
                grpc_port = 44044

                [jwt]
                token_ttl_minutes = 60
                "#,
                config::FileFormat::Toml,
            ))
            .add_source(Config::environment().source(Some(overrides)))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.database.url, "postgresql://db.internal/sso");
        assert_eq!(config.server.grpc_port, 44044);
        assert_eq!(config.jwt.token_ttl_minutes, 5);
    }
}
