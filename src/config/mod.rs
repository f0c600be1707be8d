use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub trivia: TriviaConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub trivia_port: u16,
    pub coffee_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Base connection URL; the path is replaced by the per-service database name.
    /// When absent the services fall back to the in-memory store.
    pub url: Option<String>,
    pub trivia_db: String,
    pub coffee_db: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    pub questions_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<String>,
    /// Overrides `https://<domain>/.well-known/jwks.json`.
    pub jwks_url: Option<String>,
    /// Offline key set; takes precedence over any URL.
    pub jwks_file: Option<PathBuf>,
    pub jwks_fetch_attempts: u32,
    pub jwks_fetch_timeout_secs: u64,
}

impl AuthConfig {
    /// Issuer expected in the `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", self.domain))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("TRIVIA_PORT") {
            self.server.trivia_port = v.parse().unwrap_or(self.server.trivia_port);
        }
        if let Ok(v) = env::var("COFFEE_PORT") {
            self.server.coffee_port = v.parse().unwrap_or(self.server.coffee_port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("TRIVIA_DATABASE") {
            self.database.trivia_db = v;
        }
        if let Ok(v) = env::var("COFFEE_DATABASE") {
            self.database.coffee_db = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Trivia overrides
        if let Ok(v) = env::var("QUESTIONS_PER_PAGE") {
            self.trivia.questions_per_page = v
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .unwrap_or(self.trivia.questions_per_page);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH0_DOMAIN") {
            self.auth.domain = v;
        }
        if let Ok(v) = env::var("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("AUTH0_ALGORITHMS") {
            self.auth.algorithms = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("AUTH0_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH0_JWKS_FILE") {
            self.auth.jwks_file = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("AUTH0_JWKS_FETCH_ATTEMPTS") {
            self.auth.jwks_fetch_attempts = v
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .unwrap_or(self.auth.jwks_fetch_attempts);
        }
        if let Ok(v) = env::var("AUTH0_JWKS_FETCH_TIMEOUT_SECS") {
            self.auth.jwks_fetch_timeout_secs = v.parse().unwrap_or(self.auth.jwks_fetch_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                trivia_port: 5000,
                coffee_port: 5001,
            },
            database: DatabaseConfig {
                url: None,
                trivia_db: "trivia".to_string(),
                coffee_db: "coffee".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            auth: Self::default_auth(),
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                trivia_port: 5000,
                coffee_port: 5001,
            },
            database: DatabaseConfig {
                url: None,
                trivia_db: "trivia".to_string(),
                coffee_db: "coffee".to_string(),
                max_connections: 10,
                connection_timeout: 10,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            auth: Self::default_auth(),
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:8100".to_string(), "http://localhost:3000".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                trivia_port: 5000,
                coffee_port: 5001,
            },
            database: DatabaseConfig {
                url: None,
                trivia_db: "trivia".to_string(),
                coffee_db: "coffee".to_string(),
                max_connections: 20,
                connection_timeout: 5,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            auth: AuthConfig {
                jwks_fetch_timeout_secs: 5,
                ..Self::default_auth()
            },
            security: SecurityConfig { cors_origins: Vec::new() },
        }
    }

    fn default_auth() -> AuthConfig {
        AuthConfig {
            domain: "savestegge.eu.auth0.com".to_string(),
            audience: "https://coffee-api/".to_string(),
            algorithms: vec!["RS256".to_string()],
            jwks_url: None,
            jwks_file: None,
            jwks_fetch_attempts: 1,
            jwks_fetch_timeout_secs: 10,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
