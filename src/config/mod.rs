use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Upper bound on token lifetimes accepted from the environment or the CLI.
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 366;
/// Upper bound on the dashboard's "recent" window, in days.
pub const MAX_RECENT_WINDOW_DAYS: i64 = 3650;

const DEVELOPMENT_JWT_SECRET: &str = "portal-admin-development-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub dashboard: DashboardConfig,
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
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait when acquiring a connection.
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty means bearer tokens cannot be issued or accepted.
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How far back "recent" complaints and reports reach.
    pub recent_window_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the preset named by `APP_ENV` and applies overrides, reading
    /// every variable through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        override_parsed(&lookup, "SERVER_PORT", &mut self.server.port);

        // API overrides
        override_parsed(&lookup, "API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            let v = v.trim();
            self.database.url = (!v.is_empty()).then(|| v.to_string());
        }
        override_parsed(&lookup, "DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        override_parsed(&lookup, "DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);
        override_parsed(&lookup, "DATABASE_RUN_MIGRATIONS", &mut self.database.run_migrations);

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        override_bounded(
            &lookup,
            "JWT_EXPIRY_HOURS",
            1..=MAX_JWT_EXPIRY_HOURS,
            &mut self.security.jwt_expiry_hours,
        );

        // Dashboard overrides
        override_bounded(
            &lookup,
            "DASHBOARD_RECENT_WINDOW_DAYS",
            1..=MAX_RECENT_WINDOW_DAYS,
            &mut self.dashboard.recent_window_days,
        );

        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Copy safe to print: the signing secret and database credentials are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.security.jwt_secret.is_empty() {
            copy.security.jwt_secret = "********".to_string();
        }
        copy.database.url = copy.database.url.as_deref().map(redact_url_credentials);
        copy
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2022,
            },
            api: ApiConfig {
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            dashboard: DashboardConfig { recent_window_days: 7 },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2022,
            },
            api: ApiConfig {
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
            dashboard: DashboardConfig { recent_window_days: 7 },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2022,
            },
            api: ApiConfig {
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
            dashboard: DashboardConfig { recent_window_days: 7 },
        }
    }
}

/// Unparseable values keep the preset.
fn override_parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T) {
    if let Some(parsed) = lookup(key).and_then(|v| v.trim().parse().ok()) {
        *target = parsed;
    }
}

/// Unparseable or out-of-range values keep the preset.
fn override_bounded<T: FromStr + PartialOrd>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    range: RangeInclusive<T>,
    target: &mut T,
) {
    if let Some(parsed) = lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| range.contains(v))
    {
        *target = parsed;
    }
}

fn redact_url_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://****{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
