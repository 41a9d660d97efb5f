use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Principal that sees every row and the admin-only pages
    pub admin_principal: String,
    /// HS256 signing secret; a random one is generated per process when absent
    pub jwt_secret: Option<String>,
    pub token_lifetime_hours: i64,
    pub users: Vec<UserEntry>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_principal: "admin".to_string(),
            jwt_secret: None,
            token_lifetime_hours: 24,
            users: Vec::new(),
        }
    }
}

/// Login entry; `password_hash` is an argon2 PHC string (see `hash-password`)
#[derive(Debug, Deserialize, Clone)]
pub struct UserEntry {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Invoices dated before this year are ignored
    pub min_invoice_year: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            min_invoice_year: 2014,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/dashboard.db"

[server]
host = "0.0.0.0"
port = 3000

[auth]
admin_principal = "admin"
token_lifetime_hours = 24

[dashboard]
min_invoice_year = 2014
"#;

/// Load configuration
///
/// Search order:
/// 1. `explicit` (from `--config` / `DASHBOARD_CONFIG`)
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/dashboard.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.admin_principal, "admin");
        assert!(config.auth.users.is_empty());
        assert_eq!(config.dashboard.min_invoice_year, 2014);
    }

    #[test]
    fn partial_config_uses_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/srv/bi.db"

            [[auth.users]]
            username = "NYC"
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_lifetime_hours, 24);
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "NYC");
        assert_eq!(get_database_path(&config), PathBuf::from("/srv/bi.db"));
    }
}
