//! Process configuration, built once at startup.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Password shipped as the default; deployments are expected to override it.
pub const DEFAULT_ADMIN_PASSWORD: &str = "meinpass";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the form and admin pages, served as static files.
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the record store.
    pub path: PathBuf,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Reject school types other than GYM and NMS.
    pub enforce_school_type: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Offer the spreadsheet export when the build supports it.
    pub spreadsheet: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("registrations.json"),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            enforce_school_type: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { spreadsheet: true }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:3000`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: built-in defaults, the optional
    /// config file, `ANMELDUNG__SECTION__KEY` environment variables, and the
    /// `PORT`, `ADMIN_USER` and `ADMIN_PASS` variables of older deployments.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("ANMELDUNG")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("admin.username", env::var("ADMIN_USER").ok())?
            .set_override_option("admin.password", env::var("ADMIN_PASS").ok())?
            .build()
            .wrap_err("Failed to read configuration")?;

        config
            .try_deserialize()
            .wrap_err("Invalid configuration")
    }
}
