use std::path::PathBuf;

use crate::config::AppConfig;

/// Student registration intake and export service
#[derive(clap::Parser, Debug, Default)]
#[clap(version)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[clap(long, short)]
    pub config: Option<PathBuf>,
    /// Port to listen on
    #[clap(long, short)]
    pub port: Option<u16>,
    /// Path of the registration store
    #[clap(long)]
    pub data: Option<PathBuf>,
    /// Directory with the form and admin pages
    #[clap(long)]
    pub static_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides, which take precedence over every other source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data) = &self.data {
            config.storage.path = data.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }
    }
}
