use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anmeldung_domain::{IntakeValidator, RegistrationService};
use anmeldung_export::{ExportManager, Spreadsheet, default_export_manager};
use anmeldung_storage::{FilesystemStore, RecordStore};
use eyre::{Result, WrapErr, bail};

use crate::auth::AccessGate;
use crate::config::AppConfig;

pub type SharedState = Arc<AppState>;

/// Everything the handlers need, assembled once from the configuration.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub registrations: RegistrationService,
    pub exports: ExportManager,
    pub gate: AccessGate,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if let Some(static_dir) = &config.server.static_dir {
            ensure_store_not_served(&config.storage.path, static_dir)?;
        }

        let store: Arc<dyn RecordStore> =
            Arc::new(FilesystemStore::new(config.storage.path.clone()));
        let validator =
            IntakeValidator::new().with_school_type_check(config.intake.enforce_school_type);
        let exports = default_export_manager(Spreadsheet::from(config.export.spreadsheet))
            .wrap_err("Failed to set up exports")?;

        Ok(Self {
            registrations: RegistrationService::new(store.clone(), validator),
            exports,
            gate: AccessGate::new(
                config.admin.username.as_str(),
                config.admin.password.as_str(),
            ),
            static_dir: config.server.static_dir.clone(),
            store,
        })
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

/// Static files are served without credentials, so the directory holding the
/// store and its lock and backup files must lie outside the static tree.
fn ensure_store_not_served(store: &Path, static_dir: &Path) -> Result<()> {
    let static_root = static_dir
        .canonicalize()
        .wrap_err_with(|| format!("Static directory {} is not accessible", static_dir.display()))?;

    let store_dir = match store.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let store_dir = resolve(store_dir)
        .wrap_err_with(|| format!("Cannot resolve store directory {}", store_dir.display()))?;

    if store_dir.starts_with(&static_root) {
        bail!(
            "Record store {} lies inside the static directory {}; move storage.path or server.static_dir",
            store.display(),
            static_dir.display()
        );
    }
    Ok(())
}

/// Canonicalize a path whose trailing components may not exist yet.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    let mut resolved = loop {
        match existing.canonicalize() {
            Ok(base) => break base,
            Err(e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = if parent.as_os_str().is_empty() {
                        Path::new(".")
                    } else {
                        parent
                    };
                }
                _ => return Err(e),
            },
        }
    };

    for name in missing.iter().rev() {
        if name == ".." {
            resolved.pop();
        } else if name != "." {
            resolved.push(name);
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_inside_static_dir_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("data").join("registrations.json");

        assert!(ensure_store_not_served(&store, temp_dir.path()).is_err());
        assert!(
            ensure_store_not_served(&temp_dir.path().join("registrations.json"), temp_dir.path())
                .is_err()
        );
    }

    #[test]
    fn test_store_beside_static_dir_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let public = temp_dir.path().join("public");
        std::fs::create_dir(&public).unwrap();

        let store = temp_dir.path().join("data").join("registrations.json");
        assert!(ensure_store_not_served(&store, &public).is_ok());

        let escaping = public.join("..").join("data").join("registrations.json");
        assert!(ensure_store_not_served(&escaping, &public).is_ok());
    }

    #[test]
    fn test_resolve_missing_components() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();

        let resolved = resolve(&temp_dir.path().join("a").join("b")).unwrap();
        assert_eq!(resolved, root.join("a").join("b"));
    }
}
