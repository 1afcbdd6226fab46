//! Configuration file loading for the CLI
//!
//! Finds and loads the TOML configuration from an explicit path, the local
//! directory or the platform configuration directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use meshview::{MeshviewError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for MeshviewError {
    fn from(err: ConfigError) -> Self {
        MeshviewError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (meshview/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if an explicit path does not exist or a found file cannot
/// be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MeshviewError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("meshview/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    match ProjectDirs::from("com", "meshview", "meshview") {
        Some(proj_dirs) => {
            let system_config = proj_dirs.config_dir().join("config.toml");
            if system_config.exists() {
                info!(path = system_config.display().to_string(); "Loading configuration from system path");
                return load_config_file(system_config);
            }
            debug!(path = system_config.display().to_string(); "System configuration file not found");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Parses the TOML file at `path`.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, MeshviewError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[window]\ntitle = \"Mesh\"\nwidth = 640.0\n\n[view]\nzoom = 2.0\n\n[style]\nbackground_color = \"white\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.window().title(), "Mesh");
        assert_eq!(config.window().width(), 640.0);
        assert_eq!(config.window().height(), 900.0);
        assert_eq!(config.view().zoom(), 2.0);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, MeshviewError::Config(msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window\nwidth = ").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, MeshviewError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }
}
