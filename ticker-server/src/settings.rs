//! Configuration loading for the service binary.
//!
//! The YAML file named by `TICKER_CONFIG` (default `ticker-parser.yaml`) is read
//! into a [`TickerConfig`]; every key is optional. `TICKER_PORT` overrides
//! `server.port`.

use std::path::{Path, PathBuf};

use ticker_types::{TickerConfig, TickerError};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TICKER_CONFIG";
/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "TICKER_PORT";
/// Configuration file used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "ticker-parser.yaml";

/// Where the configuration came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Loaded from this file.
    File(PathBuf),
    /// The file did not exist; defaults were used.
    Missing(PathBuf),
}

/// Parse a YAML document. A blank document yields the defaults.
///
/// # Errors
/// Returns `Config` if the document is not valid for [`TickerConfig`].
pub fn from_yaml_str(doc: &str) -> Result<TickerConfig, TickerError> {
    if doc.trim().is_empty() {
        return Ok(TickerConfig::default());
    }
    serde_yaml::from_str(doc).map_err(|e| TickerError::Config(e.to_string()))
}

/// Read the configuration at `path`.
///
/// # Errors
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_from(path: &Path) -> Result<(TickerConfig, ConfigOrigin), TickerError> {
    match std::fs::read_to_string(path) {
        Ok(doc) => {
            let cfg = from_yaml_str(&doc)
                .map_err(|e| TickerError::Config(format!("{}: {e}", path.display())))?;
            Ok((cfg, ConfigOrigin::File(path.to_path_buf())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((
            TickerConfig::default(),
            ConfigOrigin::Missing(path.to_path_buf()),
        )),
        Err(e) => Err(TickerError::Config(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}

/// Apply a `TICKER_PORT`-style override.
///
/// # Errors
/// Returns `Config` if `port` is not a valid port number.
pub fn apply_port_override(cfg: &mut TickerConfig, port: Option<&str>) -> Result<(), TickerError> {
    if let Some(raw) = port {
        cfg.server.port = raw
            .trim()
            .parse()
            .map_err(|e| TickerError::Config(format!("{PORT_ENV}={raw}: {e}")))?;
    }
    Ok(())
}

/// Load the configuration the way the binary does, from the environment.
///
/// # Errors
/// See [`load_from`] and [`apply_port_override`].
pub fn load() -> Result<(TickerConfig, ConfigOrigin), TickerError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (mut cfg, origin) = load_from(&path)?;
    apply_port_override(&mut cfg, std::env::var(PORT_ENV).ok().as_deref())?;
    Ok((cfg, origin))
}
