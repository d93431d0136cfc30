use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::models::navigation::{default_navigation, default_route_permissions, NavItem, RoutePermissions};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path} at {at}: {message}")]
    Parse {
        path: PathBuf,
        at: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    pub navigation: Vec<NavItem>,
    pub route_permissions: RoutePermissions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            cors_allow_origin: None,
            navigation: default_navigation(),
            route_permissions: default_route_permissions(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("APP_HOST") {
            config.host = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "APP_HOST",
                expected: "an IP address",
                value,
            })?;
        }

        if let Some(value) = lookup("APP_PORT") {
            config.port = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "APP_PORT",
                expected: "a port number",
                value,
            })?;
        }

        config.cors_allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "*");

        if let Some(path) = lookup("NAVIGATION_FILE").filter(|p| !p.trim().is_empty()) {
            config.navigation = load_json(Path::new(path.trim()))?;
            tracing::info!(path = %path, items = config.navigation.len(), "loaded navigation menu");
        }

        if let Some(path) = lookup("ROUTE_PERMISSIONS_FILE").filter(|p| !p.trim().is_empty()) {
            config.route_permissions = load_json(Path::new(path.trim()))?;
            tracing::info!(path = %path, routes = config.route_permissions.len(), "loaded route permissions");
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Reads a JSON file, reporting the JSON path of the first bad entry.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let de = &mut serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize(de).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        at: err.path().to_string(),
        message: err.inner().to_string(),
    })
}

/// Loads `.env` from the working directory, falling back to the crate directory.
pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert!(config.cors_allow_origin.is_none());
        assert_eq!(config.navigation, default_navigation());
        assert_eq!(config.route_permissions, default_route_permissions());
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "APP_PORT", .. }));
    }

    #[test]
    fn test_wildcard_origin_means_any() {
        let config = AppConfig::from_lookup(lookup_from(&[("CORS_ALLOW_ORIGIN", "*")])).unwrap();
        assert!(config.cors_allow_origin.is_none());

        let config =
            AppConfig::from_lookup(lookup_from(&[("CORS_ALLOW_ORIGIN", "https://crm.example.com")]))
                .unwrap();
        assert_eq!(config.cors_allow_origin.as_deref(), Some("https://crm.example.com"));
    }

    #[test]
    fn test_route_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"/secret": ["manage_permissions"]}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config =
            AppConfig::from_lookup(lookup_from(&[("ROUTE_PERMISSIONS_FILE", path.as_str())])).unwrap();
        assert_eq!(config.route_permissions.len(), 1);
        assert_eq!(config.route_permissions["/secret"], vec!["manage_permissions"]);
    }

    #[test]
    fn test_parse_error_names_json_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"key": "a", "label": "A"}}, {{"key": "b", "label": 7}}]"#).unwrap();

        let err = load_json::<Vec<NavItem>>(file.path()).unwrap_err();
        match err {
            ConfigError::Parse { at, .. } => assert_eq!(at, "[1].label"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_json::<RoutePermissions>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
