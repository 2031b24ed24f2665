//! Server settings loaded via OrthoConfig.
//!
//! Values come from `CAMPUS_*` environment variables, CLI flags and an
//! optional config file, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::LocationKind;
use crate::outbound::seed::default_seed_path;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Configuration for the campus route server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; enables the Diesel adapters and startup migrations.
    pub database_url: Option<String>,
    /// JSON campus seed used when no database is configured.
    pub seed_path: Option<PathBuf>,
    /// Location kind reserved for waypoint-only connector nodes.
    pub connector_kind: Option<String>,
    /// Bound of the background route persistence queue.
    #[ortho_config(default = DEFAULT_QUEUE_CAPACITY)]
    pub persistence_queue_capacity: usize,
}

impl ServerSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .map_or(Ok(DEFAULT_BIND_ADDR), str::parse)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured seed path, falling back to the bundled campus.
    pub fn seed_path(&self) -> PathBuf {
        self.seed_path.clone().unwrap_or_else(default_seed_path)
    }

    /// Configured connector kind, defaulting to `internal_connector`.
    pub fn connector_kind(&self) -> LocationKind {
        LocationKind::new(
            self.connector_kind
                .as_deref()
                .unwrap_or(LocationKind::DEFAULT_CONNECTOR),
        )
    }

    /// Configured queue capacity, at least one.
    pub fn persistence_queue_capacity(&self) -> usize {
        self.persistence_queue_capacity.max(1)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CAMPUS_BIND_ADDR",
        "CAMPUS_DATABASE_URL",
        "CAMPUS_SEED_PATH",
        "CAMPUS_CONNECTOR_KIND",
        "CAMPUS_PERSISTENCE_QUEUE_CAPACITY",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("campus-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), Ok(DEFAULT_BIND_ADDR));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.seed_path(), default_seed_path());
        assert_eq!(
            settings.connector_kind().as_str(),
            LocationKind::DEFAULT_CONNECTOR
        );
        assert_eq!(settings.persistence_queue_capacity(), DEFAULT_QUEUE_CAPACITY);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CAMPUS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "CAMPUS_DATABASE_URL",
                Some("postgres://campus@localhost/campus".to_owned()),
            ),
            ("CAMPUS_SEED_PATH", Some("/srv/campus/seed.json".to_owned())),
            ("CAMPUS_CONNECTOR_KIND", Some("hallway".to_owned())),
            ("CAMPUS_PERSISTENCE_QUEUE_CAPACITY", Some("8".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse::<SocketAddr>());
        assert_eq!(
            settings.database_url(),
            Some("postgres://campus@localhost/campus")
        );
        assert_eq!(settings.seed_path(), PathBuf::from("/srv/campus/seed.json"));
        assert_eq!(settings.connector_kind().as_str(), "hallway");
        assert_eq!(settings.persistence_queue_capacity(), 8);
    }

    #[rstest]
    #[case(Some("   "), None)]
    #[case(Some(""), None)]
    #[case(Some(" postgres://db/campus "), Some("postgres://db/campus"))]
    fn blank_database_url_is_ignored(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: raw.map(str::to_owned),
            seed_path: None,
            connector_kind: None,
            persistence_queue_capacity: 0,
        };
        assert_eq!(settings.database_url(), expected);
        assert_eq!(settings.persistence_queue_capacity(), 1);
    }

    #[rstest]
    fn malformed_bind_addr_is_an_error() {
        let settings = ServerSettings {
            bind_addr: Some("campus:eighty".to_owned()),
            database_url: None,
            seed_path: None,
            connector_kind: None,
            persistence_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        };
        assert!(settings.bind_addr().is_err());
    }
}
