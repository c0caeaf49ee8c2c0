//! Application settings loaded via OrthoConfig, and the assembled server
//! configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use teachteam::domain::{AdminBootstrap, EmailAddress, Password, PersonName};
use teachteam::inbound::http::session_config::SessionSettings;
use teachteam::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ADMIN_FIRST_NAME: &str = "Site";
const DEFAULT_ADMIN_LAST_NAME: &str = "Administrator";

/// Settings read from `TEACHTEAM_*` environment variables and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TEACHTEAM")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Email of the administrator created at startup.
    pub admin_email: Option<String>,
    /// Password of the administrator created at startup.
    pub admin_password: Option<String>,
    pub admin_first_name: Option<String>,
    pub admin_last_name: Option<String>,
}

/// Invalid values in [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("admin_email and admin_password must be set together")]
    PartialAdmin,
    #[error("invalid admin {field}: {message}")]
    Admin {
        field: &'static str,
        message: String,
    },
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Administrator to create at startup, if one is configured.
    pub fn admin_bootstrap(&self) -> Result<Option<AdminBootstrap>, SettingsError> {
        let (email, password) = match (&self.admin_email, &self.admin_password) {
            (None, None) => return Ok(None),
            (Some(email), Some(password)) => (email, password),
            _ => return Err(SettingsError::PartialAdmin),
        };
        let name = |raw: Option<&String>, fallback: &str, field: &'static str| {
            PersonName::new(raw.map_or(fallback, String::as_str)).map_err(|err| admin_error(field, err))
        };

        Ok(Some(AdminBootstrap {
            first_name: name(
                self.admin_first_name.as_ref(),
                DEFAULT_ADMIN_FIRST_NAME,
                "first name",
            )?,
            last_name: name(
                self.admin_last_name.as_ref(),
                DEFAULT_ADMIN_LAST_NAME,
                "last name",
            )?,
            email: EmailAddress::new(email).map_err(|err| admin_error("email", err))?,
            password: Password::new(password).map_err(|err| admin_error("password", err))?,
        }))
    }
}

fn admin_error(field: &'static str, err: impl std::fmt::Display) -> SettingsError {
    SettingsError::Admin {
        field,
        message: err.to_string(),
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin: Option<AdminBootstrap>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            admin: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, every repository port is served by the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Create this administrator before accepting requests.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<AdminBootstrap>) -> Self {
        self.admin = admin;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Environment-driven settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 8] = [
        "TEACHTEAM_BIND_ADDR",
        "TEACHTEAM_DATABASE_URL",
        "TEACHTEAM_DB_MAX_CONNECTIONS",
        "TEACHTEAM_RUN_MIGRATIONS",
        "TEACHTEAM_ADMIN_EMAIL",
        "TEACHTEAM_ADMIN_PASSWORD",
        "TEACHTEAM_ADMIN_FIRST_NAME",
        "TEACHTEAM_ADMIN_LAST_NAME",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        AppSettings::load_from_iter([OsString::from("teachteam")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);

        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("default")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(settings.run_migrations);
        assert!(settings.admin_bootstrap().expect("no admin").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("TEACHTEAM_BIND_ADDR", "127.0.0.1:9000"),
            ("TEACHTEAM_DATABASE_URL", "postgres://localhost/teachteam"),
            ("TEACHTEAM_DB_MAX_CONNECTIONS", "4"),
            ("TEACHTEAM_RUN_MIGRATIONS", "false"),
        ]);

        assert_eq!(
            settings.bind_addr().expect("bind addr").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/teachteam")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn admin_bootstrap_uses_default_names() {
        let settings = load_with(&[
            ("TEACHTEAM_ADMIN_EMAIL", "admin@example.com"),
            ("TEACHTEAM_ADMIN_PASSWORD", "Admin#2025"),
        ]);

        let admin = settings
            .admin_bootstrap()
            .expect("valid admin")
            .expect("configured");
        assert_eq!(admin.email.as_ref(), "admin@example.com");
        assert_eq!(admin.first_name.as_ref(), DEFAULT_ADMIN_FIRST_NAME);
        assert_eq!(admin.last_name.as_ref(), DEFAULT_ADMIN_LAST_NAME);
    }

    #[rstest]
    #[case(&[("TEACHTEAM_ADMIN_EMAIL", "admin@example.com")])]
    #[case(&[("TEACHTEAM_ADMIN_PASSWORD", "Admin#2025")])]
    fn partial_admin_is_rejected(#[case] overrides: &[(&'static str, &str)]) {
        let settings = load_with(overrides);

        assert!(matches!(
            settings.admin_bootstrap(),
            Err(SettingsError::PartialAdmin)
        ));
    }

    #[rstest]
    fn weak_admin_password_is_rejected() {
        let settings = load_with(&[
            ("TEACHTEAM_ADMIN_EMAIL", "admin@example.com"),
            ("TEACHTEAM_ADMIN_PASSWORD", "password"),
        ]);

        assert!(matches!(
            settings.admin_bootstrap(),
            Err(SettingsError::Admin {
                field: "password",
                ..
            })
        ));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = load_with(&[("TEACHTEAM_BIND_ADDR", "not-an-address")]);

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
