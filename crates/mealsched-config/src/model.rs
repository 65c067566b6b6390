//! Typed server settings.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mealsched_auth::SigningConfig;

/// Default HTTP listener port.
pub const DEFAULT_HTTP_PORT: u16 = 5000;
/// Default log level when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default login account name.
pub const DEFAULT_LOGIN_USERNAME: &str = "admin";
/// Default login password.
pub const DEFAULT_LOGIN_PASSWORD: &str = "admin1";

/// Complete server configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listener settings.
    pub http: HttpConfig,
    /// Token signing settings; may be incomplete until validated.
    pub signing: SigningConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Credential pair accepted by the login endpoint.
    pub login: LoginPolicy,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Address to bind.
    pub bind_addr: IpAddr,
    /// Port to bind; never zero.
    pub port: u16,
}

impl HttpConfig {
    /// Socket address combining bind address and port.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Requested log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatChoice {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Level or filter directive.
    pub level: String,
    /// Explicit format; `None` lets the build profile decide.
    pub format: Option<LogFormatChoice>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: None,
        }
    }
}

/// Single credential pair accepted at login.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginPolicy {
    /// Accepted account name.
    pub username: String,
    /// Accepted password.
    pub password: String,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            username: DEFAULT_LOGIN_USERNAME.to_string(),
            password: DEFAULT_LOGIN_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for LoginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPolicy")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
