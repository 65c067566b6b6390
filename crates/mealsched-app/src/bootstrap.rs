//! Service wiring for the Mealsched server binary.
//!
//! # Design
//! - Configuration is loaded once from the environment and handed to `run_app_with`.
//! - Startup refuses to serve when token signing is not fully configured.
//! - The API server runs until Ctrl-C and then drains in-flight requests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use mealsched_api::{ApiServer, ApiState, InMemoryScheduleStore, StaticCredentialVerifier};
use mealsched_auth::TokenCodec;
use mealsched_config::{LogFormatChoice, ServerConfig};
use mealsched_telemetry::{LogFormat, LoggingConfig, Metrics, init_logging};
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};

/// Build identifier baked in at compile time, `dev` otherwise.
const BUILD_SHA: &str = match option_env!("MEALSCHED_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

pub(crate) struct BootstrapDependencies {
    config: ServerConfig,
}

impl BootstrapDependencies {
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            ServerConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        Ok(Self::from_config(config))
    }

    pub(crate) const fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// Entry point for the Mealsched server boot sequence.
///
/// # Errors
///
/// Returns an error when configuration is missing or invalid, when telemetry
/// cannot be installed, or when the API server fails to bind or serve.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies, shutdown_signal()).await
}

pub(crate) async fn run_app_with(
    dependencies: BootstrapDependencies,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> AppResult<()> {
    let logging = &dependencies.config.logging;
    init_logging(&LoggingConfig {
        level: &logging.level,
        format: LogFormat::or_infer(logging.format.map(log_format)),
        build_sha: BUILD_SHA,
    })
    .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    info!(build = BUILD_SHA, "Mealsched bootstrap starting");
    let (server, addr) = prepare(dependencies)?;

    server
        .serve(addr, shutdown)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("API server shutdown complete");
    Ok(())
}

/// Validate configuration and assemble the API server without binding.
pub(crate) fn prepare(dependencies: BootstrapDependencies) -> AppResult<(ApiServer, SocketAddr)> {
    let config = dependencies.config;
    if let Err(err) = config.require_signing() {
        error!(error = %err, "token signing is not configured");
        return Err(AppError::config("config.require_signing", err));
    }

    let metrics = Metrics::new().map_err(|err| AppError::telemetry("metrics.new", err))?;
    let state = ApiState::new(
        TokenCodec::new(config.signing.clone()),
        Arc::new(StaticCredentialVerifier::new(config.login.clone())),
        Arc::new(InMemoryScheduleStore::new()),
        metrics,
    );

    let addr = config.http.socket_addr();
    info!(%addr, issuer = config.signing.issuer(), "API server configured");
    Ok((ApiServer::new(state), addr))
}

const fn log_format(choice: LogFormatChoice) -> LogFormat {
    match choice {
        LogFormatChoice::Json => LogFormat::Json,
        LogFormatChoice::Pretty => LogFormat::Pretty,
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealsched_auth::SigningConfig;
    use mealsched_config::{HttpConfig, LoggingSettings, LoginPolicy};
    use std::net::{IpAddr, Ipv4Addr};

    fn config(signing: SigningConfig) -> ServerConfig {
        ServerConfig {
            http: HttpConfig {
                bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
            },
            signing,
            logging: LoggingSettings::default(),
            login: LoginPolicy::default(),
        }
    }

    #[test]
    fn prepare_refuses_missing_signing_key() {
        let dependencies = BootstrapDependencies::from_config(config(SigningConfig::from_parts(
            Some("mealsched".into()),
            Some("mealsched-web".into()),
            None,
        )));
        let err = prepare(dependencies).err();
        assert!(matches!(
            err,
            Some(AppError::Config {
                operation: "config.require_signing",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn prepared_server_stops_when_shutdown_resolves() -> anyhow::Result<()> {
        let dependencies = BootstrapDependencies::from_config(config(SigningConfig::new(
            "mealsched",
            "mealsched-web",
            "0123456789abcdef0123456789abcdef",
        )));
        let (server, addr) = prepare(dependencies)?;
        assert_eq!(addr.port(), 0);
        server.serve(addr, async {}).await?;
        Ok(())
    }

    #[test]
    fn log_format_maps_every_choice() {
        assert_eq!(log_format(LogFormatChoice::Json), LogFormat::Json);
        assert_eq!(log_format(LogFormatChoice::Pretty), LogFormat::Pretty);
    }
}
