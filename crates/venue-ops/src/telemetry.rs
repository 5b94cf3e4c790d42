//! Tracing setup for the onboarding console. An explicit `RUST_LOG` wins
//! over the configured level so operators can raise verbosity per-deploy
//! without touching the service configuration.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log directive '{directive}'")]
    Directive {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("a tracing subscriber is already installed")]
    AlreadyInstalled,
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}

fn filter_from(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::Directive {
        directive: directive.to_string(),
        source,
    })
}
