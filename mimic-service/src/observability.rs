//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize the JSON tracing subscriber
///
/// The filter comes from `service.log_level`; an unparsable directive falls
/// back to `info`. Calling this more than once keeps the first subscriber.
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_level = config.service.log_level.clone();

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            environment = %config.service.environment,
            "Tracing initialized for service: {}",
            config.service.name
        );
    } else {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_tolerated() {
        let config = Config::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_ok());
    }

    #[test]
    fn test_bad_filter_falls_back() {
        let mut config = Config::default();
        config.service.log_level = "[[[not a filter".to_string();
        assert!(init_tracing(&config).is_ok());
    }
}
