//! Command implementations

pub mod distance;
pub mod facilities;
pub mod recommend;

use kopi_api_client::{ClientConfig, KopiClient};
use kopi_core::{config::Config, Error as CoreError};
use kopi_geo::Coordinate;
use kopi_recommend::{FixedLocation, OrchestratorConfig, RecommendationOrchestrator, Sources, StaticIdentity};
use std::time::Duration;

/// Build the HTTP client. Environment variables win over kopi.toml.
pub fn client(config: &Config) -> Result<KopiClient, CoreError> {
    let mut client_config = ClientConfig::from_env()?;

    if std::env::var_os("KOPI_API_URL").is_none() {
        if let Some(url) = &config.schema.api.base_url {
            client_config = client_config.with_base_url(url.clone());
        }
    }
    if std::env::var_os("KOPI_TIMEOUT_SECS").is_none() {
        client_config = client_config.with_timeout(Duration::from_secs(config.schema.api.timeout_secs));
    }

    Ok(KopiClient::with_config(client_config)?)
}

/// Resolve the user's position from flags, then kopi.toml.
pub fn position(flags: Option<(f64, f64)>, config: &Config) -> Result<Option<Coordinate>, CoreError> {
    flags
        .or_else(|| config.schema.location.pair())
        .map(|(lat, lng)| Coordinate::try_new(lat, lng).map_err(|_| CoreError::invalid_coordinate(lat, lng)))
        .transpose()
}

/// Wire an orchestrator to the API for one user.
pub fn orchestrator(
    config: &Config,
    user: Option<String>,
    location: Option<Coordinate>,
    top_n: usize,
) -> Result<RecommendationOrchestrator, CoreError> {
    let client = client(config)?;
    let settings = OrchestratorConfig {
        timeout: client.config().call_budget(),
        top_n,
    };
    let sources = Sources::from_client(client, StaticIdentity::new(user), FixedLocation::new(location));
    Ok(RecommendationOrchestrator::new(sources, settings))
}
