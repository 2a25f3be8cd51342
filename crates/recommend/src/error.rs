//! Errors that end a recommendation load.

use kopi_api_client::ApiError;
use kopi_core::{Error as CoreError, ErrorCode};
use thiserror::Error;

/// Terminal failures of the recommendation view.
///
/// Geolocation failures and per-cafe detail failures are not here: they
/// degrade the view instead of ending it.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Nobody is signed in
    #[error("no signed-in user")]
    MissingIdentity,

    /// The recommendation list could not be fetched
    #[error("failed to fetch recommendations: {0}")]
    RecommendationFetch(#[source] ApiError),
}

impl From<ViewError> for CoreError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::MissingIdentity => CoreError::missing_identity(),
            ViewError::RecommendationFetch(api) => {
                let core: CoreError = api.into();
                let code = if core.code == ErrorCode::NetworkError {
                    ErrorCode::UpstreamUnavailable
                } else {
                    core.code
                };
                CoreError {
                    code,
                    message: format!("Failed to fetch recommendations: {}", core.message),
                    ..core
                }
            }
        }
    }
}
