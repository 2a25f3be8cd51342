//! Collaborators the orchestrator talks to.
//!
//! Each upstream concern is a trait so the view logic can run against the
//! HTTP client, fixed values from the command line, or in-memory fakes.

use async_trait::async_trait;
use kopi_api_client::{ApiError, CafeDetail, KopiClient, RecommendationRecord};
use kopi_geo::Coordinate;
use std::sync::Arc;
use thiserror::Error;

/// Who is signed in.
pub trait SessionIdentity: Send + Sync {
    /// The current user id, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<String>;
}

/// Produces a user's recommendation list.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetches the raw recommendation list for `user_id`.
    async fn recommendations(&self, user_id: &str) -> Result<Vec<RecommendationRecord>, ApiError>;
}

/// Produces per-cafe details.
#[async_trait]
pub trait CafeDetailSource: Send + Sync {
    /// Fetches details for one cafe.
    async fn cafe_detail(&self, cafe_id: &str) -> Result<CafeDetail, ApiError>;
}

/// Why the user's position could not be determined.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocateError {
    /// The user refused location access
    #[error("location permission denied")]
    Denied,
    /// No fix could be obtained
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the user's current position.
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    /// One-shot position request.
    async fn locate(&self) -> Result<Coordinate, LocateError>;
}

#[async_trait]
impl RecommendationSource for KopiClient {
    async fn recommendations(&self, user_id: &str) -> Result<Vec<RecommendationRecord>, ApiError> {
        self.recommendations().list(user_id).await
    }
}

#[async_trait]
impl CafeDetailSource for KopiClient {
    async fn cafe_detail(&self, cafe_id: &str) -> Result<CafeDetail, ApiError> {
        self.cafes().get(cafe_id).await
    }
}

/// An identity fixed at construction, e.g. from `--user`.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<String>);

impl StaticIdentity {
    /// Signed in as `user_id`; blank ids count as signed out.
    pub fn new(user_id: Option<impl Into<String>>) -> Self {
        Self(user_id.map(Into::into).filter(|id: &String| !id.trim().is_empty()))
    }
}

impl SessionIdentity for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A position fixed at construction, e.g. from `--lat/--lng` or config.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinate>);

impl FixedLocation {
    /// Resolves to `coordinate`, or fails when `None`.
    #[must_use]
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self(coordinate)
    }
}

#[async_trait]
impl GeolocationSource for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        self.0
            .ok_or_else(|| LocateError::Unavailable("no location configured".into()))
    }
}

/// The four collaborators, shareable across tasks.
#[derive(Clone)]
pub struct Sources {
    /// Session identity
    pub identity: Arc<dyn SessionIdentity>,
    /// Recommendation list
    pub recommendations: Arc<dyn RecommendationSource>,
    /// Cafe details
    pub details: Arc<dyn CafeDetailSource>,
    /// User position
    pub location: Arc<dyn GeolocationSource>,
}

impl Sources {
    /// Bundles the collaborators.
    pub fn new(
        identity: impl SessionIdentity + 'static,
        recommendations: impl RecommendationSource + 'static,
        details: impl CafeDetailSource + 'static,
        location: impl GeolocationSource + 'static,
    ) -> Self {
        Self {
            identity: Arc::new(identity),
            recommendations: Arc::new(recommendations),
            details: Arc::new(details),
            location: Arc::new(location),
        }
    }

    /// Uses one HTTP client for both the list and the details.
    pub fn from_client(
        client: KopiClient,
        identity: impl SessionIdentity + 'static,
        location: impl GeolocationSource + 'static,
    ) -> Self {
        let shared = Arc::new(client);
        Self {
            identity: Arc::new(identity),
            recommendations: shared.clone(),
            details: shared,
            location: Arc::new(location),
        }
    }
}
