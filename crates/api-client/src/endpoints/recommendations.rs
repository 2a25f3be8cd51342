//! Recommendations API endpoints

use crate::client::KopiClient;
use crate::error::ApiResult;
use crate::normalize::{normalize_recommendations, RecommendationRecord};
use serde_json::Value;
use tracing::debug;

/// Recommendations API interface
#[derive(Clone)]
pub struct RecommendationsApi {
    client: KopiClient,
}

impl RecommendationsApi {
    /// Create a new recommendations API interface
    pub(crate) fn new(client: KopiClient) -> Self {
        Self { client }
    }

    /// Fetch a user's recommendation list
    ///
    /// GET /recommendations/{user_id}
    ///
    /// Entries without a cafe id are dropped; every other field is
    /// normalised into [`RecommendationRecord`].
    pub async fn list(&self, user_id: &str) -> ApiResult<Vec<RecommendationRecord>> {
        let (payload, elapsed): (Value, _) =
            self.client.timed_get(&["recommendations", user_id]).await?;
        let records = normalize_recommendations(&payload)?;
        debug!(
            user_id = %user_id,
            count = records.len(),
            elapsed_ms = elapsed.as_millis(),
            "Fetched recommendations"
        );
        Ok(records)
    }
}
