//! Cafe detail endpoints

use crate::client::KopiClient;
use crate::error::ApiResult;
use crate::normalize::{normalize_cafe_detail, CafeDetail};
use serde_json::Value;

/// Cafes API interface
#[derive(Clone)]
pub struct CafesApi {
    client: KopiClient,
}

impl CafesApi {
    /// Create a new cafes API interface
    pub(crate) fn new(client: KopiClient) -> Self {
        Self { client }
    }

    /// Fetch one cafe's details
    ///
    /// GET /cafes/{cafe_id}
    pub async fn get(&self, cafe_id: &str) -> ApiResult<CafeDetail> {
        let payload: Value = self.client.get(&["cafes", cafe_id]).await?;
        Ok(normalize_cafe_detail(&payload))
    }
}
