//! Point check, history and clear endpoints.

use pc_core::{CheckRequest, PointRecord};

use crate::http::{check_response, read_json};
use crate::{ApiClient, ApiError, PointsApi};

const HISTORY_PATH: &str = "/api/points/history";
const CHECK_PATH: &str = "/api/points/check";
const CLEAR_PATH: &str = "/api/points/clear";

impl PointsApi for ApiClient {
    async fn history(&self, token: &str) -> Result<Vec<PointRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url(HISTORY_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        let records: Vec<PointRecord> = read_json(check_response(resp).await?).await?;
        tracing::debug!(count = records.len(), "fetched history");
        Ok(records)
    }

    async fn check(&self, token: &str, request: &CheckRequest) -> Result<PointRecord, ApiError> {
        let resp = self
            .http
            .post(self.url(CHECK_PATH))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        read_json(check_response(resp).await?).await
    }

    async fn clear(&self, token: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(CLEAR_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}
