use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::models::job::RawPosting;
use crate::sources::{JobSource, path_segment};

const BASE_URL: &str = "https://boards-api.greenhouse.io/v1/boards";

/// One Greenhouse board, addressed by board slug.
/// Boards API: `https://boards-api.greenhouse.io/v1/boards/<slug>/jobs?content=true`
/// returns an object with the postings under `jobs`.
pub struct GreenhouseBoard {
    board: String,
}

impl GreenhouseBoard {
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
        }
    }
}

#[async_trait]
impl JobSource for GreenhouseBoard {
    fn source(&self) -> &str {
        "greenhouse"
    }

    fn board(&self) -> &str {
        &self.board
    }

    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError> {
        let url = format!(
            "{BASE_URL}/{}/jobs?content=true",
            path_segment(&self.board)
        );

        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SourceFetch(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::SourceFetch(format!(
                "greenhouse returned {}",
                resp.status()
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::SourceFetch(format!("invalid response body: {e}")))?;

        let items = data
            .get("jobs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(items
            .into_iter()
            .map(|payload| RawPosting {
                source: self.source().to_string(),
                board: self.board.clone(),
                payload,
            })
            .collect())
    }
}
