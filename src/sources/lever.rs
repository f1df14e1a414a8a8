use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::models::job::RawPosting;
use crate::sources::{JobSource, path_segment};

const BASE_URL: &str = "https://api.lever.co/v0/postings";

/// One Lever-hosted board, addressed by company slug.
/// Postings API: `https://api.lever.co/v0/postings/<slug>?mode=json`
/// returns a JSON array of postings.
pub struct LeverBoard {
    board: String,
}

impl LeverBoard {
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
        }
    }
}

#[async_trait]
impl JobSource for LeverBoard {
    fn source(&self) -> &str {
        "lever"
    }

    fn board(&self) -> &str {
        &self.board
    }

    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError> {
        let url = format!("{BASE_URL}/{}?mode=json", path_segment(&self.board));

        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SourceFetch(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::SourceFetch(format!(
                "lever returned {}",
                resp.status()
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::SourceFetch(format!("invalid response body: {e}")))?;

        let items = data.as_array().cloned().unwrap_or_default();
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
