// Job board sources.
// Defines the trait and registry for the external boards a refresh pulls
// from. Each source owns one board slug; failures stay local to it.

mod greenhouse;
mod lever;

pub use greenhouse::GreenhouseBoard;
pub use lever::LeverBoard;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::Config;
use crate::error::AppError;
use crate::models::job::RawPosting;

/// Trait that all job board sources implement. A source fetches the raw,
/// source-shaped postings of one configured board.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Board kind identifier, e.g. "lever". Becomes `Job::source`.
    fn source(&self) -> &str;

    /// Board slug, e.g. "vercel". Becomes `Job::board`.
    fn board(&self) -> &str;

    /// Label used in logs and refresh reports.
    fn label(&self) -> String {
        format!("{}/{}", self.source(), self.board())
    }

    /// Fetch the board's current postings, raw.
    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<RawPosting>, AppError>;
}

/// Build the source set from config, Lever boards first.
pub fn from_config(config: &Config) -> Vec<Arc<dyn JobSource>> {
    let mut sources: Vec<Arc<dyn JobSource>> = Vec::new();
    for slug in &config.lever_boards {
        sources.push(Arc::new(LeverBoard::new(slug)));
    }
    for slug in &config.greenhouse_boards {
        sources.push(Arc::new(GreenhouseBoard::new(slug)));
    }
    sources
}

/// Path-safe characters for board slugs embedded in API URLs.
const SLUG_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub(crate) fn path_segment(slug: &str) -> String {
    utf8_percent_encode(slug, SLUG_SET).to_string()
}
