use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::data_models::ProductRecord;
use crate::document::ScraperDocument;
use crate::extractor::{Extraction, RecordExtractor};
use crate::fetcher::{FetchError, HttpFetcher, PageFetcher};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("keyword is empty")]
    BadRequest,
    #[error("no search result containers on the page")]
    NotFound,
    #[error("scrape pipeline failed: {0}")]
    UpstreamFailure(String),
}

impl From<FetchError> for ScrapeError {
    fn from(e: FetchError) -> Self {
        ScrapeError::UpstreamFailure(format!("{:#}", anyhow::Error::new(e)))
    }
}

/// Successful terminal states of one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Success(Vec<ProductRecord>),
    /// Result containers were present but none of them made a valid record.
    EmptyResult { candidates: usize },
}

impl ScrapeOutcome {
    pub fn into_records(self) -> Vec<ProductRecord> {
        match self {
            ScrapeOutcome::Success(records) => records,
            ScrapeOutcome::EmptyResult { .. } => Vec::new(),
        }
    }
}

/// Drives fetch, parse and extract for a single keyword.
///
/// Holds no per-request state, so one instance is shared by every handler.
pub struct ScrapeService {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<RecordExtractor>,
}

impl ScrapeService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: RecordExtractor) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), RecordExtractor::default()))
    }

    pub async fn scrape(&self, keyword: &str) -> Result<ScrapeOutcome, ScrapeError> {
        // Blank check only: the keyword goes upstream exactly as given.
        if keyword.trim().is_empty() {
            return Err(ScrapeError::BadRequest);
        }

        let markup = self.fetcher.fetch(keyword).await?;

        // The parsed tree is not Send, so parsing and extraction both happen
        // inside the blocking task and only plain records come back out.
        let extractor = self.extractor.clone();
        let extraction = tokio::task::spawn_blocking(move || {
            let doc = ScraperDocument::parse(&markup);
            extractor.extract(&doc)
        })
        .await
        .map_err(|e| ScrapeError::UpstreamFailure(format!("extraction task failed: {e}")))?;

        let Extraction {
            candidates,
            records,
        } = extraction;
        log::info!(
            "keyword {keyword:?}: {candidates} result containers, {} records",
            records.len()
        );

        if candidates == 0 {
            return Err(ScrapeError::NotFound);
        }
        if records.is_empty() {
            return Ok(ScrapeOutcome::EmptyResult { candidates });
        }
        Ok(ScrapeOutcome::Success(records))
    }
}
