use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use thiserror::Error;

use crate::config::{BrowserHeaders, Config, KEYWORD_PLACEHOLDER};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid value for header {name}")]
    InvalidHeader {
        name: HeaderName,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to read body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches the raw markup of the search results page for a keyword.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, keyword: &str) -> Result<String, FetchError>;
}

/// Characters a URI component may carry unescaped, as browsers' `encodeURIComponent` does.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Substitute the percent-encoded keyword into a `{keyword}` URL template.
pub fn build_search_url(template: &str, keyword: &str) -> String {
    let encoded = utf8_percent_encode(keyword, URI_COMPONENT).to_string();
    template.replace(KEYWORD_PLACEHOLDER, &encoded)
}

pub fn browser_header_map(headers: &BrowserHeaders) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::new();
    for (name, value) in [
        (ACCEPT, &headers.accept),
        (ACCEPT_ENCODING, &headers.accept_encoding),
        (ACCEPT_LANGUAGE, &headers.accept_language),
        (USER_AGENT, &headers.user_agent),
    ] {
        let value = HeaderValue::from_str(value).map_err(|source| FetchError::InvalidHeader {
            name: name.clone(),
            source,
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

pub struct HttpFetcher {
    client: reqwest::Client,
    search_url: String,
    headers: HeaderMap,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<HttpFetcher, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(HttpFetcher {
            client,
            search_url: config.search_url.clone(),
            headers: browser_header_map(&config.headers)?,
        })
    }

    pub fn search_url(&self, keyword: &str) -> String {
        build_search_url(&self.search_url, keyword)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, keyword: &str) -> Result<String, FetchError> {
        let url = self.search_url(keyword);
        log::info!("fetching search page: {url}");

        let res = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        res.text()
            .await
            .map_err(|source| FetchError::Body { url, source })
    }
}
