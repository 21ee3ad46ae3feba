//! Error type shared by the adapter, the store and the front-end.
//!
//! None of these are fatal to a running dashboard: the session turns a failed
//! fetch into a stale indicator and keeps the previous snapshot on screen.

use hyper::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Upstream unreachable or the connection broke mid-response.
    #[error("network error: {0}")]
    Network(#[from] hyper::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Upstream answered with a non-2xx status.
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    /// A gzip body could not be inflated.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] std::io::Error),

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid uri: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),

    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),

    /// The code is not in the loaded country catalog.
    #[error("unknown country code `{0}`")]
    UnknownCountry(String),

    #[error("invalid region `{0}`")]
    InvalidRegion(String),

    #[error("invalid statistic `{0}`, expected cases, recovered or deaths")]
    InvalidStatistic(String),

    #[error("config error: {0}")]
    Config(String),
}

impl TrackerError {
    /// Whether the failure came from talking to upstream, as opposed to a
    /// rejected user input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Timeout { .. }
                | Self::Status { .. }
                | Self::Decode(_)
                | Self::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_url() {
        let err = TrackerError::Status {
            status: StatusCode::NOT_FOUND,
            url: "http://localhost/countries/ZZ".to_string(),
        };
        assert_eq!(err.to_string(), "http://localhost/countries/ZZ returned 404 Not Found");
        assert!(err.is_upstream());
    }

    #[test]
    fn input_errors_are_not_upstream() {
        assert!(!TrackerError::UnknownCountry("ZZ".to_string()).is_upstream());
        assert!(!TrackerError::InvalidStatistic("active".to_string()).is_upstream());
    }
}
