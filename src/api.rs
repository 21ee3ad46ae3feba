use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use hyper::body::{self, Bytes};
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING};
use hyper::{Body, Client, Method, Request, StatusCode, Uri};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::TrackerConfig;
use crate::covid::{CountryStat, GlobalStat, HistoricalTotals};
use crate::error::TrackerError;
use crate::source::StatsSource;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Client for the disease.sh v3 COVID-19 endpoints.
#[derive(Clone)]
pub struct DiseaseClient {
    base: String,
    timeout: Duration,
    client: HttpsClient,
}

impl DiseaseClient {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            base: config.api_base.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
            client: Client::builder().build::<_, Body>(HttpsConnector::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, TrackerError> {
        let url = format!("{}{path_and_query}", self.base);
        let uri: Uri = url.parse()?;

        let request = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_ENCODING, "gzip")
            .body(Body::empty())?;

        debug!(%url, "GET");

        // one deadline covers the headers and the whole body
        let (status, gzipped, bytes) = tokio::time::timeout(self.timeout, self.send(request))
            .await
            .map_err(|_| TrackerError::Timeout { url: url.clone() })??;

        if !status.is_success() {
            warn!(%url, %status, "upstream rejected request");
            return Err(TrackerError::Status { status, url });
        }

        let bytes = if gzipped { gunzip(&bytes)? } else { bytes };
        debug!(%url, %status, len = bytes.len(), gzipped, "response received");

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(
        &self,
        request: Request<Body>,
    ) -> Result<(StatusCode, bool, Bytes), TrackerError> {
        let resp = self.client.request(request).await?;

        let status = resp.status();
        let gzipped = resp
            .headers()
            .get(CONTENT_ENCODING)
            .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"gzip"));
        let bytes = body::to_bytes(resp.into_body()).await?;

        Ok((status, gzipped, bytes))
    }
}

fn gunzip(encoded: &[u8]) -> Result<Bytes, TrackerError> {
    let mut gz = GzDecoder::new(encoded);
    let mut decoded = Vec::new();
    gz.read_to_end(&mut decoded)?;
    Ok(Bytes::from(decoded))
}

impl StatsSource for DiseaseClient {
    async fn fetch_global(&self) -> Result<GlobalStat, TrackerError> {
        self.get_json("/all").await
    }

    async fn fetch_all_countries(&self) -> Result<Vec<CountryStat>, TrackerError> {
        self.get_json("/countries").await
    }

    async fn fetch_country(&self, code: &str) -> Result<CountryStat, TrackerError> {
        let encoded = urlencoding::encode(code);
        self.get_json(&format!("/countries/{encoded}")).await
    }

    async fn fetch_history(&self, last_days: u32) -> Result<HistoricalTotals, TrackerError> {
        self.get_json(&format!("/historical/all?lastdays={last_days}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn gunzip_inflates_body() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"{"cases": 1}"#).unwrap();
        let encoded = encoder.finish().unwrap();

        assert_eq!(&gunzip(&encoded).unwrap()[..], br#"{"cases": 1}"#);
    }

    #[test]
    fn gunzip_rejects_plain_bytes() {
        assert!(matches!(gunzip(b"not gzip"), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = TrackerConfig {
            api_base: "http://localhost:4000/v3/covid-19/".to_string(),
            ..TrackerConfig::default()
        };
        assert_eq!(DiseaseClient::new(&config).base(), "http://localhost:4000/v3/covid-19");
    }
}
