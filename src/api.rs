//! Per-date access to the Mars Rover Photos API.

use std::future::Future;

use chrono::NaiveDate;
use rover_model::PhotoRecord;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::ApiOptions;
use crate::dates::format_date;
use crate::error::{Error, FetchCause, FetchFailure};

/// Anything that can hand out one page of photos for a rover and an Earth date.
pub trait PhotoSource {
    /// Fetches page `page` (1-based) for `date`. One attempt, no retries.
    fn fetch_page(
        &self,
        rover: &str,
        date: NaiveDate,
        page: u32,
    ) -> impl Future<Output = Result<Vec<PhotoRecord>, FetchFailure>> + Send;
}

/// HTTP client for `GET {base}/rovers/{rover}/photos`.
#[derive(Debug, Clone)]
pub struct MarsPhotosApi {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl MarsPhotosApi {
    pub fn new(options: &ApiOptions) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .user_agent(concat!("rover-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            base_url: options.base_url.trim().trim_end_matches('/').to_string(),
            key: options.key.clone(),
        })
    }

    pub fn photos_url(&self, rover: &str) -> String {
        format!("{}/rovers/{}/photos", self.base_url, rover)
    }
}

impl PhotoSource for MarsPhotosApi {
    #[instrument(skip(self, date), fields(date = %date))]
    async fn fetch_page(
        &self,
        rover: &str,
        date: NaiveDate,
        page: u32,
    ) -> Result<Vec<PhotoRecord>, FetchFailure> {
        let earth_date = format_date(date);
        let page_param = page.to_string();
        let response = self
            .client
            .get(self.photos_url(rover))
            .query(&[
                ("earth_date", earth_date.as_str()),
                ("page", page_param.as_str()),
                ("api_key", self.key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| FetchFailure::new(date, page, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(
                date,
                page,
                FetchCause::Status(status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchFailure::new(date, page, err))?;
        let photos = parse_photos(&body).map_err(|err| FetchFailure::new(date, page, err))?;
        debug!(count = photos.len(), "page fetched");
        Ok(photos)
    }
}

#[derive(Deserialize)]
struct PhotosEnvelope {
    #[serde(default)]
    photos: Option<Vec<PhotoRecord>>,
}

/// Decodes a `/photos` response body. A missing or null `photos` field is an
/// empty page, not an error.
pub fn parse_photos(body: &[u8]) -> Result<Vec<PhotoRecord>, serde_json::Error> {
    let envelope: PhotosEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.photos.unwrap_or_default())
}
