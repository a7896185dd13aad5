use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dates::YearRange;
use crate::error::Error;

/// Page size the Mars Rover Photos API documents for `/photos` queries.
///
/// A first page holding exactly this many records is taken as a sign that
/// more pages exist for the same date.
pub const DEFAULT_API_PAGE_SIZE: usize = 25;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Remote API endpoint and credentials.
    pub api: ApiOptions,
    /// Which rover, which years and how many pages to pull.
    pub acquisition: AcquisitionOptions,
    /// Windowing of the acquired collection.
    pub gallery: GalleryOptions,
    /// Optional deterministic seed for date sampling and the final shuffle.
    pub shuffle_seed: Option<u64>,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&s).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(mut self) -> Result<Self, Error> {
        self.acquisition.rover.make_ascii_lowercase();
        self.api.validate()?;
        self.acquisition.validate()?;
        self.gallery.validate()?;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api: ApiOptions::default(),
            acquisition: AcquisitionOptions::default(),
            gallery: GalleryOptions::default(),
            shuffle_seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ApiOptions {
    pub base_url: String,
    pub key: String,
    /// Applied to every single request; there is no overall deadline.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl ApiOptions {
    const fn default_request_timeout() -> Duration {
        Duration::from_secs(30)
    }

    fn validate(&self) -> Result<(), Error> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::config("api.base-url must not be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::config(format!(
                "api.base-url must be an http(s) url, got {base:?}"
            )));
        }
        if self.key.trim().is_empty() {
            return Err(Error::config("api.key must not be empty"));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::config("api.request-timeout must be positive"));
        }
        Ok(())
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key: "DEMO_KEY".to_string(),
            request_timeout: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AcquisitionOptions {
    /// Rover path segment, e.g. `curiosity`. Lowercased by `Configuration::validated`.
    pub rover: String,
    pub start_year: i32,
    /// Inclusive.
    pub end_year: i32,
    /// Pages requested per sampled date; 1 disables continuation.
    pub pages_per_date: u32,
    /// Record count that marks a first page as full.
    pub api_page_size: usize,
}

impl AcquisitionOptions {
    pub fn years(&self) -> Result<YearRange, Error> {
        YearRange::new(self.start_year, self.end_year)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        validate_rover(&self.rover)?;
        self.years()?;
        if self.pages_per_date == 0 {
            return Err(Error::config("acquisition.pages-per-date must be >= 1"));
        }
        if self.api_page_size == 0 {
            return Err(Error::config("acquisition.api-page-size must be >= 1"));
        }
        Ok(())
    }
}

impl Default for AcquisitionOptions {
    fn default() -> Self {
        Self {
            rover: "curiosity".to_string(),
            start_year: 2012,
            end_year: 2023,
            pages_per_date: 1,
            api_page_size: DEFAULT_API_PAGE_SIZE,
        }
    }
}

fn validate_rover(rover: &str) -> Result<(), Error> {
    if rover.is_empty() {
        return Err(Error::config("acquisition.rover must not be empty"));
    }
    let valid = rover
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(Error::config(format!(
            "acquisition.rover {rover:?} may only contain ASCII letters, digits and '-'"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GalleryOptions {
    pub photos_per_page: usize,
}

impl GalleryOptions {
    const fn default_photos_per_page() -> usize {
        12
    }

    fn validate(&self) -> Result<(), Error> {
        if self.photos_per_page == 0 {
            return Err(Error::config("gallery.photos-per-page must be >= 1"));
        }
        Ok(())
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            photos_per_page: Self::default_photos_per_page(),
        }
    }
}
