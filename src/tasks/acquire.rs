use std::ops::Deref;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use rand::Rng;
use rand::seq::SliceRandom;
use rover_model::PhotoRecord;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::api::PhotoSource;
use crate::config::AcquisitionOptions;
use crate::dates::{YearRange, sample_dates};
use crate::error::{Error, FetchFailure};
use crate::events::Progress;

/// The shuffled photos of one session. Cloning shares the same records.
#[derive(Debug, Clone)]
pub struct AcquisitionResult {
    photos: Arc<[PhotoRecord]>,
}

impl AcquisitionResult {
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn as_slice(&self) -> &[PhotoRecord] {
        &self.photos
    }
}

impl Default for AcquisitionResult {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<PhotoRecord>> for AcquisitionResult {
    fn from(photos: Vec<PhotoRecord>) -> Self {
        Self {
            photos: photos.into(),
        }
    }
}

impl Deref for AcquisitionResult {
    type Target = [PhotoRecord];

    fn deref(&self) -> &Self::Target {
        &self.photos
    }
}

/// Collects photos for one sampled date per year and shuffles them.
///
/// Rules:
/// - Dates are fetched one after another; only the continuation pages of a
///   single date run concurrently.
/// - A failed first page skips that date. A failed continuation page is
///   dropped on its own.
/// - Continuation starts only when the first page is exactly
///   `api_page_size` long and more than one page per date was requested.
/// - An empty collection is a valid outcome.
///
/// The only error is invalid `options`, reported before any request is made.
#[instrument(skip_all, fields(rover = %options.rover))]
pub async fn run<S, R>(
    options: &AcquisitionOptions,
    source: &S,
    rng: &mut R,
    progress: &watch::Sender<Progress>,
) -> Result<AcquisitionResult, Error>
where
    S: PhotoSource,
    R: Rng + ?Sized,
{
    let range = match options.validate().and_then(|()| options.years()) {
        Ok(range) => range,
        Err(err) => {
            warn!("refusing to start acquisition: {err}");
            let status = Progress::starting(options.start_year, 0);
            progress.send_replace(status.failed(options.end_year));
            return Err(Error::Acquisition(Box::new(err)));
        }
    };

    let mut status = Progress::starting(range.start(), range.year_count());
    progress.send_replace(status.clone());

    let photos = collect(options, range, source, rng, progress, &mut status).await;

    progress.send_replace(status.done(range.end()));
    Ok(AcquisitionResult::from(photos))
}

async fn collect<S, R>(
    options: &AcquisitionOptions,
    range: YearRange,
    source: &S,
    rng: &mut R,
    progress: &watch::Sender<Progress>,
    status: &mut Progress,
) -> Vec<PhotoRecord>
where
    S: PhotoSource,
    R: Rng + ?Sized,
{
    let dates = sample_dates(range, rng);
    let rover = options.rover.as_str();
    let mut photos: Vec<PhotoRecord> = Vec::new();
    let mut failed_dates = 0usize;

    for date in dates {
        *status = status.fetching(date.year());
        progress.send_replace(status.clone());
        debug!(%date, "fetching photos");

        let first = match source.fetch_page(rover, date, 1).await {
            Ok(page) => page,
            Err(failure) => {
                failed_dates += 1;
                log_failure(&failure, "skipping date");
                continue;
            }
        };
        if first.is_empty() {
            debug!(%date, "no photos for date");
            continue;
        }
        info!(%date, count = first.len(), "found photos");

        let full_page = first.len() == options.api_page_size;
        photos.extend(first);
        if full_page && options.pages_per_date > 1 {
            let more = fetch_remaining_pages(source, rover, date, options.pages_per_date).await;
            debug!(%date, count = more.len(), "continuation pages merged");
            photos.extend(more);
        }
    }

    // Decorrelate presentation order from capture date.
    photos.shuffle(rng);
    info!(total = photos.len(), failed_dates, "acquisition complete");
    photos
}

/// Issues pages `2..=pages_per_date` together and keeps whatever arrives.
async fn fetch_remaining_pages<S>(
    source: &S,
    rover: &str,
    date: NaiveDate,
    pages_per_date: u32,
) -> Vec<PhotoRecord>
where
    S: PhotoSource,
{
    let requests = (2..=pages_per_date).map(|page| source.fetch_page(rover, date, page));
    let mut merged = Vec::new();
    for result in join_all(requests).await {
        match result {
            Ok(page) => merged.extend(page),
            Err(failure) => log_failure(&failure, "dropping continuation page"),
        }
    }
    merged
}

fn log_failure(failure: &FetchFailure, action: &str) {
    warn!(
        date = %failure.date,
        page = failure.page,
        cause = %failure.cause,
        "{action}"
    );
}
