use std::fmt;

/// Coarse lifecycle of one acquisition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Done,
    Failed,
}

/// Status surface published while photos are being acquired.
///
/// Only the latest value matters, so it travels over a `watch` channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Year whose sampled date is being fetched.
    pub current_year: i32,
    pub total_years: usize,
    pub message: String,
    pub state: LoadState,
}

impl Progress {
    pub fn starting(first_year: i32, total_years: usize) -> Self {
        Self {
            current_year: first_year,
            total_years,
            message: "Starting to fetch photos...".to_string(),
            state: LoadState::Loading,
        }
    }

    pub fn fetching(&self, year: i32) -> Self {
        Self {
            current_year: year,
            message: format!("Fetching photos from {year}..."),
            ..self.clone()
        }
    }

    pub fn done(&self, last_year: i32) -> Self {
        Self {
            current_year: last_year,
            message: "Done!".to_string(),
            state: LoadState::Done,
            ..self.clone()
        }
    }

    pub fn failed(&self, last_year: i32) -> Self {
        Self {
            current_year: last_year,
            message: "Error fetching photos".to_string(),
            state: LoadState::Failed,
            ..self.clone()
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state != LoadState::Loading
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (year {} of a {}-year span)",
            self.message, self.current_year, self.total_years
        )
    }
}
