pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod events;
pub mod gallery;
pub mod pagination;
pub mod tasks {
    pub mod acquire;
    pub mod progress;
}

pub use error::{Error, FetchCause, FetchFailure};
pub use rover_model::{Camera, PhotoRecord, Rover, RoverStatus};
pub use tasks::acquire::AcquisitionResult;
