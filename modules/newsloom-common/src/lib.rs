pub mod config;
pub mod error;
pub mod rating;
pub mod types;

pub use config::Config;
pub use error::NewsloomError;
pub use rating::{AgencyRatingTable, DEFAULT_AGENCY_WEIGHT};
pub use types::*;
