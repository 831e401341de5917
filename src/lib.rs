pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::http::HttpDirectoryClient;
pub use config::Settings;
pub use core::directory::{Directory, ServiceListing, Submission};
pub use core::matcher::{filter, SearchFilter};
pub use core::rating::{summarize, RatingTally};
pub use core::validation::{
    validate_review, validate_service, validate_user, Field, FieldError, ValidationErrors,
};
pub use domain::form::{Locale, ReviewDraft, ServiceDraft, UserDraft};
pub use domain::model::{Category, RatingSummary, Review, ServiceProvider, User};
pub use utils::error::{KonekteError, Result};
