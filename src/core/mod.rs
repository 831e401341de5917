pub mod directory;
pub mod matcher;
pub mod rating;
pub mod validation;

pub use crate::domain::model::{Category, RatingSummary, Review, ServiceProvider, User};
pub use crate::domain::ports::{ConfigProvider, DirectoryApi};
pub use crate::utils::error::Result;
