use crate::domain::form::Locale;
use crate::domain::model::{NewReview, NewService, NewUser, Review, ServiceProvider, ServiceQuery, User};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn locale(&self) -> Locale;
}

/// Remote CRUD boundary of the directory.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceProvider>>;
    async fn get_service(&self, id: i64) -> Result<ServiceProvider>;
    async fn create_service(&self, service: &NewService) -> Result<ServiceProvider>;
    async fn delete_service(&self, id: i64) -> Result<()>;

    async fn list_reviews(&self, service_provider_id: Option<i64>) -> Result<Vec<Review>>;
    async fn create_review(&self, review: &NewReview) -> Result<Review>;
}
