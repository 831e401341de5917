use crate::core::matcher::SearchFilter;
use crate::core::rating::summarize;
use crate::core::validation::{prepare_review, prepare_service, prepare_user, ValidationErrors};
use crate::domain::form::{ReviewDraft, ServiceDraft, UserDraft};
use crate::domain::model::{RatingSummary, Review, ServiceProvider, ServiceQuery, User};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;

/// Outcome of a create operation that passed the transport layer.
///
/// Local field failures are a value here, not an error: they never reach
/// the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Created(T),
    Invalid(ValidationErrors),
}

impl<T> Submission<T> {
    pub fn created(self) -> Option<T> {
        match self {
            Submission::Created(value) => Some(value),
            Submission::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Submission::Created(_) => None,
            Submission::Invalid(errors) => Some(errors),
        }
    }
}

/// A service with its rating computed from the reviews it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceListing {
    pub service: ServiceProvider,
    pub rating: RatingSummary,
}

impl From<ServiceProvider> for ServiceListing {
    fn from(service: ServiceProvider) -> Self {
        let rating = summarize(&service.reviews);
        Self { service, rating }
    }
}

/// Entry point for the presentation layer: fetches snapshots from the API,
/// runs the pure core over them and gates every mutation behind validation.
pub struct Directory<A: DirectoryApi> {
    api: A,
}

impl<A: DirectoryApi> Directory<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        let users = self.api.list_users().await.inspect_err(|e| {
            tracing::error!("❌ Failed to fetch users: {}", e);
        })?;
        tracing::debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Category narrows the request server-side; free text is matched locally
    /// against the returned snapshot.
    pub async fn browse(&self, filter: &SearchFilter) -> Result<Vec<ServiceListing>> {
        let services = self
            .api
            .list_services(&ServiceQuery::category(filter.category))
            .await
            .inspect_err(|e| tracing::error!("❌ Failed to fetch services: {}", e))?;
        tracing::debug!("Fetched {} services", services.len());

        let listings: Vec<ServiceListing> = filter
            .apply(&services)
            .into_iter()
            .cloned()
            .map(ServiceListing::from)
            .collect();
        tracing::debug!("{} services match {:?}", listings.len(), filter);
        Ok(listings)
    }

    pub async fn service(&self, id: i64) -> Result<ServiceListing> {
        let service = self
            .api
            .get_service(id)
            .await
            .inspect_err(|e| tracing::error!("❌ Failed to fetch service {}: {}", id, e))?;
        Ok(ServiceListing::from(service))
    }

    pub async fn reviews(&self, service_id: i64) -> Result<(Vec<Review>, RatingSummary)> {
        let reviews = self
            .api
            .list_reviews(Some(service_id))
            .await
            .inspect_err(|e| {
                tracing::error!("❌ Failed to fetch reviews for service {}: {}", service_id, e)
            })?;
        let summary = summarize(&reviews);
        Ok((reviews, summary))
    }

    pub async fn submit_user(&self, draft: &UserDraft) -> Result<Submission<User>> {
        let body = match prepare_user(draft) {
            Ok(body) => body,
            Err(errors) => return Ok(self.rejected_locally("user", errors)),
        };

        let user = self
            .api
            .create_user(&body)
            .await
            .inspect_err(|e| tracing::warn!("⚠️ User creation failed: {}", e))?;
        tracing::info!("✅ Created user {}", user.id);
        Ok(Submission::Created(user))
    }

    pub async fn submit_service(&self, draft: &ServiceDraft) -> Result<Submission<ServiceProvider>> {
        let known_users = self.users().await?;
        let body = match prepare_service(draft, &known_users) {
            Ok(body) => body,
            Err(errors) => return Ok(self.rejected_locally("service", errors)),
        };

        let service = self
            .api
            .create_service(&body)
            .await
            .inspect_err(|e| tracing::warn!("⚠️ Service creation failed: {}", e))?;
        tracing::info!("✅ Created service {} ({})", service.id, service.name);
        Ok(Submission::Created(service))
    }

    pub async fn submit_review(
        &self,
        service_id: i64,
        draft: &ReviewDraft,
    ) -> Result<Submission<Review>> {
        let known_users = self.users().await?;
        let body = match prepare_review(draft, service_id, &known_users) {
            Ok(body) => body,
            Err(errors) => return Ok(self.rejected_locally("review", errors)),
        };

        let review = self
            .api
            .create_review(&body)
            .await
            .inspect_err(|e| tracing::warn!("⚠️ Review creation failed: {}", e))?;
        tracing::info!("✅ Added review {} to service {}", review.id, service_id);
        Ok(Submission::Created(review))
    }

    pub async fn delete_service(&self, id: i64) -> Result<()> {
        self.api
            .delete_service(id)
            .await
            .inspect_err(|e| tracing::warn!("⚠️ Deleting service {} failed: {}", id, e))?;
        tracing::info!("🗑️ Deleted service {}", id);
        Ok(())
    }

    fn rejected_locally<T>(&self, what: &str, errors: ValidationErrors) -> Submission<T> {
        tracing::debug!("{} draft rejected locally: {}", what, errors);
        Submission::Invalid(errors)
    }
}
