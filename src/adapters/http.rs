use crate::domain::model::{NewReview, NewService, NewUser, Review, ServiceProvider, ServiceQuery, User};
use crate::domain::ports::{ConfigProvider, DirectoryApi};
use crate::utils::error::{KonekteError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USERS: &str = "api/users";
const SERVICES: &str = "api/service-providers";
const REVIEWS: &str = "api/reviews";

/// Body of every non-2xx response from the directory API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// reqwest implementation of [`DirectoryApi`].
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(Self::rejection(response, fallback).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn rejection(response: Response, fallback: &str) -> KonekteError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());

        KonekteError::Rejected { status, message }
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(USERS)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response, "Failed to fetch users").await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let url = self.endpoint(USERS)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(user).send().await?;
        Self::decode(response, "Failed to create user").await
    }

    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceProvider>> {
        let mut url = self.endpoint(SERVICES)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(category) = query.category {
                pairs.append_pair("category", category.as_str());
            }
            if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("search", search);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response, "Failed to fetch services").await
    }

    async fn get_service(&self, id: i64) -> Result<ServiceProvider> {
        let url = self.endpoint(&format!("{}/{}", SERVICES, id))?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response, "Service provider not found").await
    }

    async fn create_service(&self, service: &NewService) -> Result<ServiceProvider> {
        let url = self.endpoint(SERVICES)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(service).send().await?;
        Self::decode(response, "Erreur lors de la création du service").await
    }

    async fn delete_service(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&format!("{}/{}", SERVICES, id))?;
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response, "Failed to delete service provider").await)
        }
    }

    async fn list_reviews(&self, service_provider_id: Option<i64>) -> Result<Vec<Review>> {
        let mut url = self.endpoint(REVIEWS)?;
        if let Some(id) = service_provider_id {
            url.query_pairs_mut()
                .append_pair("service_provider_id", &id.to_string());
        }
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response, "Failed to fetch reviews").await
    }

    async fn create_review(&self, review: &NewReview) -> Result<Review> {
        let url = self.endpoint(REVIEWS)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(review).send().await?;
        Self::decode(response, "Erreur lors de l'ajout de l'avis").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = HttpDirectoryClient::new("http://localhost:5555/konekte", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5555/konekte/");
        assert_eq!(
            client.endpoint(USERS).unwrap().as_str(),
            "http://localhost:5555/konekte/api/users"
        );
    }

    #[test]
    fn service_endpoint_includes_id() {
        let client = HttpDirectoryClient::new("http://localhost:5555", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint(&format!("{}/{}", SERVICES, 12)).unwrap().as_str(),
            "http://localhost:5555/api/service-providers/12"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpDirectoryClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, KonekteError::UrlError(_)));
    }
}
