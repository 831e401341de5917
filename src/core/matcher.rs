use crate::domain::model::{Category, ServiceProvider};

/// Search state owned by the caller and passed in on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub category: Option<Category>,
    pub query: String,
}

impl SearchFilter {
    pub fn new(category: Option<Category>, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// An empty category string means "all categories".
    pub fn parse(category: &str, query: impl Into<String>) -> Result<Self, String> {
        let category = match category.trim() {
            "" => None,
            name => Some(name.parse()?),
        };
        Ok(Self::new(category, query))
    }

    pub fn apply<'a>(&self, services: &'a [ServiceProvider]) -> Vec<&'a ServiceProvider> {
        filter(services, self.category, &self.query)
    }
}

/// Stable filter by exact category and case-insensitive text over name,
/// description and location. Both restrictions must hold.
pub fn filter<'a>(
    services: &'a [ServiceProvider],
    category: Option<Category>,
    query: &str,
) -> Vec<&'a ServiceProvider> {
    let needle = query.to_lowercase();
    services
        .iter()
        .filter(|s| category.map_or(true, |c| s.category == c))
        .filter(|s| needle.is_empty() || matches_text(s, &needle))
        .collect()
}

fn matches_text(service: &ServiceProvider, needle: &str) -> bool {
    [&service.name, &service.description, &service.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
