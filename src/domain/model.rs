use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The five fixed service categories. Wire strings match the API exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MedicalHealth,
    Education,
    WaterSanitation,
    CommunityCenters,
    EmergencyServices,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::MedicalHealth,
        Category::Education,
        Category::WaterSanitation,
        Category::CommunityCenters,
        Category::EmergencyServices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MedicalHealth => "Medical/Health",
            Category::Education => "Education",
            Category::WaterSanitation => "Water & Sanitation",
            Category::CommunityCenters => "Community Centers",
            Category::EmergencyServices => "Emergency Services",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                format!("unknown category '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    pub comment: String,
    pub user_id: i64,
    pub service_provider_id: i64,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    /// Reviewer, when the server nests it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Review {
    pub fn reviewer_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Derived from a review sequence, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    pub const EMPTY: RatingSummary = RatingSummary {
        average: 0.0,
        count: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Validated body for `POST /api/service-providers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewService {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub user_id: i64,
}

/// Validated body for `POST /api/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
    pub user_id: i64,
    pub service_provider_id: i64,
}

/// Validated body for `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Query parameters for listing services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl ServiceQuery {
    pub fn category(category: Option<Category>) -> Self {
        Self {
            category,
            search: None,
        }
    }
}

/// Timestamps arrive either as `YYYY-MM-DD HH:MM:SS` or as RFC 3339.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(FORMATS[0]).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(ts.naive_utc()));
        }
        FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&raw, f).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_round_trips_wire_strings() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("medical/health".parse::<Category>().is_err());
    }

    #[test]
    fn service_with_nested_reviews_deserializes() {
        let body = json!({
            "id": 2,
            "name": "Clinique Médico-Sociale de Delmas",
            "category": "Medical/Health",
            "description": "Clinique communautaire offrant consultations",
            "location": "Delmas 33, près du marché",
            "phone": "3456-7890",
            "hours": null,
            "user_id": 2,
            "created_at": "2025-01-10 08:30:00",
            "user": {"id": 2, "name": "Pierre Louis", "email": "pierre.louis@email.ht"},
            "reviews": [{
                "id": 3,
                "rating": 5,
                "comment": "Excellente clinique!",
                "user_id": 5,
                "service_provider_id": 2,
                "created_at": "2025-01-11T09:00:00Z",
                "user": {"id": 5, "name": "Micheline Pierre"}
            }]
        });

        let service: ServiceProvider = serde_json::from_value(body).unwrap();
        assert_eq!(service.category, Category::MedicalHealth);
        assert_eq!(service.hours, None);
        assert_eq!(service.reviews.len(), 1);
        assert_eq!(service.reviews[0].reviewer_name(), Some("Micheline Pierre"));
        assert!(service.created_at.is_some());
        assert!(service.reviews[0].created_at.is_some());
    }

    #[test]
    fn unknown_category_is_a_parse_fault() {
        let body = json!({
            "id": 1,
            "name": "Marché",
            "category": "Markets",
            "description": "Marché en plein air",
            "location": "Pétion-Ville",
            "user_id": 1
        });
        assert!(serde_json::from_value::<ServiceProvider>(body).is_err());
    }

    #[test]
    fn new_service_serializes_category_as_wire_string() {
        let body = NewService {
            name: "Point d'Eau".to_string(),
            category: Category::WaterSanitation,
            description: "Station de distribution d'eau potable".to_string(),
            location: "Avenue N, Cité Soleil".to_string(),
            phone: None,
            hours: None,
            user_id: 1,
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["category"], "Water & Sanitation");
        assert!(value["phone"].is_null());
    }
}
