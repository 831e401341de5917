//! Raw form payloads as typed in by a person, before validation.
//!
//! Every field is an optional string. JSON numbers are accepted and kept as
//! their decimal text so that the validator decides what "not a number" means.

use crate::utils::error::{KonekteError, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    #[serde(default, deserialize_with = "form_value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub hours: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    #[serde(default, deserialize_with = "form_value")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default, deserialize_with = "form_value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "form_value")]
    pub email: Option<String>,
}

impl ServiceDraft {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        from_object(value, "service")
    }
}

impl ReviewDraft {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        from_object(value, "review")
    }
}

impl UserDraft {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        from_object(value, "user")
    }
}

fn from_object<T: de::DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    if !value.is_object() {
        return Err(KonekteError::ContractViolation {
            message: format!("{} payload must be a JSON object, got {}", what, kind(&value)),
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn form_value<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    struct FormValue;

    impl<'de> Visitor<'de> for FormValue {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, a number or null")
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        // Debug keeps the fraction, so 4.0 stays "4.0" and is not read as an integer.
        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(format!("{:?}", v)))
        }
    }

    deserializer.deserialize_option(FormValue)
}

/// Language used for validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-ht" | "french" => Ok(Locale::Fr),
            "en" | "en-us" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}', expected 'fr' or 'en'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_kept_as_text() {
        let draft = ReviewDraft::from_json(json!({
            "rating": 4,
            "comment": "Très bien",
            "user_id": "3"
        }))
        .unwrap();
        assert_eq!(draft.rating.as_deref(), Some("4"));
        assert_eq!(draft.user_id.as_deref(), Some("3"));
    }

    #[test]
    fn floats_keep_their_fraction() {
        let draft = ReviewDraft::from_json(json!({"rating": 4.0, "user_id": 2.5})).unwrap();
        assert_eq!(draft.rating.as_deref(), Some("4.0"));
        assert_eq!(draft.user_id.as_deref(), Some("2.5"));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let draft = ServiceDraft::from_json(json!({"name": "Bibliothèque", "phone": null})).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Bibliothèque"));
        assert_eq!(draft.phone, None);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn non_object_payload_is_a_contract_violation() {
        let err = ServiceDraft::from_json(json!(["name"])).unwrap_err();
        assert!(matches!(err, KonekteError::ContractViolation { .. }));

        let err = ReviewDraft::from_json(serde_json::Value::Null).unwrap_err();
        assert!(matches!(err, KonekteError::ContractViolation { .. }));
    }

    #[test]
    fn wrong_field_shape_is_a_parse_fault() {
        let err = ReviewDraft::from_json(json!({"rating": [5]})).unwrap_err();
        assert!(matches!(err, KonekteError::SerializationError(_)));
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("FR".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Fr);
    }
}
