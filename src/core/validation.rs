//! Field rules gating creation of services, reviews and users.
//!
//! Each `validate_*` function is pure: it returns the per-field failures and
//! never errors. Rules for one field run in order (required, shape, length or
//! range, reference) and only the first failure is kept.

use crate::domain::form::{Locale, ReviewDraft, ServiceDraft, UserDraft};
use crate::domain::model::{Category, NewReview, NewService, NewUser, User};
use std::collections::BTreeMap;
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};

pub const SERVICE_NAME_LEN: (usize, usize) = (3, 150);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 1000);
pub const LOCATION_LEN: (usize, usize) = (5, 200);
pub const PHONE_DIGITS: (usize, usize) = (8, 15);
pub const COMMENT_LEN: (usize, usize) = (5, 500);
pub const RATING_RANGE: (i64, i64) = (1, 5);
pub const USER_NAME_LEN: (usize, usize) = (2, 100);
pub const EMAIL_MAX_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Category,
    Description,
    Location,
    Phone,
    Rating,
    Comment,
    UserId,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Description => "description",
            Field::Location => "location",
            Field::Phone => "phone",
            Field::Rating => "rating",
            Field::Comment => "comment",
            Field::UserId => "user_id",
            Field::Email => "email",
        }
    }

    /// French subject phrase and whether it takes feminine agreement.
    fn fr_subject(&self) -> (&'static str, bool) {
        match self {
            Field::Name => ("Le nom", false),
            Field::Category => ("La catégorie", true),
            Field::Description => ("La description", true),
            Field::Location => ("La localisation", true),
            Field::Phone => ("Le numéro de téléphone", false),
            Field::Rating => ("La note", true),
            Field::Comment => ("Le commentaire", false),
            Field::UserId => ("L'utilisateur", false),
            Field::Email => ("L'adresse e-mail", true),
        }
    }

    fn en_subject(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Description => "Description",
            Field::Location => "Location",
            Field::Phone => "Phone number",
            Field::Rating => "Rating",
            Field::Comment => "Comment",
            Field::UserId => "User",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    NotANumber,
    InvalidChoice,
    InvalidFormat,
    TooShort { min: usize },
    TooLong { max: usize },
    OutOfRange { min: i64, max: i64 },
    DigitCount { min: usize, max: usize },
    UnknownReference,
}

impl FieldError {
    pub fn message(&self, field: Field, locale: Locale) -> String {
        match locale {
            Locale::Fr => self.message_fr(field),
            Locale::En => self.message_en(field),
        }
    }

    fn message_fr(&self, field: Field) -> String {
        let (subject, feminine) = field.fr_subject();
        match (self, field) {
            (FieldError::Required, Field::UserId) => {
                "Veuillez sélectionner un utilisateur".to_string()
            }
            (FieldError::Required, _) => {
                format!("{} est {}", subject, if feminine { "requise" } else { "requis" })
            }
            (FieldError::NotANumber, Field::UserId) => {
                "L'identifiant de l'utilisateur doit être un nombre".to_string()
            }
            (FieldError::NotANumber, _) => format!("{} doit être un nombre", subject),
            (FieldError::InvalidChoice, Field::Category) => format!(
                "La catégorie doit être l'une des suivantes : {}",
                category_list()
            ),
            (FieldError::InvalidChoice, _) => {
                format!("{} n'est pas une option valide", subject)
            }
            (FieldError::InvalidFormat, Field::Phone) => {
                "Le numéro de téléphone ne doit contenir que des chiffres".to_string()
            }
            (FieldError::InvalidFormat, _) => format!("{} n'est pas valide", subject),
            (FieldError::TooShort { min }, _) => {
                format!("{} doit contenir au moins {} caractères", subject, min)
            }
            (FieldError::TooLong { max }, _) => {
                format!("{} doit contenir au plus {} caractères", subject, max)
            }
            (FieldError::OutOfRange { min, max }, _) => {
                format!("{} doit être entre {} et {}", subject, min, max)
            }
            (FieldError::DigitCount { min, max }, _) => {
                format!("{} doit contenir entre {} et {} chiffres", subject, min, max)
            }
            (FieldError::UnknownReference, Field::UserId) => {
                "L'utilisateur sélectionné n'existe pas".to_string()
            }
            (FieldError::UnknownReference, _) => format!("{} est introuvable", subject),
        }
    }

    fn message_en(&self, field: Field) -> String {
        let subject = field.en_subject();
        match (self, field) {
            (FieldError::Required, Field::UserId) => "Please select a user".to_string(),
            (FieldError::Required, _) => format!("{} is required", subject),
            (FieldError::NotANumber, _) => format!("{} must be a number", subject),
            (FieldError::InvalidChoice, Field::Category) => {
                format!("Category must be one of: {}", category_list())
            }
            (FieldError::InvalidChoice, _) => format!("{} is not a valid option", subject),
            (FieldError::InvalidFormat, Field::Phone) => {
                "Phone number must contain only digits, spaces, dashes, or parentheses".to_string()
            }
            (FieldError::InvalidFormat, _) => format!("{} is not valid", subject),
            (FieldError::TooShort { min }, _) => {
                format!("{} must be at least {} characters long", subject, min)
            }
            (FieldError::TooLong { max }, _) => {
                format!("{} must be at most {} characters long", subject, max)
            }
            (FieldError::OutOfRange { min, max }, _) => {
                format!("{} must be between {} and {}", subject, min, max)
            }
            (FieldError::DigitCount { min, max }, _) => {
                format!("{} must be between {} and {} digits", subject, min, max)
            }
            (FieldError::UnknownReference, Field::UserId) => {
                "The selected user does not exist".to_string()
            }
            (FieldError::UnknownReference, _) => format!("{} does not exist", subject),
        }
    }
}

fn category_list() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Field failures keyed by field. Empty means ready to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first error recorded for a field.
    pub fn add(&mut self, field: Field, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }

    fn check<T>(&mut self, field: Field, outcome: std::result::Result<T, FieldError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Field name to localized message, the shape forms display.
    pub fn messages(&self, locale: Locale) -> BTreeMap<&'static str, String> {
        self.errors
            .iter()
            .map(|(field, error)| (field.as_str(), error.message(*field, locale)))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error.message(*field, Locale::En)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: &Option<String>) -> Result<&str, FieldError> {
    present(value).ok_or(FieldError::Required)
}

fn length_within(value: &str, (min, max): (usize, usize)) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min {
        Err(FieldError::TooShort { min })
    } else if len > max {
        Err(FieldError::TooLong { max })
    } else {
        Ok(())
    }
}

fn text(value: &Option<String>, bounds: (usize, usize)) -> Result<String, FieldError> {
    let value = required(value)?;
    length_within(value, bounds)?;
    Ok(value.to_string())
}

fn category(value: &Option<String>) -> Result<Category, FieldError> {
    required(value)?
        .parse()
        .map_err(|_| FieldError::InvalidChoice)
}

/// Strips whitespace, hyphens and parentheses from a phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// `Ok(None)` when no phone was given at all.
fn phone(value: &Option<String>) -> Result<Option<String>, FieldError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    let digits = normalize_phone(raw);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::InvalidFormat);
    }
    let (min, max) = PHONE_DIGITS;
    if digits.len() < min || digits.len() > max {
        return Err(FieldError::DigitCount { min, max });
    }
    Ok(Some(raw.to_string()))
}

fn rating(value: &Option<String>) -> Result<u8, FieldError> {
    let (min, max) = RATING_RANGE;
    let parsed: i64 = required(value)?.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            FieldError::OutOfRange { min, max }
        }
        _ => FieldError::NotANumber,
    })?;
    if parsed < min || parsed > max {
        return Err(FieldError::OutOfRange { min, max });
    }
    u8::try_from(parsed).map_err(|_| FieldError::OutOfRange { min, max })
}

fn user_reference(value: &Option<String>, known_users: &[User]) -> Result<i64, FieldError> {
    let id: i64 = required(value)?
        .parse()
        .map_err(|_| FieldError::NotANumber)?;
    if known_users.iter().any(|u| u.id == id) {
        Ok(id)
    } else {
        Err(FieldError::UnknownReference)
    }
}

fn email(value: &Option<String>) -> Result<String, FieldError> {
    let value = required(value)?;
    if !value.contains('@') {
        return Err(FieldError::InvalidFormat);
    }
    if value.chars().count() > EMAIL_MAX_LEN {
        return Err(FieldError::TooLong { max: EMAIL_MAX_LEN });
    }
    Ok(value.to_lowercase())
}

pub fn validate_service(draft: &ServiceDraft, known_users: &[User]) -> ValidationErrors {
    match prepare_service(draft, known_users) {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

pub fn validate_review(draft: &ReviewDraft, known_users: &[User]) -> ValidationErrors {
    // The service id comes from the page, not the form, so any value works here.
    match prepare_review(draft, 0, known_users) {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

pub fn validate_user(draft: &UserDraft) -> ValidationErrors {
    match prepare_user(draft) {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

/// Validates and, when clean, builds the request body. Values are trimmed.
pub fn prepare_service(
    draft: &ServiceDraft,
    known_users: &[User],
) -> Result<NewService, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = errors.check(Field::Name, text(&draft.name, SERVICE_NAME_LEN));
    let category = errors.check(Field::Category, category(&draft.category));
    let description = errors.check(Field::Description, text(&draft.description, DESCRIPTION_LEN));
    let location = errors.check(Field::Location, text(&draft.location, LOCATION_LEN));
    let phone = errors.check(Field::Phone, phone(&draft.phone));
    let user_id = errors.check(Field::UserId, user_reference(&draft.user_id, known_users));

    match (name, category, description, location, phone, user_id) {
        (Some(name), Some(category), Some(description), Some(location), Some(phone), Some(user_id))
            if errors.is_empty() =>
        {
            Ok(NewService {
                name,
                category,
                description,
                location,
                phone,
                hours: present(&draft.hours).map(str::to_string),
                user_id,
            })
        }
        _ => Err(errors),
    }
}

pub fn prepare_review(
    draft: &ReviewDraft,
    service_provider_id: i64,
    known_users: &[User],
) -> Result<NewReview, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let rating = errors.check(Field::Rating, rating(&draft.rating));
    let comment = errors.check(Field::Comment, text(&draft.comment, COMMENT_LEN));
    let user_id = errors.check(Field::UserId, user_reference(&draft.user_id, known_users));

    match (rating, comment, user_id) {
        (Some(rating), Some(comment), Some(user_id)) if errors.is_empty() => Ok(NewReview {
            rating,
            comment,
            user_id,
            service_provider_id,
        }),
        _ => Err(errors),
    }
}

pub fn prepare_user(draft: &UserDraft) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = errors.check(Field::Name, text(&draft.name, USER_NAME_LEN));
    let email = errors.check(Field::Email, email(&draft.email));

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(NewUser { name, email }),
        _ => Err(errors),
    }
}
