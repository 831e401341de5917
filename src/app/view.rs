//! Terminal rendering. Rounding and star strings live here and nowhere else.

use crate::core::directory::ServiceListing;
use crate::core::validation::ValidationErrors;
use crate::domain::form::Locale;
use crate::domain::model::{RatingSummary, Review, User};
use std::fmt::Write;

const DESCRIPTION_PREVIEW: usize = 150;

pub fn format_average(summary: &RatingSummary) -> String {
    format!("{:.1}", summary.average)
}

pub fn stars(rating: u8) -> String {
    "⭐".repeat(usize::from(rating))
}

/// `None` when there is nothing to average.
pub fn rating_line(summary: &RatingSummary, locale: Locale) -> Option<String> {
    if summary.is_empty() {
        return None;
    }
    let noun = match locale {
        Locale::Fr => "avis",
        Locale::En if summary.count == 1 => "review",
        Locale::En => "reviews",
    };
    Some(format!("⭐ {} ({} {})", format_average(summary), summary.count, noun))
}

pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn render_listing(listing: &ServiceListing, locale: Locale) -> String {
    let service = &listing.service;
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  #{}", service.category, service.name, service.id);
    let _ = writeln!(out, "  📍 {}", service.location);
    let _ = writeln!(out, "  {}", preview(&service.description, DESCRIPTION_PREVIEW));
    if let Some(phone) = &service.phone {
        let _ = writeln!(out, "  📞 {}", phone);
    }
    if let Some(hours) = &service.hours {
        let _ = writeln!(out, "  🕐 {}", hours);
    }
    if let Some(line) = rating_line(&listing.rating, locale) {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

pub fn render_listings(listings: &[ServiceListing], locale: Locale) -> String {
    if listings.is_empty() {
        return match locale {
            Locale::Fr => "Aucun service trouvé.\n".to_string(),
            Locale::En => "No services found.\n".to_string(),
        };
    }
    listings
        .iter()
        .map(|l| render_listing(l, locale))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_review(review: &Review, locale: Locale) -> String {
    let anonymous = match locale {
        Locale::Fr => "Anonyme",
        Locale::En => "Anonymous",
    };
    format!(
        "  {} {}\n    {}\n",
        review.reviewer_name().unwrap_or(anonymous),
        stars(review.rating),
        review.comment
    )
}

pub fn render_detail(listing: &ServiceListing, locale: Locale) -> String {
    let service = &listing.service;
    let mut out = String::new();
    let _ = writeln!(out, "{}", service.name);
    let _ = writeln!(out, "{}", service.category);
    let _ = writeln!(out, "📍 {}", service.location);
    if let Some(phone) = &service.phone {
        let _ = writeln!(out, "📞 {}", phone);
    }
    if let Some(hours) = &service.hours {
        let _ = writeln!(out, "🕐 {}", hours);
    }
    let _ = writeln!(out, "{}", service.description);
    let _ = writeln!(out);

    let heading = match locale {
        Locale::Fr => "Avis",
        Locale::En => "Reviews",
    };
    match rating_line(&listing.rating, locale) {
        Some(line) => {
            let _ = writeln!(out, "{} ({}) {}", heading, listing.rating.count, line);
        }
        None => {
            let _ = writeln!(out, "{} (0)", heading);
            let _ = writeln!(
                out,
                "  {}",
                match locale {
                    Locale::Fr => "Pas d'avis encore",
                    Locale::En => "No reviews yet",
                }
            );
        }
    }
    for review in &service.reviews {
        out.push_str(&render_review(review, locale));
    }
    out
}

pub fn render_users(users: &[User]) -> String {
    users
        .iter()
        .map(|u| format!("{:>4}  {}\n", u.id, u.name))
        .collect()
}

pub fn render_errors(errors: &ValidationErrors, locale: Locale) -> String {
    errors
        .messages(locale)
        .into_iter()
        .map(|(field, message)| format!("  {}: {}\n", field, message))
        .collect()
}
