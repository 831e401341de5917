use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::form::{Locale, ReviewDraft, ServiceDraft, UserDraft};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "konekte")]
#[command(about = "Browse, search and rate community services")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the directory API (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Language for validation messages: fr or en
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List registered users
    Users,

    /// Register a new user
    AddUser {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// List services, optionally narrowed by category and free text
    List {
        /// Exact category name, e.g. "Water & Sanitation"
        #[arg(long, default_value = "")]
        category: String,
        /// Matched against name, description and location
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one service with its reviews
    Show { id: i64 },

    /// Add a new service
    AddService {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        hours: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Delete a service and its reviews
    Delete { id: i64 },

    /// Leave a review on a service
    Review {
        service_id: i64,
        #[arg(long)]
        rating: Option<String>,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
}

impl CliConfig {
    /// Loads the optional config file and applies flag overrides.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                crate::utils::validation::Validate::validate(&file)?;
                Settings::from_toml(&file)
            }
            None => Settings::default(),
        };

        Ok(base
            .with_api_url(self.api_url.clone())
            .with_timeout(self.timeout)
            .with_locale(self.locale))
    }
}

impl Command {
    pub fn user_draft(&self) -> Option<UserDraft> {
        match self {
            Command::AddUser { name, email } => Some(UserDraft {
                name: name.clone(),
                email: email.clone(),
            }),
            _ => None,
        }
    }

    pub fn service_draft(&self) -> Option<ServiceDraft> {
        match self {
            Command::AddService {
                name,
                category,
                description,
                location,
                phone,
                hours,
                user_id,
            } => Some(ServiceDraft {
                name: name.clone(),
                category: category.clone(),
                description: description.clone(),
                location: location.clone(),
                phone: phone.clone(),
                hours: hours.clone(),
                user_id: user_id.clone(),
            }),
            _ => None,
        }
    }

    pub fn review_draft(&self) -> Option<ReviewDraft> {
        match self {
            Command::Review {
                rating,
                comment,
                user_id,
                ..
            } => Some(ReviewDraft {
                rating: rating.clone(),
                comment: comment.clone(),
                user_id: user_id.clone(),
            }),
            _ => None,
        }
    }
}
