use clap::Parser;
use konekte::app::view;
use konekte::core::directory::Submission;
use konekte::utils::error::KonekteError;
use konekte::utils::{logger, validation::Validate};
use konekte::{CliConfig, Command, Directory, HttpDirectoryClient, Locale, SearchFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let client = HttpDirectoryClient::from_config(&settings)?;
    let directory = Directory::new(client);

    if let Err(e) = run(&directory, &config.command, settings.locale).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(
    directory: &Directory<HttpDirectoryClient>,
    command: &Command,
    locale: Locale,
) -> Result<(), KonekteError> {
    match command {
        Command::Users => {
            let users = directory.users().await?;
            print!("{}", view::render_users(&users));
        }
        Command::List { category, search } => {
            let filter = SearchFilter::parse(category, search.as_str()).map_err(|reason| {
                KonekteError::InvalidConfigValueError {
                    field: "category".to_string(),
                    value: category.clone(),
                    reason,
                }
            })?;
            let listings = directory.browse(&filter).await?;
            print!("{}", view::render_listings(&listings, locale));
        }
        Command::Show { id } => {
            let listing = directory.service(*id).await?;
            print!("{}", view::render_detail(&listing, locale));
        }
        Command::Delete { id } => {
            directory.delete_service(*id).await?;
            println!("✅ Service {} deleted", id);
        }
        Command::AddUser { .. } => {
            if let Some(draft) = command.user_draft() {
                let outcome = directory.submit_user(&draft).await?;
                report(outcome, locale, |user| format!("✅ User {} created: {}", user.id, user.name));
            }
        }
        Command::AddService { .. } => {
            if let Some(draft) = command.service_draft() {
                let outcome = directory.submit_service(&draft).await?;
                report(outcome, locale, |service| {
                    format!("✅ Service {} created: {}", service.id, service.name)
                });
            }
        }
        Command::Review { service_id, .. } => {
            if let Some(draft) = command.review_draft() {
                let outcome = directory.submit_review(*service_id, &draft).await?;
                report(outcome, locale, |review| {
                    format!("✅ Review {} added {}", review.id, view::stars(review.rating))
                });
            }
        }
    }
    Ok(())
}

fn report<T>(outcome: Submission<T>, locale: Locale, created: impl Fn(&T) -> String) {
    match outcome {
        Submission::Created(value) => println!("{}", created(&value)),
        Submission::Invalid(errors) => {
            eprint!("{}", view::render_errors(&errors, locale));
            std::process::exit(4);
        }
    }
}
