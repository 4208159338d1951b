//! Awardboard - employee award nominations dashboard
//!
//! A CLI over the in-memory nominations store: list and search nominations,
//! review them, view dashboard metrics and insights, and export.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid arguments, unknown id, validation, I/O)

use anyhow::{Context, Result};
use awardboard::cli::{Args, Command, OutputFormat, SubmitArgs};
use awardboard::config::{Config, CONFIG_FILE};
use awardboard::generator::{self, GeneratorConfig};
use awardboard::models::{User, UserRole};
use awardboard::report;
use awardboard::submission::{DocumentUpload, NominationForm};
use awardboard::{MockApi, NominationStore};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Where the effective configuration came from.
enum ConfigSource {
    File(PathBuf),
    Defaults,
    /// The default file exists but could not be parsed.
    Invalid(anyhow::Error),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if let Command::InitConfig { force } = args.command {
        return handle_init_config(force);
    }

    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(log_level(&args, &config));

    debug!("Awardboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match source {
        ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::Invalid(e) => warn!("Failed to load config, using defaults: {:#}", e),
    }

    if let Err(e) = run(args, config).await {
        error!("Command failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .awardboard.toml.
fn handle_init_config(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() && !force {
        eprintln!(
            "⚠️  {} already exists. Remove it first or pass --force.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the data seed, page size and integrations.");
    Ok(())
}

/// Pick the log level from the flags, then the config file.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging. Logs go to stderr so command output stays clean.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::File(PathBuf::from(CONFIG_FILE)))),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Invalid(e))),
    }
}

/// Start a spinner on stderr unless output is quiet.
fn spinner(show: bool, message: &str) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

/// Generate the data set and wrap it in the API facade.
fn build_api(config: &Config, now: DateTime<Utc>, show_progress: bool) -> Result<MockApi> {
    let pb = spinner(show_progress, "Generating nominations...");
    let generated = generator::generate(&GeneratorConfig::from(&config.data), now);
    finish(pb);
    let dataset = generated.context("Failed to generate the nominations data set")?;

    let current_user = dataset
        .users
        .iter()
        .find(|u| u.role == UserRole::Admin)
        .cloned()
        .unwrap_or_else(|| User {
            id: "admin".to_string(),
            name: "Dashboard Admin".to_string(),
            email: "admin@awardboard.local".to_string(),
            role: UserRole::Admin,
            department: "HR".to_string(),
        });
    debug!("Acting as {} <{}>", current_user.name, current_user.email);

    let store = Arc::new(NominationStore::new(dataset.nominations));
    Ok(MockApi::new(store, dataset.users, current_user)
        .with_latency(Duration::from_millis(config.api.simulated_latency_ms)))
}

/// Run the selected command.
async fn run(args: Args, config: Config) -> Result<()> {
    let now = args.now.unwrap_or_else(Utc::now);
    let format = OutputFormat::from_config(&config.general.output_format);
    let api = build_api(&config, now, !args.quiet)?;

    let output = match args.command {
        Command::List(list) => {
            let request = list.to_query(config.api.page_size);
            let page = api.get_nominations(&request, now).await?;
            match format {
                OutputFormat::Text => report::generate_nominations_text(&page),
                OutputFormat::Markdown => report::generate_nominations_markdown(&page),
                OutputFormat::Json => report::generate_json(&page)?,
            }
        }

        Command::Show { id } => {
            let record = api.get_nomination_by_id(&id).await?;
            match format {
                OutputFormat::Json => report::generate_json(&record)?,
                _ => report::generate_nomination_markdown(&record, config.report.include_evidence),
            }
        }

        Command::Metrics => {
            let metrics = api.get_dashboard_metrics(now).await;
            match format {
                OutputFormat::Text => report::generate_dashboard_text(&metrics),
                OutputFormat::Markdown => {
                    let insights = api.get_insights().await;
                    report::generate_dashboard_markdown(
                        &metrics,
                        &insights,
                        now,
                        config.report.top_departments,
                    )
                }
                OutputFormat::Json => report::generate_json(&metrics)?,
            }
        }

        Command::Insights => {
            let insights = api.get_insights().await;
            match format {
                OutputFormat::Text => report::generate_insights_text(&insights),
                OutputFormat::Markdown => {
                    report::generate_insights_markdown(&insights, config.report.top_departments)
                }
                OutputFormat::Json => report::generate_json(&insights)?,
            }
        }

        Command::SetStatus { id, status } => {
            let record = api.update_nomination_status(&id, status).await?;
            match format {
                OutputFormat::Json => report::generate_json(&record)?,
                _ => format!(
                    "✅ Nomination {} for {} is now {} {}\n",
                    record.id,
                    record.employee_name,
                    record.status.emoji(),
                    record.status
                ),
            }
        }

        Command::Submit(submit) => {
            let form = build_form(submit)?;
            let record = api.submit_nomination(&form, now).await?;
            match format {
                OutputFormat::Text => format!(
                    "✅ Submitted nomination {} for {} ({})\n",
                    record.id, record.employee_name, record.award_type
                ),
                OutputFormat::Markdown => report::generate_nomination_markdown(&record, false),
                OutputFormat::Json => report::generate_json(&record)?,
            }
        }

        Command::Export {
            export_format,
            output,
        } => {
            let pb = spinner(!args.quiet, "Exporting nominations...");
            let exported = api.export_nominations(export_format, now).await;
            finish(pb);
            let artifact = exported?;

            let path = output.unwrap_or_else(|| PathBuf::from(&artifact.filename));
            std::fs::write(&path, &artifact.content)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            info!("Wrote {} bytes to {}", artifact.content.len(), path.display());

            match format {
                OutputFormat::Json => report::generate_json(&artifact)?,
                _ => format!(
                    "✅ Exported {} nominations ({}) to {}\n",
                    artifact.records,
                    artifact.format,
                    path.display()
                ),
            }
        }

        Command::Users => {
            let users = api.get_users().await;
            match format {
                OutputFormat::Json => report::generate_json(&users)?,
                _ => report::generate_users_text(&users),
            }
        }

        Command::Settings => {
            let shown = api.update_integration_settings(&config.integrations).await?;
            match format {
                OutputFormat::Json => report::generate_json(&shown)?,
                _ => {
                    let body = toml::to_string_pretty(&shown)
                        .context("Failed to render integration settings")?;
                    format!("[integrations]\n{}", body)
                }
            }
        }

        Command::InitConfig { force } => {
            handle_init_config(force)?;
            String::new()
        }
    };

    print!("{}", output);
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }

    Ok(())
}

/// Turn the submit flags into a form, reading document sizes from disk.
fn build_form(submit: SubmitArgs) -> Result<NominationForm> {
    let mut supporting_documents = Vec::with_capacity(submit.documents.len());
    for path in &submit.documents {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        supporting_documents.push(DocumentUpload {
            name,
            size: meta.len(),
        });
    }

    Ok(NominationForm {
        resource_name: submit.nominee,
        award_type: submit.award_type,
        project_aligned: submit.project,
        verbiage: submit.verbiage,
        supporting_acknowledgement: submit.acknowledgement,
        core_values: submit.core_values,
        overall_rating: submit.rating,
        supporting_documents,
    })
}
