//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{AwardType, CoreValue, NominationStatus};
use crate::query::{DateRange, NominationFilters, NominationQuery};
use crate::report::ExportFormat;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Awardboard - employee award nominations dashboard
///
/// Browse, filter and review award nominations, view dashboard metrics
/// and AI insights, and export the collection. Data is generated from a
/// seed so every run with the same seed and clock is reproducible.
///
/// Examples:
///   awardboard list --search engineering --date-range last30days
///   awardboard --seed 7 --now 2024-06-01T00:00:00Z metrics
///   awardboard show <ID> --format markdown
///   awardboard export --export-format csv --output nominations.csv
///   awardboard init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .awardboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the generated data set
    #[arg(long, env = "AWARDBOARD_SEED", global = true)]
    pub seed: Option<u64>,

    /// Clock used for date filters and metrics (RFC 3339)
    ///
    /// Defaults to the current time.
    #[arg(long, env = "AWARDBOARD_NOW", value_parser = parse_now, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Number of nominations to generate
    #[arg(long, value_name = "COUNT", global = true)]
    pub records: Option<usize>,

    /// Simulated latency per API call, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub latency_ms: Option<u64>,

    /// Output format (text, markdown, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List nominations, newest first
    List(ListArgs),

    /// Show one nomination with its evidence
    Show {
        /// Nomination id
        id: String,
    },

    /// Show dashboard metrics
    Metrics,

    /// Show bias, sentiment and status insights
    Insights,

    /// Change the review status of a nomination
    SetStatus {
        /// Nomination id
        id: String,

        /// pending, approved, rejected, under-review
        status: NominationStatus,
    },

    /// Submit a new nomination as the current user
    Submit(SubmitArgs),

    /// Export every nomination to a file
    Export {
        /// csv, json or markdown
        #[arg(long, default_value = "csv", value_name = "FORMAT")]
        export_format: ExportFormat,

        /// Output path (defaults to nominations_export_<date>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the user directory
    Users,

    /// Validate and show the integration settings
    Settings,

    /// Generate a default .awardboard.toml configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Paging, search and filter flags for `list`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// 1-based page number (0 is treated as 1)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Nominations per page (defaults to the configured page size)
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<usize>,

    /// Case-insensitive search on name, title and department
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this award type (monthly, quarterly, yearly)
    #[arg(long, value_name = "TYPE")]
    pub award_type: Option<AwardType>,

    /// Only this department
    #[arg(long)]
    pub department: Option<String>,

    /// all, last7days, last30days, last3months
    #[arg(long, default_value = "all", value_name = "RANGE")]
    pub date_range: DateRange,
}

impl ListArgs {
    /// Build the page request. Pages below 1 are clamped to 1.
    pub fn to_query(&self, default_page_size: usize) -> NominationQuery {
        NominationQuery {
            page: self.page.max(1),
            page_size: self.page_size.unwrap_or(default_page_size),
            search: self.search.clone(),
            filters: NominationFilters {
                award_type: self.award_type,
                department: self.department.clone(),
                date_range: self.date_range,
            },
        }
    }
}

/// Form fields for `submit`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Full name of the nominee
    #[arg(long, value_name = "NAME")]
    pub nominee: String,

    /// monthly, quarterly or yearly
    #[arg(long, value_name = "TYPE")]
    pub award_type: Option<AwardType>,

    /// Project the nominee is aligned to
    #[arg(long)]
    pub project: Option<String>,

    /// Why the nominee deserves the award (at least 50 characters)
    #[arg(long)]
    pub verbiage: String,

    /// Supporting acknowledgement
    #[arg(long)]
    pub acknowledgement: String,

    /// Core values (comma-separated)
    ///
    /// Example: --core-values team-work,ownership
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    pub core_values: Vec<CoreValue>,

    /// Overall rating, 1 to 5
    #[arg(long, default_value = "0")]
    pub rating: u8,

    /// Supporting document to attach (repeatable)
    #[arg(long = "document", value_name = "FILE")]
    pub documents: Vec<PathBuf>,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a config file value, falling back to text for unknown names.
    pub fn from_config(value: &str) -> Self {
        <OutputFormat as clap::ValueEnum>::from_str(value, true).unwrap_or_default()
    }
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::List(list) = &self.command {
            if list.page_size == Some(0) {
                return Err("Page size must be at least 1".to_string());
            }
        }

        if let Command::Submit(form) = &self.command {
            for doc in &form.documents {
                if !doc.is_file() {
                    return Err(format!("Document does not exist: {}", doc.display()));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            config: None,
            seed: None,
            now: None,
            records: None,
            latency_ms: None,
            format: None,
            verbose: false,
            quiet: false,
            command,
        }
    }

    fn list(page: usize, page_size: Option<usize>) -> Command {
        Command::List(ListArgs {
            page,
            page_size,
            ..ListArgs::default()
        })
    }

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from([
            "awardboard",
            "--seed",
            "7",
            "list",
            "--search",
            "ann",
            "--award-type",
            "quarterly",
            "--date-range",
            "last-30-days",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.seed, Some(7));
        assert_eq!(args.format, Some(OutputFormat::Json));
        match args.command {
            Command::List(list) => {
                assert_eq!(list.page, 1);
                assert_eq!(list.search.as_deref(), Some("ann"));
                assert_eq!(list.award_type, Some(AwardType::Quarterly));
                assert_eq!(list.date_range, DateRange::Last30Days);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_now() {
        let args =
            Args::try_parse_from(["awardboard", "--now", "2024-06-01T10:00:00+02:00", "metrics"])
                .unwrap();
        assert_eq!(
            args.now.unwrap().to_rfc3339(),
            "2024-06-01T08:00:00+00:00"
        );
        assert!(Args::try_parse_from(["awardboard", "--now", "yesterday", "metrics"]).is_err());
    }

    #[test]
    fn test_parse_submit() {
        let args = Args::try_parse_from([
            "awardboard",
            "submit",
            "--nominee",
            "Ann Lee",
            "--award-type",
            "monthly",
            "--verbiage",
            "text",
            "--acknowledgement",
            "ack",
            "--core-values",
            "team-work,ownership",
            "--rating",
            "5",
        ])
        .unwrap();

        match args.command {
            Command::Submit(form) => {
                assert_eq!(form.nominee, "Ann Lee");
                assert_eq!(form.core_values, vec![CoreValue::TeamWork, CoreValue::Ownership]);
                assert_eq!(form.rating, 5);
                assert!(form.documents.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_set_status() {
        let args = Args::try_parse_from(["awardboard", "set-status", "abc", "under-review"]).unwrap();
        match args.command {
            Command::SetStatus { id, status } => {
                assert_eq!(id, "abc");
                assert_eq!(status, NominationStatus::UnderReview);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Args::try_parse_from(["awardboard", "set-status", "abc", "done"]).is_err());
    }

    #[test]
    fn test_validation_paging() {
        assert!(make_args(list(1, None)).validate().is_ok());
        assert!(make_args(list(0, None)).validate().is_ok());
        assert!(make_args(list(1, Some(0))).validate().is_err());
    }

    #[test]
    fn test_list_query_clamps_page() {
        let args = ListArgs {
            page: 0,
            search: Some("ann".to_string()),
            department: Some("HR".to_string()),
            ..ListArgs::default()
        };
        let request = args.to_query(10);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.search.as_deref(), Some("ann"));
        assert_eq!(request.filters.department.as_deref(), Some("HR"));
        assert!(request.validate().is_ok());

        let explicit = ListArgs {
            page: 4,
            page_size: Some(25),
            ..ListArgs::default()
        };
        let request = explicit.to_query(10);
        assert_eq!(request.page, 4);
        assert_eq!(request.page_size, 25);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Metrics);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_document() {
        let args = make_args(Command::Submit(SubmitArgs {
            documents: vec![PathBuf::from("/definitely/not/here.pdf")],
            ..SubmitArgs::default()
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Users);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("Markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_config("yaml"), OutputFormat::Text);
    }
}
