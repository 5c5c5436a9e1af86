use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use importer::{
    DatasetFormat, DatasetLoader, DatasetValidator, LoadSummary, LoaderConfig, UnresolvedPolicy,
};
use registry::models::Gender;
use registry::{AgeCategoryCatalog, compute_age, resolve_age_category};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "athletics-import")]
#[command(about = "Athletics results loader and age category classifier", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Date used as "today" for the athlete minimum-age rule
    #[arg(long, global = true)]
    reference_date: Option<NaiveDate>,

    /// What to do with results no age category fits
    #[arg(long, global = true, value_enum)]
    unresolved: Option<UnresolvedPolicy>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load one dataset file
    Load {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,

        /// Write the load summary as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Load every dataset file found in a directory
    BulkLoad {
        #[arg(long, default_value = "./data")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Print the age and age category for a birth date on a given day
    Classify {
        #[arg(long)]
        birth_date: NaiveDate,

        /// M or F (MALE, MEN, FEMALE, WOMEN are accepted too)
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        on: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},registry={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = LoaderConfig::from_env()?;
    if let Some(reference_date) = cli.reference_date {
        config.reference_date = reference_date;
    }
    if let Some(unresolved) = cli.unresolved {
        config.unresolved = unresolved;
    }

    match cli.command {
        Commands::Load {
            file,
            validate_only,
            report,
        } => {
            handle_load(file, validate_only, report, config).await?;
        }
        Commands::BulkLoad {
            directory,
            validate_only,
        } => {
            handle_bulk_load(directory, validate_only, config).await?;
        }
        Commands::Classify {
            birth_date,
            gender,
            on,
        } => {
            handle_classify(birth_date, gender, on);
        }
    }

    Ok(())
}

async fn handle_load(
    file: PathBuf,
    validate_only: bool,
    report: Option<PathBuf>,
    config: LoaderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading dataset from: {}", file.display());

    let summary = process_dataset_file(&file, validate_only, config).await?;
    let Some(summary) = summary else {
        return Ok(());
    };

    if let Some(report_path) = report {
        let json = serde_json::to_string_pretty(&summary)?;
        tokio::fs::write(&report_path, json).await?;
        tracing::info!("Wrote load report to: {}", report_path.display());
    }

    if summary.has_rejections() {
        return Err(format!(
            "{} athlete(s), {} competition(s) and {} result(s) were rejected",
            summary.rejected_athletes.len(),
            summary.rejected_competitions.len(),
            summary.rejected_results.len()
        )
        .into());
    }

    tracing::info!("✓ Load completed successfully!");
    Ok(())
}

async fn handle_bulk_load(
    directory: PathBuf,
    validate_only: bool,
    config: LoaderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Scanning directory for dataset files: {}", directory.display());

    let mut json_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            json_files.push(path);
        }
    }

    if json_files.is_empty() {
        tracing::warn!("No JSON files found in {}", directory.display());
        return Ok(());
    }

    json_files.sort();
    tracing::info!("Found {} dataset file(s)", json_files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for (idx, file_path) in json_files.iter().enumerate() {
        tracing::info!("[{}/{}] Processing: {}", idx + 1, json_files.len(), file_path.display());

        match process_dataset_file(file_path, validate_only, config.clone()).await {
            Ok(Some(summary)) if summary.has_rejections() => {
                error_count += 1;
                tracing::error!("  ✗ Loaded with rejections");
            }
            Ok(_) => {
                success_count += 1;
                tracing::info!("  ✓ Success");
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    tracing::info!("Summary: {} succeeded, {} failed", success_count, error_count);

    if error_count > 0 {
        return Err(format!("{} file(s) failed to load cleanly", error_count).into());
    }

    Ok(())
}

/// Returns `None` when only validation was requested.
async fn process_dataset_file(
    file_path: &Path,
    validate_only: bool,
    config: LoaderConfig,
) -> importer::Result<Option<LoadSummary>> {
    let dataset = DatasetFormat::read(file_path).await?;

    tracing::info!(
        "Validating dataset (v{}): {} athletes, {} competitions, {} results",
        dataset.format_version,
        dataset.athletes.len(),
        dataset.competitions.len(),
        dataset.results.len()
    );
    let validation_report = DatasetValidator::validate(&dataset)?;
    validation_report.log_warnings();
    tracing::info!("✓ Validation successful!");

    if validate_only {
        return Ok(None);
    }

    tracing::info!(
        "Loading with reference date {} (unresolved categories: {:?})",
        config.reference_date,
        config.unresolved
    );
    let loader = DatasetLoader::new(config);
    let (registry, summary) = loader.load(dataset)?;

    let counts = registry.counts();
    tracing::info!(
        "Registry holds {} athletes, {} competitions, {} results",
        counts.athletes,
        counts.competitions,
        counts.results
    );
    summary.log();

    Ok(Some(summary))
}

fn handle_classify(birth_date: NaiveDate, gender: Gender, on: NaiveDate) {
    let catalog = AgeCategoryCatalog::seeded();

    let age = compute_age(birth_date, on);
    match resolve_age_category(age, gender, &catalog) {
        Some(code) => {
            let bounds = code.bounds();
            let max_age = bounds
                .max_age
                .map(|max| max.to_string())
                .unwrap_or_else(|| "unbounded".to_string());
            tracing::info!(
                "Age {} ({}) on {}: {} [{}-{}]",
                age,
                gender.display_name(),
                on,
                code,
                bounds.min_age,
                max_age
            );
        }
        None => {
            tracing::warn!(
                "Age {} ({}) on {}: no eligible age category",
                age,
                gender.display_name(),
                on
            );
        }
    }
}
