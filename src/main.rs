mod cli;

use cli::{Args, CheckArgs, Command, ProjectArgs, ReportArgs, SaveArgs};
use depcomply::adapters::outbound::classifier::TextLicenseClassifier;
use depcomply::adapters::outbound::console::StderrProgressReporter;
use depcomply::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use depcomply::adapters::outbound::golang::GoModuleLister;
use depcomply::adapters::outbound::network::HostingSourceLocator;
use depcomply::application::dto::{DispatchRequest, ScanRequest};
use depcomply::application::use_cases::{
    CheckLicensesUseCase, DispatchComplianceUseCase, ScanLicensesUseCase,
};
use depcomply::compliance::policies::LicenseDictionary;
use depcomply::compliance::services::ManifestCodec;
use depcomply::config::{self, ConfigFile};
use depcomply::ports::outbound::{ManifestReader, OutputPresenter};
use depcomply::shared::error::{ComplianceError, ExitCode};
use depcomply::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

type GoScanUseCase = ScanLicensesUseCase<
    GoModuleLister,
    TextLicenseClassifier,
    HostingSourceLocator,
    StderrProgressReporter,
>;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    let code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }
            eprintln!();

            exit_code_for(&e)
        }
    };

    process::exit(code.as_i32());
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// License problems exit with 1, everything else with 3
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ComplianceError>() {
        Some(e) if e.is_license_issue() => ExitCode::LicenseIssuesDetected,
        _ => ExitCode::ApplicationError,
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Report(report) => run_report(report).await,
        Command::Save(save) => run_save(save),
        Command::Check(check) => run_check(check).await,
    }
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let (project_path, config) = load_project(&args.project)?;
    let use_case = scan_use_case(&config)?;

    let request = ScanRequest::new(project_path, merge_excludes(args.exclude, &config))
        .with_default_version(config.default_version.clone());
    let response = use_case.execute(request).await?;

    let manifest = ManifestCodec::encode(&response.manifest_rows());
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&manifest)?;

    if response.has_failures() {
        return Err(ComplianceError::ScanFailed {
            failures: response.failures,
        }
        .into());
    }

    Ok(())
}

fn run_save(args: SaveArgs) -> Result<()> {
    let (project_path, config) = load_project(&args.project)?;

    let content = FileSystemReader::new().read_manifest(&args.manifest)?;
    let rows = ManifestCodec::decode(&content)?;

    let use_case = DispatchComplianceUseCase::new(
        GoModuleLister::new(),
        StderrProgressReporter::new(),
        config.license_dictionary()?,
    );
    let report = use_case.execute(DispatchRequest::new(
        rows,
        project_path,
        args.save_path,
        args.force,
    ))?;

    eprintln!(
        "✅ Saved {} component(s): {} with notices, {} with full source",
        report.component_count(),
        report.notices.len(),
        report.sources.len()
    );
    eprintln!("📄 Aggregated licenses: {}", report.licenses_file.display());
    Ok(())
}

async fn run_check(args: CheckArgs) -> Result<()> {
    let (project_path, config) = load_project(&args.project)?;
    let use_case = CheckLicensesUseCase::new(scan_use_case(&config)?);

    let request = ScanRequest::new(project_path, merge_excludes(args.exclude, &config))
        .with_default_version(config.default_version.clone());
    let response = use_case.execute(request).await?;

    eprintln!(
        "✅ All {} component(s) have acceptable licenses",
        response.components.len()
    );
    Ok(())
}

fn scan_use_case(config: &ConfigFile) -> Result<GoScanUseCase> {
    let dictionary: LicenseDictionary = config.license_dictionary()?;
    Ok(ScanLicensesUseCase::new(
        GoModuleLister::new(),
        TextLicenseClassifier::new(dictionary),
        HostingSourceLocator::new()?,
        StderrProgressReporter::new(),
    ))
}

/// Validates the project directory and loads its configuration
fn load_project(args: &ProjectArgs) -> Result<(PathBuf, ConfigFile)> {
    let project_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_project_path(&project_path)?;

    let config = match &args.config {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            config
        }
        None => match config::discover_config(&project_path)? {
            Some(config) => {
                eprintln!(
                    "📄 Loaded config from: {}",
                    project_path.join(config::CONFIG_FILENAME).display()
                );
                config
            }
            None => ConfigFile::default(),
        },
    };
    Ok((project_path, config))
}

/// CLI patterns first, then the config's ignore list, without duplicates
fn merge_excludes(cli_patterns: Vec<String>, config: &ConfigFile) -> Vec<String> {
    let mut patterns = cli_patterns;
    for pattern in config.ignore.iter().flatten() {
        if !patterns.contains(pattern) {
            patterns.push(pattern.clone());
        }
    }
    patterns
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ComplianceError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| ComplianceError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(ComplianceError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ComplianceError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
