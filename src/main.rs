//! Rulecheck CLI - Command-line interface for rule and documentation validation
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like process exit codes and terminal output
//! - A run fails only when errors were found; warnings are reported but never fail it

use clap::{Parser, Subcommand, ValueEnum};
use rulecheck::{
    FileStatus, OutputFormat, ReportFormatter, ReportKind, ReportOptions, RulecheckConfig,
    RulecheckResult, RulecheckValidator, ValidationReport,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Rulecheck - Validate AI-IDE rule files and project documentation
#[derive(Parser)]
#[command(name = "rulecheck")]
#[command(version)]
#[command(about = "Validate AI-IDE rule files and project documentation")]
#[command(long_about = "Rulecheck checks rule files for frontmatter metadata and Markdown structure, and checks project documentation for required files, content structure and broken relative links. Designed for pre-commit hooks and CI pipelines.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Project root to validate
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate rule files (frontmatter metadata and Markdown body)
    #[command(alias = "validate-rules")]
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Validate project documentation, examples and relative links
    #[command(alias = "validate-docs")]
    Docs {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq, Eq, Debug)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> RulecheckResult<i32> {
    let use_colors = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    match cli.command {
        Commands::Rules { format } => {
            run_validation(ReportKind::Rules, &cli.root, cli.config.as_deref(), format, use_colors)
        }
        Commands::Docs { format } => {
            let config = cli.config.as_deref();
            run_validation(ReportKind::Documentation, &cli.root, config, format, use_colors)
        }
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config), &cli.root)
        }
    }
}

fn run_validation(
    kind: ReportKind,
    root: &Path,
    config_path: Option<&Path>,
    format: OutputFormatArg,
    use_colors: bool,
) -> RulecheckResult<i32> {
    let validator = RulecheckValidator::discover(root, config_path)?;
    let format = OutputFormat::from(format);
    let streaming = format == OutputFormat::Human;
    let formatter = ReportFormatter::new(ReportOptions { use_colors, include_progress: !streaming });

    if streaming {
        print!("{}", formatter.format_banner(kind));
    }

    let on_file = |status: &FileStatus| {
        if streaming {
            print!("{}", formatter.format_file_status(status));
        }
    };
    let report = match kind {
        ReportKind::Rules => validator.validate_rules(root, on_file)?,
        ReportKind::Documentation => validator.validate_docs(root, on_file)?,
    };

    formatter.write_report(&report, format, io::stdout().lock())?;

    Ok(exit_code(&report))
}

fn exit_code(report: &ValidationReport) -> i32 {
    if report.is_success() {
        0
    } else {
        1
    }
}

fn run_validate_config(config_path: Option<PathBuf>, root: &Path) -> RulecheckResult<i32> {
    let config_path = match config_path {
        Some(path) => path,
        None => match RulecheckConfig::default_file(root) {
            Some(path) => path,
            None => {
                eprintln!("❌ No configuration file found in {}", root.display());
                return Ok(1);
            }
        },
    };

    println!("Validating configuration: {}", config_path.display());

    match RulecheckConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("✅ Configuration is valid");

            println!("📊 Configuration summary:");
            println!(
                "  Rules: {}/*{}{}",
                config.rules.directory.display(),
                config.rules.extension,
                if config.rules.recursive { " (recursive)" } else { "" }
            );
            println!("  Core files: {}", config.docs.core_files.join(", "));
            println!("  Docs directory: {}", config.docs.docs_dir.display());
            println!("  Recommended docs: {}", config.docs.recommended_docs.len());
            println!("  Exclude patterns: {}", config.docs.exclude.len());

            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            Ok(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_rule(root: &Path, name: &str, content: &str) {
        let rules_dir = root.join(".cursor/rules");
        fs::create_dir_all(&rules_dir).unwrap();
        fs::write(rules_dir.join(name), content).unwrap();
    }

    #[test]
    fn test_rules_command_exit_codes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_rule(
            root,
            "short.mdc",
            "---\ndescription: Short\nglobs: \"*.md\"\nalwaysApply: false\n---\nNo heading here.\n",
        );
        let result = run_validation(ReportKind::Rules, root, None, OutputFormatArg::Json, false);
        assert_eq!(result.unwrap(), 0);

        write_rule(root, "broken.mdc", "no frontmatter at all");
        let result = run_validation(ReportKind::Rules, root, None, OutputFormatArg::Human, false);
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_missing_rules_directory_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            run_validation(ReportKind::Rules, temp_dir.path(), None, OutputFormatArg::Human, false);
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_docs_command_fails_on_missing_core_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let result = run_validation(ReportKind::Documentation, root, None, OutputFormatArg::Github, false);
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("broken.yaml");
        fs::write(&config_file, "version: \"9.9\"\n").unwrap();

        let result = run_validation(
            ReportKind::Rules,
            temp_dir.path(),
            Some(config_file.as_path()),
            OutputFormatArg::Human,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("rulecheck.yaml");

        let yaml = RulecheckConfig::default().to_yaml().unwrap();
        fs::write(&config_file, yaml).unwrap();

        let result = run_validate_config(Some(config_file.clone()), temp_dir.path());
        assert_eq!(result.unwrap(), 0);

        let result = run_validate_config(None, temp_dir.path());
        assert_eq!(result.unwrap(), 0);

        fs::write(&config_file, "rules:\n  extension: \"\"\n").unwrap();
        let result = run_validate_config(Some(config_file), temp_dir.path());
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_validate_config_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_validate_config(None, temp_dir.path());
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["rulecheck", "docs", "--root", "project", "-f", "json", "--no-color"])
            .unwrap();

        assert!(cli.no_color);
        assert_eq!(cli.root, PathBuf::from("project"));
        assert!(matches!(cli.command, Commands::Docs { format: OutputFormatArg::Json }));

        let cli = Cli::try_parse_from(["rulecheck", "validate-rules"]).unwrap();
        assert!(matches!(cli.command, Commands::Rules { format: OutputFormatArg::Human }));
    }
}
