//! scopewise CLI: heuristic project estimation.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use scopewise::config::EstimatorConfig;
use scopewise::estimator::ProjectEstimator;
use scopewise::export::{export_estimate, ExportFormat};
use scopewise::knowledge::KnowledgeBase;
use scopewise::paths::ScopewisePaths;
use scopewise::source::JsonFolderSource;

#[derive(Parser)]
#[command(name = "scopewise", version, about = "Heuristic project estimation")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/scopewise/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a project.
    Estimate {
        /// Free-text project description.
        #[arg(long)]
        description: String,

        /// A requirement (repeatable).
        #[arg(long = "requirement")]
        requirements: Vec<String>,

        /// A technology (repeatable). Detected from the description when omitted.
        #[arg(long = "tech")]
        technologies: Vec<String>,

        /// Deadline as YYYY-MM-DD.
        #[arg(long)]
        deadline: Option<String>,

        /// Output format: json or report.
        #[arg(long, default_value = "report")]
        format: String,

        /// Folder of JSON files with team members and past projects.
        #[arg(long)]
        sources: Option<PathBuf>,
    },

    /// Manage the estimation knowledge base.
    Kb {
        #[command(subcommand)]
        action: KbAction,
    },

    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum KbAction {
    /// Write the default knowledge base if none exists.
    Init,
    /// Print the knowledge base as JSON.
    Show,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config as TOML.
    Show,
}

/// Load the config and anchor a relative knowledge base path in the data
/// directory.
fn load_config(config_file: &Path, paths: &ScopewisePaths) -> Result<EstimatorConfig> {
    let mut config = EstimatorConfig::load_or_default(config_file)?;
    config.knowledge_base_path = paths.data_path(&config.knowledge_base_path);
    Ok(config)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = ScopewisePaths::resolve()?;
    let config_file = cli.config.unwrap_or_else(|| paths.config_file());

    match cli.command {
        Commands::Estimate {
            description,
            requirements,
            technologies,
            deadline,
            format,
            sources,
        } => {
            let format: ExportFormat = format.parse()?;
            let config = load_config(&config_file, &paths)?;
            let source = match sources {
                Some(dir) => JsonFolderSource::load(&dir)?,
                None => JsonFolderSource::default(),
            };
            let estimator = ProjectEstimator::from_config(config, source)?;
            let estimate = estimator.estimate_project(
                &description,
                &requirements,
                &technologies,
                deadline.as_deref(),
            );
            println!("{}", export_estimate(&estimate, format)?);
        }

        Commands::Kb { action } => {
            let config = load_config(&config_file, &paths)?;
            let path = &config.knowledge_base_path;
            match action {
                KbAction::Init => {
                    if path.exists() {
                        println!("Knowledge base already exists at {}", path.display());
                    } else {
                        KnowledgeBase::load_or_init(path)?;
                        println!("Wrote default knowledge base to {}", path.display());
                    }
                }
                KbAction::Show => {
                    let kb = KnowledgeBase::load(path)?;
                    println!("{}", serde_json::to_string_pretty(&kb).into_diagnostic()?);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_file.exists() && !force {
                    miette::bail!(
                        "config already exists at {} (use --force to overwrite)",
                        config_file.display()
                    );
                }
                paths.ensure_dirs()?;
                EstimatorConfig::default().save(&config_file)?;
                println!("Wrote {}", config_file.display());
            }
            ConfigAction::Show => {
                let config = EstimatorConfig::load_or_default(&config_file)?;
                println!("# {}", config_file.display());
                println!("{}", toml::to_string_pretty(&config).into_diagnostic()?);
            }
        },
    }

    Ok(())
}
