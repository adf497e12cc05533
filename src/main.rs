use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use credit_xai::config::Config;
use credit_xai::output::{self, QuestPayload};
use credit_xai::quests::{self, HolisticProfile, Quest, QuestFeatures};
use credit_xai::scoring;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ANALYSIS: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum AnalysisFormat {
    /// Single-line JSON payload
    #[default]
    Json,
    /// Human-readable factor table
    Table,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum QuestFormat {
    /// {"quests": [...]}
    #[default]
    Json,
    /// One "- quest" line per quest
    List,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score Plaid data and print the analysis (default if no subcommand)
    Analyze {
        /// Plaid JSON export (defaults to the configured search paths)
        path: Option<PathBuf>,

        /// Verifiable credential count to report alongside the score
        #[arg(long, default_value_t = 0)]
        vc_count: u32,

        #[arg(short, long, value_enum, default_value_t)]
        format: AnalysisFormat,
    },
    /// Recommend quests for a holistic user profile
    Quests {
        /// Holistic profile files (defaults to the configured glob pattern)
        files: Vec<PathBuf>,

        /// Convert this Plaid export on the fly instead of reading profiles
        #[arg(long, conflicts_with = "files")]
        from_plaid: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t)]
        format: QuestFormat,
    },
    /// Convert a Plaid export into a holistic profile file
    Convert {
        /// Plaid JSON export
        path: PathBuf,

        /// Directory for holistic_user_data_<user_id>.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "credit-xai")]
#[command(about = "Explainable credit scoring and quest recommendations", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/credit-xai/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "credit_xai=debug"
    } else {
        "credit_xai=info"
    };
    // stdout carries only the payload; all diagnostics go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Analyze {
        path: None,
        vc_count: 0,
        format: AnalysisFormat::Json,
    });
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    let config = match credit_xai::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = credit_xai::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match command {
        Commands::Analyze {
            path,
            vc_count,
            format,
        } => {
            let (result, code) = match credit_xai::analysis::analyze(path.as_deref(), &config) {
                Ok(result) => (result, EXIT_SUCCESS),
                Err(e) => {
                    tracing::error!("Error in XAI analysis: {:#}", e);
                    (scoring::error_analysis(&format!("{:#}", e)), EXIT_ANALYSIS)
                }
            };
            let result = result.with_vc_count(vc_count);

            match format {
                AnalysisFormat::Json => match output::format_json(&result) {
                    Ok(json) => {
                        println!("{}", json);
                        code
                    }
                    Err(e) => {
                        tracing::error!("{:#}", e);
                        EXIT_ANALYSIS
                    }
                },
                AnalysisFormat::Table => {
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_factor_table(&result, use_colors));
                    code
                }
            }
        }
        Commands::Quests {
            files,
            from_plaid,
            format,
        } => match recommend_quests(files, from_plaid.as_deref(), &config) {
            Ok(quests) => match format {
                QuestFormat::Json => match output::format_json(&QuestPayload::new(&quests)) {
                    Ok(json) => {
                        println!("{}", json);
                        EXIT_SUCCESS
                    }
                    Err(e) => {
                        tracing::error!("{:#}", e);
                        EXIT_IO
                    }
                },
                QuestFormat::List => {
                    println!("{}", output::format_quest_list(&quests));
                    EXIT_SUCCESS
                }
            },
            Err(e) => {
                tracing::error!("Quest generation failed: {:#}", e);
                EXIT_IO
            }
        },
        Commands::Convert { path, out_dir } => match convert(&path, &out_dir) {
            Ok(user) => {
                println!("Holistic user data generated for {}", user);
                EXIT_SUCCESS
            }
            Err(e) => {
                tracing::error!("Conversion failed: {:#}", e);
                EXIT_IO
            }
        },
    };

    tracing::debug!("finished in {:?}", start_time.elapsed());
    std::process::exit(code);
}

fn recommend_quests(
    files: Vec<PathBuf>,
    from_plaid: Option<&Path>,
    config: &Config,
) -> Result<Vec<Quest>> {
    let thresholds = config.quest_config().thresholds();

    let profile = if let Some(plaid_path) = from_plaid {
        let plaid = credit_xai::plaid::read_plaid_file(plaid_path)?;
        HolisticProfile::from_plaid(&plaid)
    } else {
        let files = if files.is_empty() {
            quests::discover_profiles(config.holistic_pattern())?
        } else {
            files
        };
        tracing::debug!(profiles = files.len(), "holistic profiles selected");

        // First profile in path order is the sample user
        let Some(sample) = files.first() else {
            tracing::warn!(
                "No holistic profiles found matching '{}'",
                config.holistic_pattern()
            );
            return Ok(Vec::new());
        };
        quests::load_profile(sample)?
    };

    tracing::debug!(user = profile.user_label(), "generating quests");
    let features = QuestFeatures::from_profile(&profile);
    Ok(quests::generate_quests(&features, &thresholds))
}

fn convert(path: &Path, out_dir: &Path) -> Result<String> {
    let plaid = credit_xai::plaid::read_plaid_file(path)?;
    let profile = HolisticProfile::from_plaid(&plaid);
    let written = quests::save_profile(out_dir, &profile)?;
    tracing::debug!(path = %written.display(), "wrote holistic profile");
    Ok(profile.user_label().to_string())
}
