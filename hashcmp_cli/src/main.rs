use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use hashcmp_cli::config::{AppConfig, ConfigManager};
use hashcmp_cli::file_discovery::{FileDiscoveryOptions, collect_inputs};
use hashcmp_cli::output::{OutputFormat, create_formatter};
use hashcmp_cli::progress::{self, create_progress_infrastructure, render_progress};
use hashcmp_cli::tamper::{TamperError, make_tampered_copy};
use hashcmp_cli::terminal;
use hashcmp_core::{FileProcessor, HashAlgorithm, NullProvider};

#[derive(Parser)]
#[command(name = "hashcmp")]
#[command(author, version, about = "Compare MD5, SHA-1 and SHA-256 digests of files and folders", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare MD5 / SHA-1 / SHA-256 for files and folders, optionally with a tampered copy
    Compare(CompareArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// Files or folders; folders are walked recursively
    #[arg(required = true, value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Exclude patterns for files found in folders (glob, repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude_patterns: Vec<String>,

    /// Create a 1-bit-flipped copy of this file and include it
    #[arg(long, value_name = "FILE")]
    tamper: Option<PathBuf>,

    /// Byte index to flip in the tampered copy
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    index: i64,

    /// Hash algorithm column(s) to show
    #[arg(short, long, value_enum, default_value = "all")]
    algorithm: HashAlgorithmArg,

    /// Output format [default: from configuration, normally table]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable progress bar display
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., engine.chunk_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., output.default_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum HashAlgorithmArg {
    Md5,
    Sha1,
    Sha256,
    All,
}

impl From<HashAlgorithmArg> for Vec<HashAlgorithm> {
    fn from(arg: HashAlgorithmArg) -> Self {
        match arg {
            HashAlgorithmArg::Md5 => vec![HashAlgorithm::MD5],
            HashAlgorithmArg::Sha1 => vec![HashAlgorithm::SHA1],
            HashAlgorithmArg::Sha256 => vec![HashAlgorithm::SHA256],
            HashAlgorithmArg::All => HashAlgorithm::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("hashcmp_core", log::LevelFilter::Debug)
            .filter_module("hashcmp_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let manager = ConfigManager::from_option(cli.config);

    match cli.command {
        Commands::Compare(args) => {
            let config = manager.load().context("Failed to load configuration")?;
            compare_command(config, args).await?;
        }
        Commands::Config { command } => {
            config_command(manager, command)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Print a usage-level failure and exit with status 2
fn exit_usage_error(message: &str) -> ! {
    eprintln!("{}", message.red());
    std::process::exit(2);
}

async fn compare_command(config: AppConfig, args: CompareArgs) -> Result<()> {
    let options = FileDiscoveryOptions::new().with_exclude_patterns(args.exclude_patterns);
    let mut files = collect_inputs(&args.inputs, &options).context("File discovery failed")?;
    log::debug!("Discovered {} file(s)", files.len());

    if let Some(source) = &args.tamper {
        match make_tampered_copy(source, args.index) {
            Ok(tampered) => {
                files
                    .insert(&tampered)
                    .with_context(|| format!("Failed to resolve {}", tampered.display()))?;
            }
            Err(TamperError::SourceNotFound(path)) => {
                exit_usage_error(&format!("[error] --tamper not found: {}", path.display()));
            }
            Err(e) => return Err(e).context("Failed to create tampered copy"),
        }
    }

    if files.is_empty() {
        exit_usage_error("No files found.");
    }
    let files = files.into_vec();

    if !config.output.color_enabled {
        colored::control::set_override(false);
    }

    let algorithms: Vec<HashAlgorithm> = args.algorithm.into();
    let format = match args.format {
        Some(format) => format,
        None => config.output.format()?,
    };
    let show_progress =
        !args.no_progress && terminal::should_show_progress(config.output.progress_enabled);
    let use_color =
        format == OutputFormat::Table && terminal::should_use_color(config.output.color_enabled);

    let processor = FileProcessor::new(config.engine.clone());
    let start = Instant::now();

    let results = if show_progress {
        let (provider, rx) = create_progress_infrastructure();
        let renderer = tokio::spawn(render_progress(rx));
        let results = processor
            .process_files(&files, &algorithms, provider.as_ref())
            .await;
        // Closing the channel lets the renderer finish
        provider.complete();
        drop(provider);
        let _ = renderer.await;
        results
    } else {
        processor
            .process_files(&files, &algorithms, &NullProvider)
            .await
    };
    let results = results.context("Failed to hash files")?;

    let elapsed = start.elapsed();

    let formatter = create_formatter(format, &algorithms, use_color);
    let rendered = formatter.format_batch(&results)?;
    println!("{}", rendered.trim_end());

    if terminal::stderr_is_terminal() && format == OutputFormat::Table {
        let total_size: u64 = results.iter().map(|r| r.file_size).sum();
        let secs = elapsed.as_secs_f64();
        let throughput = if secs > 0.0 {
            (total_size as f64 / 1_048_576.0) / secs
        } else {
            0.0
        };
        eprintln!(
            "\n{} {} file(s), {} in {:.2}s ({})",
            "Summary:".bold().green(),
            results.len(),
            progress::format_bytes(total_size),
            secs,
            progress::format_throughput(throughput)
        );
    }

    Ok(())
}

fn config_command(mut manager: ConfigManager, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            print!("{}", manager.show()?);
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Get { key } => match manager.get(&key) {
            Ok(value) => {
                println!("{value}");
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Set { key, value } => match manager.set(&key, &value) {
            Ok(()) => {
                eprintln!("{}", format!("Set {key} = {value}").green());
                eprintln!(
                    "Configuration saved to: {}",
                    manager.get_config_path().display()
                );
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e:#}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut current_section = None;
            for (key, value) in items {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if current_section.as_deref() != Some(section) {
                    if current_section.is_some() {
                        println!();
                    }
                    println!("[{}]", section.yellow());
                    current_section = Some(section.to_string());
                }
                println!("  {} = {}", name.cyan(), value);
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
