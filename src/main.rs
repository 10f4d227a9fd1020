use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use vulntext::{
    config::Config,
    convert,
    output::{JsonHandler, OutputFormat, TextHandler},
    ReportError,
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const VULNERABILITIES_FOUND: u8 = 3;
}

#[derive(Parser)]
#[command(name = "vulntext")]
#[command(
    author,
    version,
    about = "Render vulnerability scan findings as a human-readable report"
)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON message stream produced by the scanner
    Render {
        /// Message stream to read (stdin when omitted)
        input: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Comma-separated display options (traces, color)
        #[arg(long, value_delimiter = ',')]
        show: Vec<String>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    match cli.command {
        Commands::Render {
            input,
            format,
            show,
        } => {
            let config = Config::load_from(&config_path)?;
            let format = match format {
                Some(f) => OutputFormat::from_str(&f).map_err(|e| anyhow::anyhow!(e))?,
                None => config.default_format,
            };
            let show = config.show_options(&show);

            let reader: Box<dyn Read> = match &input {
                Some(path) => Box::new(BufReader::new(
                    File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(io::stdin().lock())),
            };
            let stdout = BufWriter::new(io::stdout().lock());

            let result = match format {
                OutputFormat::Text => convert(reader, TextHandler::new(stdout).with_show(show)),
                OutputFormat::Json => convert(reader, JsonHandler::new(stdout)),
            };
            match result {
                Ok(()) => Ok(exit_codes::SUCCESS),
                Err(ReportError::VulnerabilitiesFound) => Ok(exit_codes::VULNERABILITIES_FOUND),
                Err(e) => Err(e).context("failed to render report"),
            }
        }
        Commands::Config { init, path } => {
            handle_config(&config_path, init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn handle_config(config_path: &Path, init: bool, show_path: bool) -> Result<()> {
    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save_to(config_path)?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'vulntext config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
