//! Model Aggregator - run one prompt against one or many AI models

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use model_aggregator::{
    Command, Config, ExecutionMode, HttpBackend, Orchestrator, PromptField, SLASH_COMMANDS,
    parse_line, paths, report,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Run one prompt against a single AI model or a set of models
#[derive(Parser)]
#[command(name = "model-aggregator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Aggregator base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the models the service offers
    Models,
    /// Execute a prompt once and print the outcome
    Run {
        /// Execution mode
        #[arg(long, value_enum, default_value_t = ModeArg::Single)]
        mode: ModeArg,
        /// Model identifier (repeat for multi mode)
        #[arg(long = "model", short = 'm', required = true)]
        models: Vec<String>,
        /// Prompt text
        #[arg(long, short = 'p')]
        prompt: String,
        /// Image reference URL
        #[arg(long)]
        image_url: Option<String>,
        /// Audio reference URL
        #[arg(long)]
        audio_url: Option<String>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session driven by slash commands
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Multi,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => Self::Single,
            ModeArg::Multi => Self::Multi,
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let backend = HttpBackend::new(&config.base_url, config.timeout());
    tracing::info!(base_url = %backend.base_url(), "Starting");

    match cli.command {
        Commands::Models => cmd_models(backend),
        Commands::Run {
            mode,
            models,
            prompt,
            image_url,
            audio_url,
            json,
        } => {
            let mut orchestrator = Orchestrator::with_mode(backend, mode.into());
            orchestrator.load_catalog();
            if let Some(error) = orchestrator.state().catalog_error() {
                eprintln!("Warning: {error}");
            }
            orchestrator.set_selection(models);
            orchestrator.set_prompt(PromptField::Text, prompt);
            if let Some(url) = image_url {
                orchestrator.set_prompt(PromptField::ImageUrl, url);
            }
            if let Some(url) = audio_url {
                orchestrator.set_prompt(PromptField::AudioUrl, url);
            }
            cmd_run(&mut orchestrator, json)
        }
        Commands::Shell => cmd_shell(Orchestrator::with_mode(backend, config.default_mode)),
    }
}

// Log to the temp dir - tail with: tail -f /tmp/model-aggregator.log
// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let log_path = paths::log_path();
        let (Some(dir), Some(file)) = (log_path.parent(), log_path.file_name()) else {
            return;
        };
        let file_appender = tracing_appender::rolling::never(dir, file);
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }
}

fn cmd_models(backend: HttpBackend) -> Result<()> {
    let mut orchestrator = Orchestrator::new(backend);
    orchestrator.load_catalog();
    if let Some(error) = orchestrator.state().error() {
        bail!("{error}");
    }
    println!("{}", report::catalog(orchestrator.state().catalog(), &[]));
    Ok(())
}

fn cmd_run(orchestrator: &mut Orchestrator<HttpBackend>, json: bool) -> Result<()> {
    for warning in report::reference_warnings(orchestrator.state()) {
        eprintln!("Warning: {warning}");
    }

    match orchestrator.execute() {
        Ok(result) if json => {
            let rendered =
                serde_json::to_string_pretty(result).context("Failed to serialize result")?;
            println!("{rendered}");
            Ok(())
        }
        Ok(result) => {
            println!("{}", report::result(result));
            Ok(())
        }
        Err(err) => bail!("{err}"),
    }
}

fn print_help() {
    println!("Type a line of text to set the prompt. Commands:");
    for command in SLASH_COMMANDS {
        let usage = if command.args.is_empty() {
            command.name.to_string()
        } else {
            format!("{} {}", command.name, command.args)
        };
        println!("  {usage:<22} {}", command.description);
    }
}

fn cmd_shell(mut orchestrator: Orchestrator<HttpBackend>) -> Result<()> {
    orchestrator.load_catalog();
    if let Some(error) = orchestrator.state().error() {
        eprintln!("Warning: {error}");
    }
    println!(
        "{} models available, mode {}. /help for commands.",
        orchestrator.state().catalog().len(),
        orchestrator.state().mode()
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Status => println!("{}", report::status(orchestrator.state())),
            command => {
                let shows_catalog = matches!(command, Command::Models);
                let shows_outcome = matches!(command, Command::Run);
                if let Some(intent) = command.into_intent() {
                    orchestrator.dispatch(intent);
                }

                let state = orchestrator.state();
                if shows_catalog {
                    if let Some(error) = state.catalog_error() {
                        eprintln!("Error: {error}");
                    } else {
                        println!("{}", report::catalog(state.catalog(), state.selection()));
                    }
                }
                if shows_outcome {
                    if let Some(error) = state.error() {
                        eprintln!("Error: {error}");
                    } else if let Some(result) = state.result() {
                        println!("{}", report::result(result));
                    }
                }
            }
        }
    }

    Ok(())
}
