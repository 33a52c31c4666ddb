//! cmdrelay CLI entry point
//!
//! Usage:
//!   cmdrelay run <program> [args...]   Run a program in the background
//!   cmdrelay sub [args...]             Run the configured subcommand family
//!   cmdrelay config                    Show configuration
//!
//! The main thread acts as the foreground context: it drains the
//! foreground queue until the dispatched command has reported back.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cmdrelay::cli::{write_outcome, Cli, Commands, OutputFormat};
use cmdrelay::config::{find_config_files, load_config, Config};
use cmdrelay::{
    build_runtime, foreground_channel, Completion, Dispatcher, Invocation, Outcome, Subcommand,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => {
            if cli.verbose {
                for path in find_config_files() {
                    eprintln!("{}: {}", "loaded".cyan(), path.display());
                }
            }
            show_config(&config, cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(args) => {
            let invocation = Invocation::new(resolve_program(&args.program), args.args);
            dispatch_and_wait(&config, cli.format, cli.verbose, |dispatcher| {
                let shown = invocation.clone();
                let submit: Submit =
                    Box::new(move |done: Completion| dispatcher.dispatch(invocation, Some(done)));
                (shown, submit)
            })
        }
        Commands::Sub(args) => {
            dispatch_and_wait(&config, cli.format, cli.verbose, |dispatcher| {
                let sub = Subcommand::new(dispatcher, &config.subcommand);
                let shown = sub.invocation(args.args.clone());
                let submit: Submit =
                    Box::new(move |done: Completion| sub.invoke_list(args.args, Some(done)));
                (shown, submit)
            })
        }
    }
}

/// Resolve a bare program name on PATH; paths are passed through untouched
fn resolve_program(program: &str) -> String {
    if program.contains('/') {
        return program.to_string();
    }

    match which::which(program) {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::debug!("Could not resolve '{}' on PATH: {}", program, e);
            program.to_string()
        }
    }
}

/// Sends a prepared command to the dispatcher with the given completion
type Submit = Box<dyn FnOnce(Completion)>;

/// Dispatch one command and drain the foreground queue on this thread
/// until its outcome has been printed.
fn dispatch_and_wait(
    config: &Config,
    format: OutputFormat,
    verbose: bool,
    prepare: impl FnOnce(Dispatcher) -> (Invocation, Submit),
) -> Result<ExitCode> {
    let runtime =
        build_runtime(&config.background).context("Failed to start background runtime")?;
    let (foreground, queue) = foreground_channel();
    let dispatcher =
        Dispatcher::from_config(runtime.handle().clone(), foreground, &config.dispatch);

    let (invocation, submit) = prepare(dispatcher);
    if verbose {
        eprintln!("{}: {}", "command".cyan(), invocation);
    }

    let succeeded = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&succeeded);

    // Consumes the dispatcher, so the queue closes once the outcome is delivered
    submit(Box::new(move |outcome: Outcome| {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let written =
            write_outcome(&mut stdout.lock(), &mut stderr.lock(), &invocation, &outcome, format);
        if let Err(e) = written {
            tracing::warn!("Failed to write output: {}", e);
        }
        flag.store(outcome.is_ok(), Ordering::SeqCst);
    }));

    queue.run();

    if succeeded.load(Ordering::SeqCst) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print the resolved configuration as TOML (or JSON with `--format json`)
fn show_config(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Raw | OutputFormat::Text => {
            print!("{}", toml::to_string_pretty(config).context("Failed to render config")?);
        }
    }
    Ok(())
}
