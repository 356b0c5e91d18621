//! selspeak entry point
//!
//! Parses arguments, sets up logging and configuration, then hands off to
//! [`App`], whose outcome becomes the process exit status.

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};
use selspeak::app::App;
use selspeak::cli::Args;
use selspeak::clipboard::TextAcquirer;
use selspeak::config::Config;
use selspeak::platform::Session;
use selspeak::process::SystemRunner;
use selspeak::speech::Engine;
use std::io;
use std::process;

fn main() {
    let args = Args::parse();

    init_logging(args.debug);

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to selspeak.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("selspeak.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open selspeak.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "selspeak version {} starting (debug mode, logging to selspeak.log)",
            selspeak::VERSION
        );
    } else {
        // Normal mode: only errors unless RUST_LOG says otherwise
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    }
}

fn run(args: &Args) -> anyhow::Result<i32> {
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    debug!("Config from {:?}", config.path());

    let settings = args.apply(config.settings());
    let session = Session::detect();
    info!("Desktop session: {:?}, engine: {}", session, settings.engine);

    let runner = SystemRunner;
    let engine = Engine::new(settings.engine.clone(), &runner);
    let acquirer = TextAcquirer::system(&runner, session);
    let app = App::new(&settings, engine, acquirer);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = app
        .run(&args.mode(), &mut stdin.lock(), &mut stdout.lock())
        .context("failed to write output")?;

    debug!("Finished with {:?}", outcome);
    Ok(outcome.exit_code())
}
