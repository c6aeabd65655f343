// Transmit Profiles - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Transmit Profiles
//!
//! Diagnostic command-line front end. Loads an optional engine
//! configuration and custom profile payload, applies a device state and
//! prints the resulting tier timers.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use transmit_profiles::{EngineConfig, NetworkCost, PowerSource, TransmitProfiles, VERSION};

/// Human-readable application name.
pub const APP_NAME: &str = "Transmit Profiles";

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
}

/// Print help information and exit.
fn print_help() {
    println!("Usage: {} [OPTIONS]", env::args().next().unwrap_or_else(|| "transmit-profiles".to_string()));
    println!();
    println!("Evaluate transmit profiles for a device state.");
    println!();
    println!("Options:");
    println!("  -c, --config FILE    Engine configuration (TOML)");
    println!("  -p, --profiles FILE  Custom transmit profiles (JSON)");
    println!("  -s, --select NAME    Profile to activate");
    println!("  -n, --net-cost COST  any, unknown, unmetered|low, metered|high, roaming|restricted");
    println!("  -w, --power SOURCE   any, unknown, battery, charging");
    println!("      --dump           Print the loaded profiles as JSON");
    println!("  -d, --debug          Enable debug logging");
    println!("  -h, --help           Show this help message and exit");
    println!("  -v, --version        Show version information and exit");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG             Set log level (trace, debug, info, warn, error)");
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    profiles: Option<PathBuf>,
    select: Option<String>,
    net_cost: NetworkCost,
    power: PowerSource,
    dump: bool,
    debug: bool,
}

enum Command {
    Run(Options),
    Exit(ExitCode),
}

fn parse_args(args: &[String]) -> Command {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Command::Exit(ExitCode::SUCCESS);
            }
            "-v" | "--version" => {
                print_version();
                return Command::Exit(ExitCode::SUCCESS);
            }
            "-d" | "--debug" => options.debug = true,
            "--dump" => options.dump = true,
            "-c" | "--config" | "-p" | "--profiles" | "-s" | "--select" | "-n" | "--net-cost"
            | "-w" | "--power" => {
                let Some(value) = iter.next() else {
                    eprintln!("Option {} requires a value.", arg);
                    return Command::Exit(ExitCode::FAILURE);
                };
                match arg.as_str() {
                    "-c" | "--config" => options.config = Some(PathBuf::from(value)),
                    "-p" | "--profiles" => options.profiles = Some(PathBuf::from(value)),
                    "-s" | "--select" => options.select = Some(value.clone()),
                    "-n" | "--net-cost" => match NetworkCost::from_token(value) {
                        Some(cost) => options.net_cost = cost,
                        None => {
                            eprintln!("Unknown network cost: {}", value);
                            return Command::Exit(ExitCode::FAILURE);
                        }
                    },
                    _ => match PowerSource::from_token(value) {
                        Some(power) => options.power = power,
                        None => {
                            eprintln!("Unknown power source: {}", value);
                            return Command::Exit(ExitCode::FAILURE);
                        }
                    },
                }
            }
            _ => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Try '--help' for more information.");
                return Command::Exit(ExitCode::FAILURE);
            }
        }
    }

    Command::Run(options)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Command::Run(options) => options,
        Command::Exit(code) => return code,
    };

    let config = match &options.config {
        Some(path) => match EngineConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::load().unwrap_or_default(),
    };

    // Initialize logging with appropriate level
    let log_level = if options.debug {
        tracing::Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(tracing::Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let engine = TransmitProfiles::with_config(config);

    if let Some(path) = &options.profiles {
        let payload = match std::fs::read_to_string(path) {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
        if !engine.load(&payload) {
            eprintln!("No profiles loaded from {}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if let Some(name) = &options.select {
        if !engine.set_profile(name) {
            eprintln!("Profile {} not found, using {}", name, engine.active_profile());
        }
    }

    let matched = engine.notify_device_state(options.net_cost, options.power);

    if options.dump {
        match engine.export_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to export profiles: {}", e),
        }
    }

    let timers: Vec<String> = engine.timers_ms().iter().map(|t| t.to_string()).collect();
    println!("profile: {}", engine.active_profile());
    println!(
        "state:   {}{}",
        engine.device_state(),
        if matched { "" } else { " (no rule matched, using first rule)" }
    );
    println!("timers:  [{}] ms", timers.join(", "));

    ExitCode::SUCCESS
}
