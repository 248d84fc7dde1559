//! Command-line parsing for the `bazaar` binary.

use crate::config::{HostConfig, parse_tick_interval};
use crate::error::{HostError, Result};

pub const USAGE: &str = r#"Bazaar - single-instrument double-auction market simulator

USAGE:
    bazaar [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --interval <MS>     Tick interval in milliseconds (minimum 10)
    --seed <N>          Seed for the random generator
    --ticks <N>         Stop after N ticks
    --depth <N>         Book rows shown per side
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run until Ctrl-C with defaults
    bazaar

    # Reproducible 1000-tick run at 20ms per tick
    bazaar --seed 42 --interval 20 --ticks 1000

    # Config file with a CLI override
    bazaar --config bazaar.json --interval 50
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(HostConfig),
    Help,
}

/// Parse arguments (without the program name) into a command.
///
/// `--config` is applied first wherever it appears; the other flags
/// override the loaded values.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

    let mut config_path: Option<String> = None;
    let mut interval: Option<u64> = None;
    let mut seed: Option<u64> = None;
    let mut ticks: Option<u64> = None;
    let mut depth: Option<usize> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--config" | "-c" => config_path = Some(value(&args, i, flag)?.to_string()),
            "--interval" | "-i" => interval = Some(parse_tick_interval(value(&args, i, flag)?)?),
            "--seed" | "-s" => seed = Some(number(value(&args, i, flag)?, flag)?),
            "--ticks" | "-t" => ticks = Some(number(value(&args, i, flag)?, flag)?),
            "--depth" | "-d" => depth = Some(number(value(&args, i, flag)?, flag)?),
            other => {
                return Err(HostError::InvalidArgument(format!(
                    "unknown argument '{}'",
                    other
                )));
            }
        }
        i += 2;
    }

    let mut config = match config_path {
        Some(path) => HostConfig::from_file(path)?,
        None => HostConfig::default(),
    };
    if let Some(interval) = interval {
        config.tick_interval_ms = interval;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if ticks.is_some() {
        config.max_ticks = ticks;
    }
    if let Some(depth) = depth {
        config.display_depth = depth;
    }

    Ok(Command::Run(config))
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| HostError::InvalidArgument(format!("{} requires a value", flag)))
}

fn number<T: std::str::FromStr>(input: &str, flag: &str) -> Result<T> {
    input.trim().parse().map_err(|_| {
        HostError::InvalidArgument(format!("{} expects a non-negative integer, got '{}'", flag, input))
    })
}
