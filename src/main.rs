//! tempscope: live plot of MQTT temperature readings.
//!
//! Run with:  `RUST_LOG=debug tempscope --host localhost --connect`

use std::process::ExitCode;

use tempscope::cli::{CliArgs, USAGE};
use tempscope::{run_tempscope, TempScopeConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> tempscope::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut cfg = TempScopeConfig::load_or_default(args.config.as_deref())?;
    args.apply_to(&mut cfg);
    cfg.validate()?;

    if args.print_config {
        print!("{}", cfg.to_yaml_string()?);
        return Ok(());
    }

    tracing::info!(
        "tempscope v{} starting, broker {} topic {}",
        env!("CARGO_PKG_VERSION"),
        cfg.broker.endpoint(),
        cfg.broker.topic
    );
    run_tempscope(cfg)
}
