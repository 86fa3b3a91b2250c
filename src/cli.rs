//! Command-line arguments.
//!
//! Flags override values from the configuration file.

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::TempScopeConfig;
use crate::error::ConfigError;

pub const USAGE: &str = "\
Usage: tempscope [OPTIONS]

Options:
  --config <PATH>     YAML config file (default: ~/.tempscope/config.yaml if present)
  --host <HOST>       MQTT broker host
  --port <PORT>       MQTT broker port
  --topic <TOPIC>     Topic carrying the JSON readings
  --capacity <N>      Samples retained per sensor
  --connect           Connect as soon as the window opens
  --audio <PATH>      Loop this audio file in the background
  --print-config      Print the effective configuration as YAML and exit
  -h, --help          Print this help

Logging verbosity follows RUST_LOG (default: info).";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub topic: Option<String>,
    pub capacity: Option<usize>,
    pub connect: bool,
    pub audio: Option<PathBuf>,
    pub print_config: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => out.config = Some(value(&mut args, &arg)?.into()),
                "--host" => out.host = Some(value(&mut args, &arg)?),
                "--port" => out.port = Some(number(&mut args, &arg)?),
                "--topic" => out.topic = Some(value(&mut args, &arg)?),
                "--capacity" => out.capacity = Some(number(&mut args, &arg)?),
                "--audio" => out.audio = Some(value(&mut args, &arg)?.into()),
                "--connect" => out.connect = true,
                "--print-config" => out.print_config = true,
                "-h" | "--help" => out.help = true,
                other => {
                    return Err(ConfigError::Args(format!("unknown argument `{other}`")));
                }
            }
        }
        Ok(out)
    }

    /// Apply the overrides given on the command line.
    pub fn apply_to(&self, cfg: &mut TempScopeConfig) {
        if let Some(host) = &self.host {
            cfg.broker.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.broker.port = port;
        }
        if let Some(topic) = &self.topic {
            cfg.broker.topic = topic.clone();
        }
        if let Some(capacity) = self.capacity {
            cfg.max_samples = capacity;
        }
        if let Some(audio) = &self.audio {
            cfg.audio = Some(audio.clone());
        }
        if self.connect {
            cfg.auto_connect = true;
        }
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::Args(format!("`{flag}` needs a value")))
}

fn number<T: FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, ConfigError> {
    let raw = value(args, flag)?;
    raw.parse()
        .map_err(|_| ConfigError::Args(format!("`{flag}` expects a number, got `{raw}`")))
}
