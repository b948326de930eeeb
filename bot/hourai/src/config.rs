use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    env,
    fs::File,
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

const DEFAULT_ENV: &str = "dev";
const DEFAULT_PREFIX: &str = "!";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HouraiConfig {
    pub command_prefix: String,
    pub discord: DiscordConfig,
    pub metrics: MetricsConfig,
    pub status: StatusConfig,
}

impl Default for HouraiConfig {
    fn default() -> Self {
        Self {
            command_prefix: String::from(DEFAULT_PREFIX),
            discord: DiscordConfig::default(),
            metrics: MetricsConfig::default(),
            status: StatusConfig::default(),
        }
    }
}

impl HouraiConfig {
    /// The single character every command starts with.
    pub fn prefix(&self) -> Result<char> {
        let mut chars = self.command_prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(prefix), None) => Ok(prefix),
            _ => bail!(
                "command_prefix must be exactly one character, got {:?}",
                self.command_prefix
            ),
        }
    }

    /// Resolves the bot token, preferring one passed on the command line.
    pub fn bot_token(&self, cli_token: Option<&str>) -> Result<String> {
        cli_token
            .or(self.discord.bot_token.as_deref())
            .filter(|token| !token.is_empty())
            .map(String::from)
            .context("No bot token provided. Pass one with -t or set discord.bot_token.")
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DiscordConfig {
    pub bot_token: Option<String>,
    pub proxy: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MetricsConfig {
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StatusConfig {
    /// Presence text shown after a command succeeds.
    pub idle: Option<String>,
}

/// Loads the config for the bot. A missing file yields the default config.
pub fn load_config(path: &Path) -> Result<HouraiConfig> {
    match File::open(path) {
        Ok(file) => simd_json::serde::from_reader(BufReader::new(file))
            .with_context(|| format!("Cannot parse JSON config at {:?}", path)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(HouraiConfig::default()),
        Err(err) => Err(err).with_context(|| format!("Cannot open JSON config at {:?}", path)),
    }
}

pub fn get_config_path() -> Box<Path> {
    let mut buffer: PathBuf = ["/etc", "hourai"].iter().collect();
    buffer.push(get_environment());
    buffer.into_boxed_path()
}

fn get_environment() -> String {
    env::var("HOURAI_ENV")
        .unwrap_or_else(|_| String::from(DEFAULT_ENV))
        .to_lowercase()
}
