use crate::telegram::DEFAULT_API_URL;
use clap::Parser;
use log::LevelFilter;
use persona::{load_json, ConfigError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Exi, a chatty Telegram persona bot.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Bot API token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
    pub telegram_api_url: String,

    /// Directory holding the persona JSON files and the stores
    #[arg(long, env = "EXI_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Seed for the random personality effects
    #[arg(long, env = "EXI_SEED")]
    pub seed: Option<u64>,

    /// Default log level; `RUST_LOG` still takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Long-poll timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub poll_timeout: u64,
}

#[derive(Deserialize)]
struct OwnerFile {
    #[serde(rename = "ADMINS", default)]
    admins: Vec<i64>,
}

/// Admin ids from `owner.json`.
pub fn load_admins(dir: &Path) -> Result<HashSet<i64>, ConfigError> {
    let owner: OwnerFile = load_json(dir, "owner.json")?;
    Ok(owner.admins.into_iter().collect())
}
