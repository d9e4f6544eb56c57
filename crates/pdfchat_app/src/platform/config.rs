//! Configuration layering: defaults, then `pdfchat.ron`, then the
//! environment, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use pdfchat_client::{normalize_base_url, ClientSettings, MAX_TOP_K, MIN_TOP_K};
use pdfchat_core::DEFAULT_TOP_K;
use pdfchat_logging::chat_debug;
use ron::extensions::Extensions;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pdfchat.ron";
pub const DEFAULT_STATE_DIR: &str = ".pdfchat";

/// Contents of the optional RON config file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub top_k: Option<u32>,
    pub chat_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub state_dir: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub top_k: Option<u32>,
    pub chat_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub top_k: u32,
    pub chat_model: Option<String>,
    pub state_dir: PathBuf,
}

pub fn parse_file_config(content: &str) -> Result<FileConfig> {
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    options
        .from_str(content)
        .context("config file is not valid RON")
}

/// Reads the config file. A missing file is only an error when the path was
/// given explicitly.
pub fn load_file_config(path: &Path, explicit: bool) -> Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            chat_debug!("Loading config from {:?}", path);
            parse_file_config(&content).with_context(|| format!("in {}", path.display()))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            Ok(FileConfig::default())
        }
        Err(err) => Err(err).with_context(|| format!("could not read {}", path.display())),
    }
}

pub fn resolve(
    file: FileConfig,
    env_base_url: Option<String>,
    overrides: ConfigOverrides,
) -> Result<AppConfig> {
    let env_base_url = env_base_url.filter(|value| !value.trim().is_empty());
    let base_url = overrides
        .base_url
        .or(env_base_url)
        .or(file.base_url);

    let mut client = ClientSettings {
        connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
        request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        ..ClientSettings::default()
    };
    if let Some(raw) = base_url {
        client.base_url = normalize_base_url(&raw)?;
    }

    let top_k = overrides.top_k.or(file.top_k).unwrap_or(DEFAULT_TOP_K);
    ensure!(
        (MIN_TOP_K..=MAX_TOP_K).contains(&top_k),
        "k must be between {MIN_TOP_K} and {MAX_TOP_K}, got {top_k}"
    );

    let chat_model = overrides
        .chat_model
        .or(file.chat_model)
        .filter(|model| !model.trim().is_empty());
    let state_dir = overrides
        .state_dir
        .or(file.state_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

    Ok(AppConfig {
        client,
        top_k,
        chat_model,
        state_dir,
    })
}
