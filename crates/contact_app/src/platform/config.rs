use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use contact_core::{default_field_specs, FieldSpec};
use contact_gateway::{GatewaySettings, DEFAULT_ENDPOINT};
use form_logging::{form_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::AppError;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "contact_app",
    version,
    about = "Validate and submit the Youth For Earth contact form"
)]
pub struct Cli {
    /// Path to the config file (default: contact_form.ron in current dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Draft file holding the form answers
    #[arg(long)]
    pub draft: Option<PathBuf>,

    /// Override a single answer, e.g. --set name="Greta"
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    /// Submission endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Give up on a submission after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}

// ============================================================================
// Config File (RON)
// ============================================================================

pub const DEFAULT_CONFIG_FILENAME: &str = "contact_form.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub submit_timeout_secs: u64,
    pub draft_path: PathBuf,
    pub log_path: PathBuf,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            submit_timeout_secs: 30,
            draft_path: PathBuf::from(".contact_draft.ron"),
            log_path: PathBuf::from("./contact_form.log"),
            fields: default_field_specs()
                .into_iter()
                .map(|spec| FieldConfig {
                    name: spec.name,
                    label: spec.label,
                    required: spec.required,
                })
                .collect(),
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                form_info!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(AppError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        ron::from_str(&content).map_err(|err| AppError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Command-line values win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.submit_timeout_secs = secs;
        }
        if let Some(draft) = &cli.draft {
            self.draft_path = draft.clone();
        }
    }

    pub fn field_specs(&self) -> Vec<FieldSpec> {
        self.fields
            .iter()
            .map(|field| FieldSpec {
                name: field.name.clone(),
                label: field.label.clone(),
                required: field.required,
            })
            .collect()
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            submit_timeout: Duration::from_secs(self.submit_timeout_secs.max(1)),
        }
    }
}
