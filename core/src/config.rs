use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::error::{Error, Result};

pub const ENV_SPREADSHEET_ID: &str = "TRAINLOG_SPREADSHEET_ID";
pub const ENV_ACCESS_TOKEN: &str = "TRAINLOG_ACCESS_TOKEN";
pub const ENV_PLOT_DIR: &str = "TRAINLOG_PLOT_DIR";

/// Tilgang og oppsett for regnearket. Sendes inn ved konstruksjon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    /// Fil med bearer-token (hentes utenfor dette programmet).
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    /// Token direkte (vanligvis fra miljøvariabel, aldri skrevet til disk).
    #[serde(skip)]
    pub access_token: Option<String>,
    #[serde(default = "default_workout_tab")]
    pub workout_tab: String,
    #[serde(default = "default_weight_tab")]
    pub weight_tab: String,
    /// Maks antall rader i vektfanen (dag 1..31 + litt luft).
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Rader som hoppes over øverst i hver månedskolonne før ukesbøtter.
    #[serde(default = "default_history_skip_rows")]
    pub history_skip_rows: usize,
    #[serde(default = "default_plot_dir")]
    pub plot_dir: PathBuf,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_workout_tab() -> String { "тренировки".to_string() }
fn default_weight_tab() -> String { "вес".to_string() }
fn default_max_rows() -> usize { 40 }
fn default_history_skip_rows() -> usize { 1 }
fn default_plot_dir() -> PathBuf { PathBuf::from(".") }
fn default_api_base() -> String { "https://sheets.googleapis.com/v4".to_string() }
fn default_timeout_secs() -> u64 { 10 }

impl SheetConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            credentials_path: None,
            access_token: None,
            workout_tab: default_workout_tab(),
            weight_tab: default_weight_tab(),
            max_rows: default_max_rows(),
            history_skip_rows: default_history_skip_rows(),
            plot_dir: default_plot_dir(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Tolker JSON. Feilen peker på stien som feilet, f.eks. `max_rows`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let de = &mut serde_json::Deserializer::from_str(s);
        spte::deserialize(de).map_err(|e| Error::ConfigParse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    /// Leser konfig fra disk og legger på miljøvariabler.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_json_str(&contents)?.with_env_overrides(|k| std::env::var(k).ok());
        info!("konfig lastet fra {} (dokument {})", path.display(), cfg.spreadsheet_id);
        Ok(cfg)
    }

    /// Miljøoverstyring. `lookup` gjør det testbart uten å røre prosessens miljø.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(ENV_SPREADSHEET_ID).filter(|v| !v.trim().is_empty()) {
            self.spreadsheet_id = id;
        }
        if let Some(tok) = lookup(ENV_ACCESS_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.access_token = Some(tok.trim().to_string());
        }
        if let Some(dir) = lookup(ENV_PLOT_DIR).filter(|v| !v.trim().is_empty()) {
            self.plot_dir = PathBuf::from(dir);
        }
        self
    }

    /// Token: miljø først, deretter fil.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(tok) = &self.access_token {
            return Ok(tok.clone());
        }
        let path = self.credentials_path.as_ref().ok_or(Error::MissingCredentials)?;
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Credentials {
            path: path.display().to_string(),
            source,
        })?;
        let tok = raw.trim();
        if tok.is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(tok.to_string())
    }
}
