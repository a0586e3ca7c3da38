use crate::ledger::NetBalancePolicy;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::LedgerConfig;

/// How customer headline balances are derived.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub policy: NetBalancePolicy,
}

/// Where rendered statements land and how the files are named.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: PathBuf::from("khata-statements"),
            file_prefix: "khata-mini-statement".to_string(),
        }
    }
}

/// Statement label language.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: Locale,
}
