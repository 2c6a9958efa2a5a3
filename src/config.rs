use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use std::path::Path;
use tokio::fs;

pub const CONFIG_FILE: &str = "roulette_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Balance every session starts from; nothing carries over.
    pub starting_balance: i64,
    pub top_up_amount: i64,
    pub frame_interval_ms: u64,
    /// Fixed seed for replaying a session.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            starting_balance: 1000,
            top_up_amount: 1000,
            frame_interval_ms: 16,
            seed: None,
        }
    }
}

impl TableConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
        } else {
            Ok(TableConfig::default())
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).await?;
        Ok(())
    }
}
