//! Runtime configuration. Every section has serde defaults so a partial (or
//! empty) TOML file yields a working engine.

mod defaults;
mod policy_config;
mod snapshot_config;
mod storage_config;

pub use policy_config::{PolicyConfig, PromotionBand, RolePolicy};
pub use snapshot_config::SnapshotConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{KeelError, KeelResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeelConfig {
    pub storage: StorageConfig,
    pub policy: PolicyConfig,
    pub snapshot: SnapshotConfig,
}

impl KeelConfig {
    /// Parse a TOML document and validate the policy section.
    pub fn from_toml(content: &str) -> KeelResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| KeelError::ConfigError(format!("failed to parse config: {e}")))?;
        config.policy.validate()?;
        Ok(config)
    }
}
