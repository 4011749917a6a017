use crate::error::{DropTokenError, Result};
use serde::{Deserialize, Serialize};
use shared::{DEFAULT_WIN_LENGTH, GAME_ID_PREFIX};

/// Settings shared by every game a registry creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Pieces in a row needed to win
    pub win_length: usize,
    /// Prefix of allocated game identifiers, followed by a counter
    pub id_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            win_length: DEFAULT_WIN_LENGTH,
            id_prefix: GAME_ID_PREFIX.to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.win_length == 0 {
            return Err(DropTokenError::invalid_argument(
                "win_length must be > 0",
            ));
        }
        if self.id_prefix.trim().is_empty() {
            return Err(DropTokenError::invalid_argument(
                "id_prefix must not be empty",
            ));
        }
        Ok(())
    }
}
