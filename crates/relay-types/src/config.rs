//! Configuration types for an OpenRelay instance.

use serde::{Deserialize, Serialize};

use crate::{Address, RelayError, Result, constants};

/// Configuration for a single relay instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Holder of the administrative capability.
    pub admin: Address,
    /// Maximum number of (wallet, amount) pairs in one settlement batch.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Whether forwarding and settlement start out paused.
    #[serde(default)]
    pub start_paused: bool,
}

fn default_max_batch_size() -> usize {
    constants::DEFAULT_MAX_BATCH_SIZE
}

impl RelayConfig {
    /// Default configuration administered by `admin`.
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            max_batch_size: constants::DEFAULT_MAX_BATCH_SIZE,
            start_paused: false,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| RelayError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.admin.is_zero() {
            return Err(RelayError::Configuration(
                "admin must not be the null address".into(),
            ));
        }
        if self.max_batch_size == 0 || self.max_batch_size > constants::MAX_BATCH_SIZE_LIMIT {
            return Err(RelayError::Configuration(format!(
                "max_batch_size must be in 1..={}, got {}",
                constants::MAX_BATCH_SIZE_LIMIT,
                self.max_batch_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RelayConfig::new(Address::from_low_u64(1));
        assert_eq!(cfg.max_batch_size, 500);
        assert!(!cfg.start_paused);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let cfg = RelayConfig::from_json(
            r#"{"admin":[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,9]}"#,
        )
        .unwrap();
        assert_eq!(cfg.admin, Address::from_low_u64(9));
        assert_eq!(cfg.max_batch_size, constants::DEFAULT_MAX_BATCH_SIZE);
    }

    #[test]
    fn null_admin_rejected() {
        let err = RelayConfig::new(Address::ZERO).validate().unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }

    #[test]
    fn zero_batch_size_rejected() {
        let mut cfg = RelayConfig::new(Address::from_low_u64(1));
        cfg.max_batch_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = RelayConfig::from_json("{").unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }
}
