//! Environment variable names consumed by the configuration, and the
//! lookup helper every secret and endpoint resolution goes through.

use std::env;

use crate::error::{ConfigError, Result};

pub const MNEMONIC_ENV_VAR: &str = "MNEMONIC";
pub const RINKEBY_PROVIDER_ENV_VAR: &str = "RINKEBY_PROVIDER";
pub const ROPSTEN_PROVIDER_ENV_VAR: &str = "ROPSTEN_PROVIDER";
pub const MAINNET_PROVIDER_ENV_VAR: &str = "MAINNET_PROVIDER";
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Read a required variable. A set-but-blank value counts as missing.
pub fn require_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        // a variable name no other test (or the library) touches
        const VAR: &str = "ETH_DEPLOY_CONFIG_ENV_TEST_VAR";

        env::remove_var(VAR);
        assert!(matches!(
            require_env(VAR),
            Err(ConfigError::MissingEnvVar(name)) if name == VAR
        ));

        env::set_var(VAR, "   ");
        assert!(matches!(
            require_env(VAR),
            Err(ConfigError::MissingEnvVar(_))
        ));

        env::set_var(VAR, "http://localhost:8545");
        assert_eq!(require_env(VAR).unwrap(), "http://localhost:8545");

        env::remove_var(VAR);
    }
}
