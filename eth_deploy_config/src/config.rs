//! The top-level configuration object handed to the deploy framework:
//! network table, test-runner options, compiler pin, plugin list, and
//! the API-key table. Built once at tool startup and read-only after.

use std::collections::BTreeMap;

use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::env::{require_env, ETHERSCAN_API_KEY_ENV_VAR};
use crate::error::{ConfigError, Result};
use crate::networks::NetworkTable;

pub const VERIFY_PLUGIN: &str = "verify";

/// Options forwarded to the external test harness: reporter selection
/// and the display currency for gas-cost reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRunnerConfig {
    pub enable_timeouts: bool,
    pub reporter: String,
    pub reporter_options: ReporterOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReporterOptions {
    pub currency: String,
}

impl Default for TestRunnerConfig {
    fn default() -> Self {
        TestRunnerConfig {
            enable_timeouts: false,
            reporter: "gas-reporter".to_owned(),
            reporter_options: ReporterOptions {
                currency: "USD".to_owned(),
            },
        }
    }
}

/// Compiler settings, passed through unmodified to the external solc
/// invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub solc: SolcConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolcConfig {
    pub version: String,
    pub settings: SolcSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolcSettings {
    pub optimizer: OptimizerSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            solc: SolcConfig {
                version: "0.5.0".to_owned(),
                settings: SolcSettings {
                    optimizer: OptimizerSettings {
                        enabled: true,
                        runs: 200,
                    },
                },
            },
        }
    }
}

/// API keys for external verification services, keyed by service name.
/// The table stores only the *name* of the environment variable holding
/// each secret; the value is read at lookup time and never kept or
/// logged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialTable {
    sources: BTreeMap<String, String>,
}

impl CredentialTable {
    pub fn standard() -> Self {
        let mut sources = BTreeMap::new();
        sources.insert("etherscan".to_owned(), ETHERSCAN_API_KEY_ENV_VAR.to_owned());
        CredentialTable { sources }
    }

    /// Resolve a service's key from the environment.
    pub fn lookup(&self, service: &str) -> Result<Zeroizing<String>> {
        let var = self
            .sources
            .get(service)
            .ok_or_else(|| ConfigError::UnknownService(service.to_owned()))?;
        require_env(var).map(Zeroizing::new)
    }

    /// The environment variable a service's key is sourced from.
    pub fn source(&self, service: &str) -> Option<&str> {
        self.sources.get(service).map(String::as_str)
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub networks: NetworkTable,
    pub test_runner: TestRunnerConfig,
    pub compilers: CompilerConfig,
    pub plugins: Vec<String>,
    pub api_keys: CredentialTable,
}

impl DeployConfig {
    /// Assemble the full configuration. Reads `.env` so later endpoint
    /// and credential lookups see it, but resolves no secrets here.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Ok(DeployConfig {
            networks: NetworkTable::standard()?,
            test_runner: TestRunnerConfig::default(),
            compilers: CompilerConfig::default(),
            plugins: vec![VERIFY_PLUGIN.to_owned()],
            api_keys: CredentialTable::standard(),
        })
    }
}
