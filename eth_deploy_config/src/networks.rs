//! The network table: every network the deploy framework can be pointed
//! at, keyed by the name given on the command line.
//!
//! The three local unit-test entries are re-exported from the shared
//! [`test_network_params`] collection rather than defined here, so this
//! table stays in lockstep with every other consumer of those nodes.
//! Remote entries carry an inert [`HdWalletConfig`]; selecting a network
//! has no side effects until its provider is actually built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use test_network_params::{LocalNetwork, NetworkId};

use crate::env::{
    MAINNET_PROVIDER_ENV_VAR, RINKEBY_PROVIDER_ENV_VAR, ROPSTEN_PROVIDER_ENV_VAR,
};
use crate::error::{ConfigError, Result};
use crate::wallet::{EndpointSource, HdWalletConfig, HdWalletProvider};

pub const GANACHE_UNIT_TEST: &str = "ganacheUnitTest";
pub const GETH_UNIT_TEST: &str = "gethUnitTest";
pub const TESTRPC_COVERAGE: &str = "testrpcCoverage";
pub const RINKEBY: &str = "rinkeby";
pub const ROPSTEN: &str = "ropsten";
pub const BSC: &str = "bsc";
pub const MAINNET: &str = "mainnet";
pub const MATIC: &str = "matic";

/// How the framework reaches the network's node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Connection {
    /// A locally-run test node.
    LocalNode { host: String, port: u16 },
    /// A remote node reached through a mnemonic-derived signer.
    HdWallet(HdWalletConfig),
}

/// One named network: chain identity, connection wiring, and transaction
/// economics. Optional fields fall back to the deploy framework's
/// defaults when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkEntry {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    pub network_id: NetworkId,
    #[serde(flatten)]
    pub connection: Connection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    /// Wei per gas unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_blocks: Option<u64>,
    #[serde(default)]
    pub skip_dry_run: bool,
}

impl NetworkEntry {
    pub fn chain_id(&self) -> Option<u64> {
        self.network_id.id()
    }

    pub fn wallet_config(&self) -> Option<&HdWalletConfig> {
        match &self.connection {
            Connection::HdWallet(config) => Some(config),
            Connection::LocalNode { .. } => None,
        }
    }

    /// Build this entry's wallet provider. Local entries have none, and
    /// a wallet cannot be bound to a wildcard network id.
    pub fn build_provider(&self) -> Result<HdWalletProvider> {
        let config = self
            .wallet_config()
            .ok_or(ConfigError::NoProviderFactory)?;
        let chain_id = self.chain_id().ok_or(ConfigError::WildcardChainId)?;
        config.build(chain_id)
    }
}

impl From<LocalNetwork> for NetworkEntry {
    fn from(local: LocalNetwork) -> Self {
        NetworkEntry {
            ref_name: Some(local.ref_name),
            network_id: local.network_id,
            connection: Connection::LocalNode {
                host: local.host,
                port: local.port,
            },
            gas: local.gas,
            gas_price: local.gas_price,
            confirmations: None,
            timeout_blocks: None,
            skip_dry_run: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkTable {
    entries: BTreeMap<String, NetworkEntry>,
}

impl NetworkTable {
    /// The canonical table: shared local unit-test networks plus the
    /// five remote deployment targets.
    pub fn standard() -> Result<Self> {
        let mut entries = BTreeMap::new();

        let shared = test_network_params::load()?;
        for name in [GANACHE_UNIT_TEST, GETH_UNIT_TEST, TESTRPC_COVERAGE] {
            let params = shared
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::MissingLocalNetwork(name.to_owned()))?;
            entries.insert(name.to_owned(), params.into());
        }

        entries.insert(
            RINKEBY.to_owned(),
            NetworkEntry {
                ref_name: None,
                network_id: NetworkId::Id(4),
                connection: Connection::HdWallet(HdWalletConfig {
                    endpoint: EndpointSource::Env(RINKEBY_PROVIDER_ENV_VAR.to_owned()),
                    address_index: 1,
                    address_count: 2,
                }),
                gas: Some(6_500_000),
                gas_price: Some(2_000_000_000), // 2 gwei
                confirmations: None,
                timeout_blocks: None,
                skip_dry_run: false,
            },
        );

        entries.insert(
            ROPSTEN.to_owned(),
            NetworkEntry {
                ref_name: None,
                network_id: NetworkId::Id(3),
                connection: Connection::HdWallet(HdWalletConfig {
                    endpoint: EndpointSource::Env(ROPSTEN_PROVIDER_ENV_VAR.to_owned()),
                    address_index: 1,
                    address_count: 2,
                }),
                gas: Some(3_500_000),
                gas_price: Some(100_000_000_000), // 100 gwei
                confirmations: None,
                timeout_blocks: None,
                skip_dry_run: false,
            },
        );

        entries.insert(
            BSC.to_owned(),
            NetworkEntry {
                ref_name: None,
                network_id: NetworkId::Id(56),
                connection: Connection::HdWallet(HdWalletConfig {
                    // pinned public endpoint; the env-sourced networks
                    // read theirs at build time instead
                    endpoint: EndpointSource::Literal(
                        "https://bsc-dataseed1.binance.org".to_owned(),
                    ),
                    address_index: 16,
                    address_count: 19,
                }),
                gas: None,
                gas_price: None,
                confirmations: Some(10),
                timeout_blocks: Some(200),
                skip_dry_run: true,
            },
        );

        entries.insert(
            MAINNET.to_owned(),
            NetworkEntry {
                ref_name: Some("mainnet-prod".to_owned()),
                network_id: NetworkId::Id(1),
                connection: Connection::HdWallet(HdWalletConfig {
                    endpoint: EndpointSource::Env(MAINNET_PROVIDER_ENV_VAR.to_owned()),
                    address_index: 16,
                    address_count: 19,
                }),
                gas: Some(6_500_000),
                gas_price: Some(140_000_000_000), // 140 gwei
                confirmations: None,
                timeout_blocks: None,
                skip_dry_run: false,
            },
        );

        entries.insert(
            MATIC.to_owned(),
            NetworkEntry {
                ref_name: None,
                network_id: NetworkId::Id(137),
                connection: Connection::HdWallet(HdWalletConfig {
                    endpoint: EndpointSource::Literal(
                        "https://rpc-mainnet.matic.network".to_owned(),
                    ),
                    address_index: 1,
                    address_count: 2,
                }),
                gas: Some(7_000_000),
                gas_price: Some(10_000_000_000), // 10 gwei
                confirmations: None,
                timeout_blocks: None,
                skip_dry_run: true,
            },
        );

        log::debug!("network table loaded with {} entries", entries.len());
        Ok(NetworkTable { entries })
    }

    /// Look up the entry for a network named on the command line.
    pub fn get(&self, name: &str) -> Result<&NetworkEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_chain_ids_match_the_real_networks() {
        let table = NetworkTable::standard().unwrap();

        for (name, chain_id) in [
            (MAINNET, 1),
            (ROPSTEN, 3),
            (RINKEBY, 4),
            (BSC, 56),
            (MATIC, 137),
        ] {
            let entry = table.get(name).unwrap();
            assert_eq!(entry.chain_id(), Some(chain_id), "chain id for {name}");
            assert!(entry.wallet_config().is_some(), "{name} should be remote");
        }
    }

    #[test]
    fn local_entries_are_reexported_with_wildcard_ids() {
        let table = NetworkTable::standard().unwrap();

        for name in [GANACHE_UNIT_TEST, GETH_UNIT_TEST, TESTRPC_COVERAGE] {
            let entry = table.get(name).unwrap();
            assert_eq!(entry.chain_id(), None, "{name} should match any chain");
            assert!(matches!(
                entry.connection,
                Connection::LocalNode { .. }
            ));
        }

        assert_eq!(table.len(), 8);
    }

    #[test]
    fn unknown_network_is_an_error() {
        let table = NetworkTable::standard().unwrap();
        let err = table.get("kovan").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(name) if name == "kovan"));
    }

    #[test]
    fn transaction_economics_per_network() {
        let table = NetworkTable::standard().unwrap();

        let rinkeby = table.get(RINKEBY).unwrap();
        assert_eq!(rinkeby.gas, Some(6_500_000));
        assert_eq!(rinkeby.gas_price, Some(2_000_000_000));

        let mainnet = table.get(MAINNET).unwrap();
        assert_eq!(mainnet.ref_name.as_deref(), Some("mainnet-prod"));
        assert_eq!(mainnet.gas_price, Some(140_000_000_000));
        let wallet = mainnet.wallet_config().unwrap();
        assert_eq!(wallet.address_index, 16);
        assert_eq!(wallet.address_count, 19);

        let bsc = table.get(BSC).unwrap();
        assert_eq!(bsc.confirmations, Some(10));
        assert_eq!(bsc.timeout_blocks, Some(200));
        assert!(bsc.skip_dry_run);
        assert_eq!(
            bsc.wallet_config().unwrap().endpoint,
            EndpointSource::Literal("https://bsc-dataseed1.binance.org".to_owned())
        );

        let matic = table.get(MATIC).unwrap();
        assert!(matic.skip_dry_run);
        assert_eq!(matic.gas, Some(7_000_000));
    }

    #[test]
    fn local_entries_refuse_to_build_a_provider() {
        let table = NetworkTable::standard().unwrap();
        let err = table.get(GANACHE_UNIT_TEST).unwrap().build_provider().unwrap_err();
        assert!(matches!(err, ConfigError::NoProviderFactory));
    }

    #[test]
    fn missing_mnemonic_fails_fast() {
        std::env::remove_var(crate::env::MNEMONIC_ENV_VAR);

        let table = NetworkTable::standard().unwrap();
        // matic pins its endpoint, so the only environment read left is
        // the recovery phrase
        let err = table.get(MATIC).unwrap().build_provider().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnvVar(name) if name == crate::env::MNEMONIC_ENV_VAR
        ));
    }

    #[test]
    fn mainnet_provider_builds_are_independent() {
        const TEST_MNEMONIC: &str =
            "test test test test test test test test test test test junk";
        // only this test reads the mainnet endpoint variable
        std::env::set_var(MAINNET_PROVIDER_ENV_VAR, "http://localhost:8545");

        let table = NetworkTable::standard().unwrap();
        let entry = table.get(MAINNET).unwrap();
        let wallet = entry.wallet_config().unwrap();
        let chain_id = entry.chain_id().unwrap();

        let first = wallet.build_with_mnemonic(TEST_MNEMONIC, chain_id).unwrap();
        let second = wallet.build_with_mnemonic(TEST_MNEMONIC, chain_id).unwrap();

        assert!(!std::ptr::eq(first.provider(), second.provider()));
        assert_eq!(first.addresses(), second.addresses());
        assert_eq!(first.addresses().len(), 19);

        std::env::remove_var(MAINNET_PROVIDER_ENV_VAR);
    }

    #[test]
    fn table_round_trips_through_json() {
        let table = NetworkTable::standard().unwrap();
        let encoded = serde_json::to_string_pretty(&table).unwrap();
        let decoded: NetworkTable = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, table);
    }
}
