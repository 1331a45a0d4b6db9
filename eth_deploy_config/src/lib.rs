//! Deployment/build configuration for an EVM smart-contract toolchain.
//!
//! The crate declares, as plain data, everything the external deploy
//! framework needs to target a network: the network table (local
//! unit-test nodes plus remote networks reached through an HD-wallet
//! signer), the solc version/optimizer pin, gas-report options for test
//! runs, the plugin list, and the API-key table for verification
//! services.
//!
//! Loading the configuration performs no network I/O and reads no
//! secrets; those happen only when a remote entry's wallet builder is
//! explicitly invoked.

pub mod config;
pub mod env;
pub mod error;
pub mod networks;
pub mod wallet;

pub use config::DeployConfig;
pub use error::ConfigError;
pub use networks::{Connection, NetworkEntry, NetworkTable};
pub use wallet::{EndpointSource, EtherSigner, HdWalletConfig, HdWalletProvider};
