//! HD-wallet signer construction for remote networks.
//!
//! A [`HdWalletConfig`] is inert data inside the network table; nothing
//! is read from the environment and no connection is made until
//! [`HdWalletConfig::build`] runs. Every build returns a fresh
//! [`HdWalletProvider`] — instances are never cached or shared between
//! deployment runs.

use std::fmt;
use std::sync::Arc;

use dotenv::dotenv;
use ethers::{
    core::k256::ecdsa::SigningKey,
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet},
    types::Address,
};
use serde::{Deserialize, Serialize};
use url::Url;
use zeroize::Zeroizing;

use crate::env::{require_env, MNEMONIC_ENV_VAR};
use crate::error::{ConfigError, Result};

pub type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

/// Where a remote network's RPC endpoint comes from. Most networks read
/// theirs from the environment; bsc and matic pin a public endpoint
/// instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointSource {
    /// Name of the environment variable holding the RPC URL, resolved
    /// when the wallet provider is built.
    Env(String),
    /// A pinned RPC URL.
    Literal(String),
}

impl EndpointSource {
    pub fn resolve(&self) -> Result<String> {
        match self {
            EndpointSource::Env(name) => require_env(name),
            EndpointSource::Literal(value) => Ok(value.clone()),
        }
    }
}

/// Everything needed to derive signing wallets for one remote network:
/// the endpoint source and the derivation index range
/// `[address_index, address_index + address_count)`. The mnemonic itself
/// is never part of the configuration; it is read from `MNEMONIC` at
/// build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdWalletConfig {
    pub endpoint: EndpointSource,
    pub address_index: u32,
    pub address_count: u32,
}

impl HdWalletConfig {
    /// Build a provider using the recovery phrase from the environment.
    /// Fails with [`ConfigError::MissingEnvVar`] before touching anything
    /// else if `MNEMONIC` is unset or blank.
    pub fn build(&self, chain_id: u64) -> Result<HdWalletProvider> {
        dotenv().ok();
        let mnemonic = Zeroizing::new(require_env(MNEMONIC_ENV_VAR)?);
        self.build_with_mnemonic(&mnemonic, chain_id)
    }

    /// Build a provider from an explicit recovery phrase. Derivation is
    /// deterministic, so this is also the seam the tests go through.
    pub fn build_with_mnemonic(&self, mnemonic: &str, chain_id: u64) -> Result<HdWalletProvider> {
        let endpoint = self.endpoint.resolve()?;
        let url = Url::parse(&endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            url: endpoint.clone(),
            source,
        })?;

        log::debug!(
            "deriving {} wallet(s) at indices {}..{} for chain id {}",
            self.address_count,
            self.address_index,
            self.address_index + self.address_count,
            chain_id
        );

        let mut wallets = Vec::with_capacity(self.address_count as usize);
        for index in self.address_index..self.address_index + self.address_count {
            let wallet = MnemonicBuilder::<English>::default()
                .phrase(mnemonic)
                .index(index)?
                .build()?
                .with_chain_id(chain_id);
            wallets.push(wallet);
        }

        let provider = Provider::new(Http::new(url));
        Ok(HdWalletProvider { provider, wallets })
    }
}

/// A connected HTTP provider plus the wallets derived for its index
/// range. Signing and broadcasting happen through [`Self::signer`];
/// the deploy framework submits from the first address by default.
pub struct HdWalletProvider {
    provider: Provider<Http>,
    wallets: Vec<Wallet<SigningKey>>,
}

// key material stays out of debug output
impl fmt::Debug for HdWalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdWalletProvider")
            .field("addresses", &self.addresses())
            .finish_non_exhaustive()
    }
}

impl HdWalletProvider {
    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.wallets.iter().map(|wallet| wallet.address()).collect()
    }

    /// Signer for the nth derived wallet (0-based within the configured
    /// range), or `None` past the end of the range.
    pub fn signer(&self, n: usize) -> Option<Arc<EtherSigner>> {
        self.wallets
            .get(n)
            .map(|wallet| Arc::new(SignerMiddleware::new(self.provider.clone(), wallet.clone())))
    }
}
