use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    MissingEnvVar(String),

    #[error("network `{0}` is not configured")]
    UnknownNetwork(String),

    #[error("no API key configured for service `{0}`")]
    UnknownService(String),

    #[error("shared network parameters do not define `{0}`")]
    MissingLocalNetwork(String),

    #[error("malformed shared network parameters: {0}")]
    NetworkParams(#[from] serde_json::Error),

    #[error("invalid endpoint URL `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },

    #[error("wallet derivation failed: {0}")]
    Wallet(#[from] ethers::signers::WalletError),

    #[error("entry connects to a local node; there is no wallet provider to build")]
    NoProviderFactory,

    #[error("cannot derive wallets for a wildcard network id")]
    WildcardChainId,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
