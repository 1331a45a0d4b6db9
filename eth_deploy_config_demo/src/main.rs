//! Resolve a network from the deployment configuration and show what the
//! deploy framework would see: the entry's parameters, and for remote
//! networks the derived signing addresses plus a chain-id cross-check
//! against the live node.
//!
//! Usage: `eth_deploy_config_demo [network-name]` (defaults to
//! `ganacheUnitTest`). Remote networks need `MNEMONIC` (and, for the
//! env-sourced entries, their provider URL variable) set or in `.env`.

use anyhow::{bail, Context};
use ethers::providers::Middleware;
use eth_deploy_config::networks::GANACHE_UNIT_TEST;
use eth_deploy_config::{Connection, DeployConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DeployConfig::load()?;
    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| GANACHE_UNIT_TEST.to_owned());

    let entry = config.networks.get(&name)?;

    println!("network:      {name}");
    println!("network id:   {}", entry.network_id);
    if let Some(ref_name) = &entry.ref_name {
        println!("ref:          {ref_name}");
    }
    if let Some(gas) = entry.gas {
        println!("gas limit:    {gas}");
    }
    if let Some(gas_price) = entry.gas_price {
        println!("gas price:    {gas_price} wei");
    }
    if let Some(confirmations) = entry.confirmations {
        println!("confirmations: {confirmations}");
    }
    if let Some(timeout_blocks) = entry.timeout_blocks {
        println!("timeout:      {timeout_blocks} blocks");
    }
    if entry.skip_dry_run {
        println!("dry run:      skipped");
    }

    match &entry.connection {
        Connection::LocalNode { host, port } => {
            println!("connection:   local node at {host}:{port}");
            println!("(local test networks use the framework's own accounts; nothing to build)");
        }
        Connection::HdWallet(wallet) => {
            println!(
                "connection:   HD wallet, indices {}..{}",
                wallet.address_index,
                wallet.address_index + wallet.address_count
            );

            let provider = entry
                .build_provider()
                .context("building the wallet provider")?;
            for (n, address) in provider.addresses().iter().enumerate() {
                println!("address {:>2}:   {address:?}", wallet.address_index as usize + n);
            }

            log::debug!("querying the node for its chain id");
            let reported = provider
                .provider()
                .get_chainid()
                .await
                .context("querying the node's chain id")?;
            println!("node chain id: {reported}");

            let configured = entry.chain_id().expect("remote entries carry a chain id");
            if reported != configured.into() {
                bail!(
                    "node reports chain id {reported}, but `{name}` is configured for {configured}"
                );
            }
            println!("chain id matches the configured network");
        }
    }

    Ok(())
}
