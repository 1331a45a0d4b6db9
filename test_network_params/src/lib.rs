//! Shared connection parameters for the local unit-test networks
//! (ganache, geth dev mode, coverage testrpc). Deployment configurations
//! re-export these entries rather than defining their own, so every
//! consumer runs its tests against the same node wiring.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NETWORK_CONFIG_JSON: &str = include_str!("network_config.json");

/// Network identifier as the deploy framework understands it: either a
/// concrete chain id, or `*` meaning "accept whatever the node reports".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkId {
    Any,
    Id(u64),
}

impl NetworkId {
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkId::Any => None,
            NetworkId::Id(id) => Some(*id),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => write!(f, "*"),
            NetworkId::Id(id) => write!(f, "{id}"),
        }
    }
}

// `*` must serialize as the literal string the external tooling expects,
// so the serde impls are written out rather than derived.
impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Any => serializer.serialize_str("*"),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NetworkIdVisitor;

        impl<'de> Visitor<'de> for NetworkIdVisitor {
            type Value = NetworkId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a chain id number or the wildcard \"*\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<NetworkId, E> {
                Ok(NetworkId::Id(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<NetworkId, E> {
                u64::try_from(value)
                    .map(NetworkId::Id)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<NetworkId, E> {
                match value {
                    "*" => Ok(NetworkId::Any),
                    other => other
                        .parse()
                        .map(NetworkId::Id)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(NetworkIdVisitor)
    }
}

/// Connection parameters for one locally-run node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalNetwork {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub host: String,
    pub port: u16,
    pub network_id: NetworkId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
}

/// Parse the embedded parameter collection. Keyed by the entry names the
/// deploy framework selects on the command line.
pub fn load() -> Result<BTreeMap<String, LocalNetwork>, serde_json::Error> {
    serde_json::from_str(NETWORK_CONFIG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_collection_parses() {
        let networks = load().unwrap();
        assert_eq!(networks.len(), 3);

        let ganache = &networks["ganacheUnitTest"];
        assert_eq!(ganache.ref_name, "ganache-unit-test");
        assert_eq!(ganache.host, "localhost");
        assert_eq!(ganache.port, 8545);
        assert_eq!(ganache.network_id, NetworkId::Any);

        assert_eq!(networks["gethUnitTest"].port, 8550);

        // coverage runs want effectively unbounded gas at unit price
        let coverage = &networks["testrpcCoverage"];
        assert_eq!(coverage.gas, Some(17_592_186_044_415));
        assert_eq!(coverage.gas_price, Some(1));
    }

    #[test]
    fn wildcard_network_id_round_trips() {
        let encoded = serde_json::to_string(&NetworkId::Any).unwrap();
        assert_eq!(encoded, "\"*\"");
        let decoded: NetworkId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, NetworkId::Any);

        let decoded: NetworkId = serde_json::from_str("137").unwrap();
        assert_eq!(decoded, NetworkId::Id(137));
        assert_eq!(decoded.to_string(), "137");
    }

    #[test]
    fn local_network_round_trips() {
        let networks = load().unwrap();
        let encoded = serde_json::to_string(&networks).unwrap();
        let decoded: BTreeMap<String, LocalNetwork> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, networks);
    }
}
