//! Known Antelope networks and their default API hosts.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseNetworkError;

/// A named network preset.
///
/// Each preset resolves to the public API host used when no explicit host
/// is configured on [`NetBuilder`](crate::NetBuilder).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Network {
    EosMainnet,
    KylinTestnet,
    Jungle3Testnet,
    Jungle4Testnet,
    TelosMainnet,
    TelosTestnet,
    ProtonMainnet,
    ProtonTestnet,
    UosMainnet,
    FioMainnet,
    WaxTestnet,
    WaxMainnet,
    /// A node running on this machine.
    #[default]
    Local,
}

impl Network {
    /// Every preset, in declaration order.
    pub const ALL: [Network; 13] = [
        Network::EosMainnet,
        Network::KylinTestnet,
        Network::Jungle3Testnet,
        Network::Jungle4Testnet,
        Network::TelosMainnet,
        Network::TelosTestnet,
        Network::ProtonMainnet,
        Network::ProtonTestnet,
        Network::UosMainnet,
        Network::FioMainnet,
        Network::WaxTestnet,
        Network::WaxMainnet,
        Network::Local,
    ];

    /// The API host used when none is given explicitly.
    pub fn default_host(&self) -> &'static str {
        match self {
            Network::EosMainnet => "https://api.eos.detroitledger.tech",
            Network::KylinTestnet => "https://kylin.eossweden.org",
            Network::Jungle3Testnet => "https://jungle3.eossweden.org",
            Network::Jungle4Testnet => "https://jungle4.api.eosnation.io",
            Network::TelosMainnet => "https://telos.caleos.io/",
            Network::TelosTestnet => "https://testnet.telos.detroitledger.tech",
            Network::ProtonMainnet => "https://proton.cryptolions.io",
            Network::ProtonTestnet => "https://testnet.protonchain.com",
            Network::UosMainnet => "https://uos.eosusa.news",
            Network::FioMainnet => "https://fio.cryptolions.io",
            Network::WaxTestnet => "https://testnet.wax.detroitledger.tech",
            Network::WaxMainnet => "https://api.wax.detroitledger.tech",
            Network::Local => "http://127.0.0.1:8888",
        }
    }

    /// Returns true for the local development node.
    pub fn is_local(&self) -> bool {
        matches!(self, Network::Local)
    }

    /// Returns true for public test networks.
    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            Network::KylinTestnet
                | Network::Jungle3Testnet
                | Network::Jungle4Testnet
                | Network::TelosTestnet
                | Network::ProtonTestnet
                | Network::WaxTestnet
        )
    }

    /// Returns the network identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::EosMainnet => "eos_mainnet",
            Network::KylinTestnet => "kylin_testnet",
            Network::Jungle3Testnet => "jungle3_testnet",
            Network::Jungle4Testnet => "jungle4_testnet",
            Network::TelosMainnet => "telos_mainnet",
            Network::TelosTestnet => "telos_testnet",
            Network::ProtonMainnet => "proton_mainnet",
            Network::ProtonTestnet => "proton_testnet",
            Network::UosMainnet => "uos_mainnet",
            Network::FioMainnet => "fio_mainnet",
            Network::WaxTestnet => "wax_testnet",
            Network::WaxMainnet => "wax_mainnet",
            Network::Local => "local",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    /// Accepts `snake_case`, `kebab-case` and any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == normalized)
            .ok_or_else(|| ParseNetworkError(s.to_string()))
    }
}
