//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::primitives::Address;
use clap::ValueEnum;
use serde::Serialize;

use crate::constants::{
    KAYA_ARTIFACT, KAYA_CENTER_ARTIFACT, KAYA_CENTER_IMPL_KEY, KAYA_DISTRIBUTOR_ARTIFACT,
    KAYA_DISTRIBUTOR_IMPL_KEY, KAYA_ESCROW_ARTIFACT, KAYA_ESCROW_KEY, KAYA_KEY,
    KAYA_PROXY_ARTIFACT, SO_KAYA_ARTIFACT, SO_KAYA_IMPL_KEY,
};

/// The contracts in the Kaya suite
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum KayaContract {
    /// The Kaya token
    Kaya,
    /// The Kaya center implementation
    KayaCenter,
    /// The Kaya distributor implementation
    KayaDistributor,
    /// The Kaya escrow
    KayaEscrow,
    /// The soKaya implementation
    SoKaya,
    /// The upgradeable proxy
    KayaProxy,
}

impl KayaContract {
    /// The name of the contract's compilation artifact
    pub fn artifact_name(&self) -> &'static str {
        match self {
            KayaContract::Kaya => KAYA_ARTIFACT,
            KayaContract::KayaCenter => KAYA_CENTER_ARTIFACT,
            KayaContract::KayaDistributor => KAYA_DISTRIBUTOR_ARTIFACT,
            KayaContract::KayaEscrow => KAYA_ESCROW_ARTIFACT,
            KayaContract::SoKaya => SO_KAYA_ARTIFACT,
            KayaContract::KayaProxy => KAYA_PROXY_ARTIFACT,
        }
    }

    /// The key under which a standalone deployment of the contract is
    /// recorded in the deployments file.
    ///
    /// Proxies have no fixed key, they are recorded under a caller-chosen one.
    pub fn deployment_key(&self) -> Option<&'static str> {
        match self {
            KayaContract::Kaya => Some(KAYA_KEY),
            KayaContract::KayaCenter => Some(KAYA_CENTER_IMPL_KEY),
            KayaContract::KayaDistributor => Some(KAYA_DISTRIBUTOR_IMPL_KEY),
            KayaContract::KayaEscrow => Some(KAYA_ESCROW_KEY),
            KayaContract::SoKaya => Some(SO_KAYA_IMPL_KEY),
            KayaContract::KayaProxy => None,
        }
    }
}

impl Display for KayaContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KayaContract::Kaya => write!(f, "kaya"),
            KayaContract::KayaCenter => write!(f, "kaya-center"),
            KayaContract::KayaDistributor => write!(f, "kaya-distributor"),
            KayaContract::KayaEscrow => write!(f, "kaya-escrow"),
            KayaContract::SoKaya => write!(f, "so-kaya"),
            KayaContract::KayaProxy => write!(f, "kaya-proxy"),
        }
    }
}

/// Parameters of a suite deployment which are not addresses of the suite itself
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeployParams {
    /// The admin of every proxy
    pub admin: Address,
    /// The governance account handed to the center's initializer
    pub governance: Address,
}

impl DeployParams {
    /// Parameters in which the deployer is both proxy admin and governance
    pub fn from_deployer(deployer: Address) -> Self {
        Self {
            admin: deployer,
            governance: deployer,
        }
    }
}

/// The addresses of a fully deployed Kaya suite.
///
/// Serializes to the flat layout of the deployments file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KayaDeployment {
    /// The distributor implementation
    #[serde(rename = "KayaDistributorImpl")]
    pub distributor_impl: Address,
    /// The center implementation
    #[serde(rename = "KayaCenterImpl")]
    pub center_impl: Address,
    /// The soKaya implementation
    #[serde(rename = "SoKayaImpl")]
    pub so_kaya_impl: Address,
    /// The Kaya token
    #[serde(rename = "Kaya")]
    pub kaya: Address,
    /// The distributor proxy
    #[serde(rename = "KayaDistributor")]
    pub distributor: Address,
    /// The center proxy
    #[serde(rename = "KayaCenter")]
    pub center: Address,
    /// The soKaya proxy
    #[serde(rename = "SoKaya")]
    pub so_kaya: Address,
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::constants::{KAYA_CENTER_KEY, KAYA_DISTRIBUTOR_KEY, SO_KAYA_KEY};

    #[test]
    fn test_deployment_serializes_to_deployment_keys() {
        let deployment = KayaDeployment {
            distributor_impl: address!("0000000000000000000000000000000000000001"),
            center_impl: address!("0000000000000000000000000000000000000002"),
            so_kaya_impl: address!("0000000000000000000000000000000000000003"),
            kaya: address!("0000000000000000000000000000000000000004"),
            distributor: address!("0000000000000000000000000000000000000005"),
            center: address!("0000000000000000000000000000000000000006"),
            so_kaya: address!("0000000000000000000000000000000000000007"),
        };

        let value = serde_json::to_value(deployment).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for key in [
            KAYA_DISTRIBUTOR_IMPL_KEY,
            KAYA_CENTER_IMPL_KEY,
            SO_KAYA_IMPL_KEY,
            KAYA_KEY,
            KAYA_DISTRIBUTOR_KEY,
            KAYA_CENTER_KEY,
            SO_KAYA_KEY,
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(
            obj[KAYA_KEY].as_str().unwrap(),
            "0x0000000000000000000000000000000000000004"
        );
    }

    #[test]
    fn test_proxy_has_no_fixed_key() {
        assert_eq!(KayaContract::KayaProxy.deployment_key(), None);
        assert_eq!(
            KayaContract::KayaEscrow.deployment_key(),
            Some(KAYA_ESCROW_KEY)
        );
        assert_eq!(KayaContract::SoKaya.artifact_name(), SO_KAYA_ARTIFACT);
    }
}
