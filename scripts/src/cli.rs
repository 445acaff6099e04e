//! Definitions of CLI arguments and commands for deploy scripts

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy_all, deploy_contract, deploy_proxy},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS,
    },
    deployer::{PredictingDeployer, RpcDeployer, Wallet},
    errors::ScriptError,
    types::KayaContract,
};

/// Deploy the Kaya contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "KAYA_ARTIFACTS", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, env = "KAYA_DEPLOYMENTS", default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// The deploy script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deploy scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy & wire together the full Kaya suite
    DeployAll(DeployAllArgs),
    /// Deploy a single contract which takes no constructor arguments
    Deploy(DeployArgs),
    /// Deploy a single `KayaProxy` in front of an existing implementation
    DeployProxy(DeployProxyArgs),
}

impl Command {
    /// Run the command in the given environment
    pub async fn run(self, env: ScriptEnv<'_>) -> Result<(), ScriptError> {
        match self {
            Command::DeployAll(args) => deploy_all(args, env).await,
            Command::Deploy(args) => deploy_contract(args, env).await,
            Command::DeployProxy(args) => deploy_proxy(args, env).await,
        }
    }
}

/// The environment a command runs in
pub struct ScriptEnv<'a> {
    /// The provider, signing with the deployer's key
    pub client: Wallet,
    /// The deploying account
    pub account: Address,
    /// Directory containing the compiled contract artifacts
    pub artifacts: &'a Path,
    /// Path to the deployments file
    pub deployments: &'a Path,
}

impl ScriptEnv<'_> {
    /// A deployer sending creation transactions through the client
    pub fn rpc_deployer(&self) -> RpcDeployer {
        RpcDeployer::new(self.client.clone(), self.account, NUM_DEPLOY_CONFIRMATIONS)
    }

    /// A deployer predicting addresses from the account's current nonce
    pub async fn predicting_deployer(&self) -> Result<PredictingDeployer, ScriptError> {
        PredictingDeployer::from_chain(&self.client, self.account).await
    }
}

/// Deploy the full Kaya suite.
///
/// This deploys the `KayaDistributor`, `KayaCenter` & `SoKaya` implementations
/// and the `Kaya` token, followed by a `KayaProxy` in front of each
/// implementation. Each proxy calls its implementation's `initialize` upon
/// construction.
#[derive(Args)]
pub struct DeployAllArgs {
    /// Address of the admin of every proxy, defaults to the deployer
    #[arg(long)]
    pub admin: Option<String>,

    /// Address of the governance account given to the center, defaults to
    /// the deployer
    #[arg(long)]
    pub governance: Option<String>,

    /// Only predict the deployment addresses, sending no transactions and
    /// writing nothing
    #[arg(long)]
    pub dry_run: bool,
}

/// Deploy a single contract which takes no constructor arguments
#[derive(Args)]
pub struct DeployArgs {
    /// The contract to deploy
    #[arg(short, long)]
    pub contract: KayaContract,
}

/// Deploy a single `KayaProxy` in front of an existing implementation
#[derive(Args)]
pub struct DeployProxyArgs {
    /// Implementation contract address in hex, or the key under which it is
    /// recorded in the deployments file
    #[arg(short, long)]
    pub implementation: String,

    /// Address of the proxy admin, defaults to the deployer
    #[arg(long)]
    pub admin: Option<String>,

    /// Optional calldata, in hex form, with which to
    /// call the implementation contract upon construction
    #[arg(short, long)]
    pub calldata: Option<String>,

    /// The key under which to record the proxy in the deployments file
    #[arg(short, long)]
    pub key: Option<String>,
}
