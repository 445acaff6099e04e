//! Constants used in the deploy scripts

/// The name of the upgradeable proxy contract artifact
pub const KAYA_PROXY_ARTIFACT: &str = "KayaProxy";

/// The name of the Kaya token contract artifact
pub const KAYA_ARTIFACT: &str = "Kaya";

/// The name of the Kaya center contract artifact
pub const KAYA_CENTER_ARTIFACT: &str = "KayaCenter";

/// The name of the Kaya distributor contract artifact
pub const KAYA_DISTRIBUTOR_ARTIFACT: &str = "KayaDistributor";

/// The name of the Kaya escrow contract artifact
pub const KAYA_ESCROW_ARTIFACT: &str = "KayaEscrow";

/// The name of the soKaya contract artifact
pub const SO_KAYA_ARTIFACT: &str = "SoKaya";

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The prefix of an unresolved library link placeholder in creation bytecode
pub const LINK_PLACEHOLDER_PREFIX: &str = "__";

/// The number of confirmations to wait for on each deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The default RPC url, that of a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default directory containing compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The line printed once the full suite has been deployed
pub const COMPLETION_MESSAGE: &str = "Hello, World!";

/// The Kaya token contract key in the deployments file
pub const KAYA_KEY: &str = "Kaya";

/// The distributor implementation contract key in the deployments file
pub const KAYA_DISTRIBUTOR_IMPL_KEY: &str = "KayaDistributorImpl";

/// The center implementation contract key in the deployments file
pub const KAYA_CENTER_IMPL_KEY: &str = "KayaCenterImpl";

/// The soKaya implementation contract key in the deployments file
pub const SO_KAYA_IMPL_KEY: &str = "SoKayaImpl";

/// The distributor proxy contract key in the deployments file
pub const KAYA_DISTRIBUTOR_KEY: &str = "KayaDistributor";

/// The center proxy contract key in the deployments file
pub const KAYA_CENTER_KEY: &str = "KayaCenter";

/// The soKaya proxy contract key in the deployments file
pub const SO_KAYA_KEY: &str = "SoKaya";

/// The escrow contract key in the deployments file
pub const KAYA_ESCROW_KEY: &str = "KayaEscrow";
