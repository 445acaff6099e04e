//! Abstraction over the sending of contract creation transactions

use alloy::{
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::Address,
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use tracing::info;

use crate::{artifacts::ContractArtifact, errors::ScriptError};

/// The provider type used to talk to the chain, with the deployer's wallet attached
pub type Wallet = DynProvider<Ethereum>;

/// Something that can deploy contracts on behalf of a single account
#[allow(async_fn_in_trait)]
pub trait Deployer {
    /// The address of the deploying account
    fn address(&self) -> Address;

    /// Deploy `artifact` with the given ABI-encoded constructor arguments,
    /// returning the address of the created contract
    async fn deploy(
        &mut self,
        artifact: &ContractArtifact,
        constructor_args: &[u8],
    ) -> Result<Address, ScriptError>;
}

/// Deploys contracts by sending creation transactions over RPC
pub struct RpcDeployer {
    /// The provider, signing with the deployer's key
    provider: Wallet,
    /// The deployer's address
    address: Address,
    /// The number of confirmations to wait for on each deployment
    confirmations: u64,
}

impl RpcDeployer {
    /// Create a new RPC deployer
    pub fn new(provider: Wallet, address: Address, confirmations: u64) -> Self {
        Self {
            provider,
            address,
            confirmations,
        }
    }
}

impl Deployer for RpcDeployer {
    fn address(&self) -> Address {
        self.address
    }

    async fn deploy(
        &mut self,
        artifact: &ContractArtifact,
        constructor_args: &[u8],
    ) -> Result<Address, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.address)
            .with_deploy_code(artifact.creation_code(constructor_args));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {e}", artifact.name)))?;
        let tx_hash = *pending.tx_hash();
        info!("`{}` deployment sent in tx {tx_hash:#x}", artifact.name);

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {e}", artifact.name)))?;

        deployed_address(&artifact.name, &receipt)
    }
}

/// The address of the contract created by the transaction with the given
/// receipt. Errors if the transaction reverted or created no contract.
pub fn deployed_address(name: &str, receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "{name}: creation tx {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    receipt.contract_address().ok_or_else(|| {
        ScriptError::ContractDeployment(format!("{name}: receipt carries no contract address"))
    })
}

/// Predicts deployment addresses from the deployer's nonce, sending nothing.
///
/// Matches an [`RpcDeployer`] so long as no other transaction from the same
/// account lands in between.
#[derive(Clone, Debug)]
pub struct PredictingDeployer {
    /// The deployer's address
    address: Address,
    /// The nonce the next deployment will be sent with
    nonce: u64,
}

impl PredictingDeployer {
    /// Create a predicting deployer starting at the given nonce
    pub fn new(address: Address, nonce: u64) -> Self {
        Self { address, nonce }
    }

    /// Create a predicting deployer starting at the deployer's current nonce
    pub async fn from_chain(provider: &Wallet, address: Address) -> Result<Self, ScriptError> {
        let nonce = provider
            .get_transaction_count(address)
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

        Ok(Self::new(address, nonce))
    }
}

impl Deployer for PredictingDeployer {
    fn address(&self) -> Address {
        self.address
    }

    async fn deploy(
        &mut self,
        artifact: &ContractArtifact,
        _constructor_args: &[u8],
    ) -> Result<Address, ScriptError> {
        let deployed = self.address.create(self.nonce);
        info!("`{}` would be deployed with nonce {}", artifact.name, self.nonce);
        self.nonce += 1;

        Ok(deployed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloy::primitives::address;
    use serde_json::json;

    use super::*;
    use crate::artifacts::tests::artifact_json;

    /// The first default Anvil account
    pub(crate) const DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    /// A deployer which records every deployment and predicts addresses from a nonce
    pub(crate) struct RecordingDeployer {
        /// The underlying address predictor
        inner: PredictingDeployer,
        /// The deployments seen so far: artifact name, constructor args, address
        pub(crate) calls: Vec<(String, Vec<u8>, Address)>,
        /// Fail the deployment with this index, if set
        pub(crate) fail_at: Option<usize>,
    }

    impl RecordingDeployer {
        /// A recording deployer for [`DEPLOYER`] starting at nonce zero
        pub(crate) fn new() -> Self {
            Self {
                inner: PredictingDeployer::new(DEPLOYER, 0),
                calls: vec![],
                fail_at: None,
            }
        }
    }

    impl Deployer for RecordingDeployer {
        fn address(&self) -> Address {
            self.inner.address()
        }

        async fn deploy(
            &mut self,
            artifact: &ContractArtifact,
            constructor_args: &[u8],
        ) -> Result<Address, ScriptError> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(ScriptError::ContractDeployment("reverted".to_string()));
            }

            let address = self.inner.deploy(artifact, constructor_args).await?;
            let call = (artifact.name.clone(), constructor_args.to_vec(), address);
            self.calls.push(call);
            Ok(address)
        }
    }

    /// A creation tx receipt, as returned over RPC
    fn receipt(status: &str, contract_address: Option<Address>) -> TransactionReceipt {
        let receipt = json!({
            "type": "0x0",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "cd".repeat(32)),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "blobGasUsed": null,
            "blobGasPrice": null,
            "from": DEPLOYER,
            "to": null,
            "contractAddress": contract_address,
        });

        serde_json::from_value(receipt).unwrap()
    }

    #[test]
    fn test_deployed_address_from_receipt() {
        let created = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

        let ok = receipt("0x1", Some(created));
        assert_eq!(deployed_address("Kaya", &ok).unwrap(), created);

        let reverted = receipt("0x0", Some(created));
        let err = deployed_address("Kaya", &reverted).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::ContractDeployment(ref msg) if msg.contains("reverted")
        ));

        let no_contract = receipt("0x1", None);
        let err = deployed_address("Kaya", &no_contract).unwrap_err();
        assert!(matches!(err, ScriptError::ContractDeployment(_)));
    }

    #[tokio::test]
    async fn test_predicted_addresses_follow_nonce() {
        let artifact = ContractArtifact::from_json("Kaya", &artifact_json("6080")).unwrap();

        let mut deployer = PredictingDeployer::new(DEPLOYER, 0);
        let first = deployer.deploy(&artifact, &[]).await.unwrap();
        let second = deployer.deploy(&artifact, &[]).await.unwrap();

        assert_eq!(first, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert_eq!(second, address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"));
        assert_eq!(deployer.address(), DEPLOYER);
    }
}
