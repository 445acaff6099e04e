//! Deployment of the full Kaya suite.
//!
//! The implementations and the token are created first, then one proxy per
//! implementation. Each proxy is initialized in its constructor with
//! addresses from earlier steps of the same run. soKaya is wired to the
//! center and distributor *proxies*, so those go first.

use alloy::primitives::Address;
use tracing::info;

use crate::{
    artifacts::{ContractArtifact, KayaArtifacts},
    deployer::Deployer,
    errors::ScriptError,
    solidity::{
        center_initialize_calldata, distributor_initialize_calldata, proxy_constructor_args,
        so_kaya_initialize_calldata,
    },
    types::{DeployParams, KayaDeployment},
};

/// Deploy every contract of the suite through `deployer`, returning their addresses
pub async fn deploy_suite<D: Deployer>(
    deployer: &mut D,
    artifacts: &KayaArtifacts,
    params: DeployParams,
) -> Result<KayaDeployment, ScriptError> {
    // Implementations & token
    let distributor_impl = deploy_logged(deployer, &artifacts.distributor, &[]).await?;
    let center_impl = deploy_logged(deployer, &artifacts.center, &[]).await?;
    let so_kaya_impl = deploy_logged(deployer, &artifacts.so_kaya, &[]).await?;
    let kaya = deploy_logged(deployer, &artifacts.kaya, &[]).await?;

    // Proxies
    let distributor = deploy_proxy(
        deployer,
        &artifacts.proxy,
        distributor_impl,
        params.admin,
        distributor_initialize_calldata(kaya),
    )
    .await?;

    let center = deploy_proxy(
        deployer,
        &artifacts.proxy,
        center_impl,
        params.admin,
        center_initialize_calldata(kaya, params.governance),
    )
    .await?;

    let so_kaya = deploy_proxy(
        deployer,
        &artifacts.proxy,
        so_kaya_impl,
        params.admin,
        so_kaya_initialize_calldata(center, distributor),
    )
    .await?;

    Ok(KayaDeployment {
        distributor_impl,
        center_impl,
        so_kaya_impl,
        kaya,
        distributor,
        center,
        so_kaya,
    })
}

/// Deploy a proxy in front of `implementation`, running `init_calldata`
/// against it on construction
pub async fn deploy_proxy<D: Deployer>(
    deployer: &mut D,
    proxy: &ContractArtifact,
    implementation: Address,
    admin: Address,
    init_calldata: Vec<u8>,
) -> Result<Address, ScriptError> {
    let args = proxy_constructor_args(implementation, admin, init_calldata);
    let address = deployer.deploy(proxy, &args).await?;
    info!("`{}` for {implementation:#x} deployed at {address:#x}", proxy.name);

    Ok(address)
}

/// Deploy a contract and log its address
async fn deploy_logged<D: Deployer>(
    deployer: &mut D,
    artifact: &ContractArtifact,
    constructor_args: &[u8],
) -> Result<Address, ScriptError> {
    let address = deployer.deploy(artifact, constructor_args).await?;
    info!("`{}` deployed at {address:#x}", artifact.name);

    Ok(address)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, Bytes};
    use alloy_sol_types::{SolCall, SolValue};

    use super::*;
    use crate::{
        artifacts::tests::suite_artifacts,
        deployer::tests::{RecordingDeployer, DEPLOYER},
        solidity::{IKayaCenter, IKayaDistributor, ISoKaya},
    };

    /// Deploy the suite from dummy artifacts
    async fn run_suite(
        deployer: &mut RecordingDeployer,
        params: DeployParams,
    ) -> Result<KayaDeployment, ScriptError> {
        deploy_suite(deployer, &suite_artifacts(), params).await
    }

    /// Split proxy constructor args into (implementation, admin, init calldata)
    fn decode_proxy_args(args: &[u8]) -> (Address, Address, Vec<u8>) {
        let decoded: (Address, Address, Bytes) = SolValue::abi_decode_params(args, true).unwrap();
        let (logic, admin, data) = decoded;
        (logic, admin, data.to_vec())
    }

    #[tokio::test]
    async fn test_deployment_order() {
        let mut deployer = RecordingDeployer::new();
        let params = DeployParams::from_deployer(DEPLOYER);
        run_suite(&mut deployer, params).await.unwrap();

        let names: Vec<&str> = deployer
            .calls
            .iter()
            .map(|(name, _, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "KayaDistributor",
                "KayaCenter",
                "SoKaya",
                "Kaya",
                "KayaProxy",
                "KayaProxy",
                "KayaProxy"
            ]
        );

        // Implementations and token take no constructor arguments
        for (_, args, _) in &deployer.calls[..4] {
            assert!(args.is_empty());
        }
    }

    #[tokio::test]
    async fn test_proxies_reference_prior_addresses() {
        let mut deployer = RecordingDeployer::new();
        let params = DeployParams::from_deployer(DEPLOYER);
        let deployment = run_suite(&mut deployer, params).await.unwrap();

        // Returned addresses are those handed out, in order
        let addrs: Vec<Address> = deployer.calls.iter().map(|(_, _, addr)| *addr).collect();
        assert_eq!(
            addrs,
            [
                deployment.distributor_impl,
                deployment.center_impl,
                deployment.so_kaya_impl,
                deployment.kaya,
                deployment.distributor,
                deployment.center,
                deployment.so_kaya,
            ]
        );

        // Distributor proxy
        let (logic, admin, data) = decode_proxy_args(&deployer.calls[4].1);
        assert_eq!(logic, deployment.distributor_impl);
        assert_eq!(admin, DEPLOYER);
        let init: IKayaDistributor::initializeCall = SolCall::abi_decode(&data, true).unwrap();
        assert_eq!(init.kaya, deployment.kaya);

        // Center proxy
        let (logic, admin, data) = decode_proxy_args(&deployer.calls[5].1);
        assert_eq!(logic, deployment.center_impl);
        assert_eq!(admin, DEPLOYER);
        let init: IKayaCenter::initializeCall = SolCall::abi_decode(&data, true).unwrap();
        assert_eq!(init.kaya, deployment.kaya);
        assert_eq!(init.governance, DEPLOYER);

        // soKaya proxy, wired to the proxies rather than the implementations
        let (logic, admin, data) = decode_proxy_args(&deployer.calls[6].1);
        assert_eq!(logic, deployment.so_kaya_impl);
        assert_eq!(admin, DEPLOYER);
        let init: ISoKaya::initializeCall = SolCall::abi_decode(&data, true).unwrap();
        assert_eq!(init.center, deployment.center);
        assert_eq!(init.distributor, deployment.distributor);
    }

    #[tokio::test]
    async fn test_admin_and_governance_overrides() {
        let admin = address!("00000000000000000000000000000000000000ad");
        let governance = address!("00000000000000000000000000000000000000c0");

        let mut deployer = RecordingDeployer::new();
        let params = DeployParams { admin, governance };
        let deployment = run_suite(&mut deployer, params).await.unwrap();

        for (_, args, _) in &deployer.calls[4..] {
            assert_eq!(decode_proxy_args(args).1, admin);
        }

        let (_, _, data) = decode_proxy_args(&deployer.calls[5].1);
        let init: IKayaCenter::initializeCall = SolCall::abi_decode(&data, true).unwrap();
        assert_eq!(init.governance, governance);
        assert_eq!(init.kaya, deployment.kaya);
    }

    #[tokio::test]
    async fn test_failure_stops_the_sequence() {
        let mut deployer = RecordingDeployer::new();
        deployer.fail_at = Some(3);

        let params = DeployParams::from_deployer(DEPLOYER);
        let res = run_suite(&mut deployer, params).await;

        assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));
        assert_eq!(deployer.calls.len(), 3);
    }
}
