//! Implementations of the various deploy scripts

use std::{
    io::{self, Write},
    path::Path,
};

use alloy::primitives::Address;
use tracing::{info, warn};

use crate::{
    artifacts::{ContractArtifact, KayaArtifacts},
    cli::{DeployAllArgs, DeployArgs, DeployProxyArgs, ScriptEnv},
    constants::COMPLETION_MESSAGE,
    deployer::Deployer,
    errors::ScriptError,
    suite::{self, deploy_suite},
    types::{DeployParams, KayaContract, KayaDeployment},
    utils::{
        parse_address, parse_calldata, resolve_address, write_deployed_address, write_deployment,
    },
};

/// Deploy the full suite, recording the addresses unless this is a dry run
pub async fn deploy_all(args: DeployAllArgs, env: ScriptEnv<'_>) -> Result<(), ScriptError> {
    let artifacts = KayaArtifacts::load(env.artifacts)?;
    let mut out = io::stdout();

    if args.dry_run {
        warn!("Dry run, no transactions will be sent");
        let mut deployer = env.predicting_deployer().await?;
        run_deploy_all(&args, &mut deployer, &artifacts, env.deployments, &mut out).await?;
    } else {
        let mut deployer = env.rpc_deployer();
        run_deploy_all(&args, &mut deployer, &artifacts, env.deployments, &mut out).await?;
    }

    Ok(())
}

/// Deploy the full suite through `deployer`, then write the completion line
/// to `out`. The deployments file is only touched outside of a dry run.
async fn run_deploy_all<D: Deployer, W: Write>(
    args: &DeployAllArgs,
    deployer: &mut D,
    artifacts: &KayaArtifacts,
    deployments: &Path,
    out: &mut W,
) -> Result<KayaDeployment, ScriptError> {
    let params = deploy_params(args, deployer.address())?;
    let deployment = deploy_suite(deployer, artifacts, params).await?;

    if !args.dry_run {
        write_deployment(deployments, &deployment)?;
    }

    log_deployment(&deployment);
    writeln!(out, "{COMPLETION_MESSAGE}").map_err(|e| ScriptError::Output(e.to_string()))?;

    Ok(deployment)
}

/// Deploy a single contract and record its address
pub async fn deploy_contract(args: DeployArgs, env: ScriptEnv<'_>) -> Result<(), ScriptError> {
    // Proxies need constructor arguments, which only `deploy-proxy` takes
    let contract_key = args.contract.deployment_key().ok_or_else(|| {
        ScriptError::CalldataConstruction(format!(
            "`{}` must be deployed with the `deploy-proxy` command",
            args.contract
        ))
    })?;

    if matches!(
        args.contract,
        KayaContract::KayaCenter | KayaContract::KayaDistributor | KayaContract::SoKaya
    ) {
        warn!(
            "Deploying bare `{}` implementation, it must be initialized through a proxy",
            args.contract
        );
    }

    let artifact = ContractArtifact::load(env.artifacts, args.contract.artifact_name())?;
    let address = env.rpc_deployer().deploy(&artifact, &[]).await?;

    info!("`{}` deployed at {address:#x}", artifact.name);
    write_deployed_address(env.deployments, contract_key, address)
}

/// Deploy a single proxy, recording its address if a key is given
pub async fn deploy_proxy(args: DeployProxyArgs, env: ScriptEnv<'_>) -> Result<(), ScriptError> {
    let implementation = resolve_address(&args.implementation, env.deployments)?;
    let admin = parse_optional_address(args.admin.as_deref(), env.account)?;
    let init_calldata = parse_calldata(args.calldata.as_deref())?;

    let proxy_name = KayaContract::KayaProxy.artifact_name();
    let proxy = ContractArtifact::load(env.artifacts, proxy_name)?;
    let mut deployer = env.rpc_deployer();
    let address =
        suite::deploy_proxy(&mut deployer, &proxy, implementation, admin, init_calldata).await?;

    match args.key {
        Some(key) => write_deployed_address(env.deployments, &key, address),
        None => Ok(()),
    }
}

/// Resolve the proxy admin & governance accounts, defaulting to the deployer
fn deploy_params(args: &DeployAllArgs, deployer: Address) -> Result<DeployParams, ScriptError> {
    Ok(DeployParams {
        admin: parse_optional_address(args.admin.as_deref(), deployer)?,
        governance: parse_optional_address(args.governance.as_deref(), deployer)?,
    })
}

/// Parse an address if given, otherwise fall back to `default`
fn parse_optional_address(addr: Option<&str>, default: Address) -> Result<Address, ScriptError> {
    addr.map(parse_address)
        .transpose()
        .map(|addr| addr.unwrap_or(default))
}

/// Log every address of a suite deployment
fn log_deployment(deployment: &KayaDeployment) {
    info!("Kaya deployed at {:#x}", deployment.kaya);
    info!(
        "KayaDistributor proxy at {:#x} (implementation {:#x})",
        deployment.distributor, deployment.distributor_impl
    );
    info!(
        "KayaCenter proxy at {:#x} (implementation {:#x})",
        deployment.center, deployment.center_impl
    );
    info!(
        "SoKaya proxy at {:#x} (implementation {:#x})",
        deployment.so_kaya, deployment.so_kaya_impl
    );
}
