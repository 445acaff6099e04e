//! Utilities for the deploy scripts.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    network::EthereumWallet,
    primitives::{hex, Address},
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{deployer::Wallet, errors::ScriptError};

/// Sets up the provider with which to send transactions, signing with the
/// given private key. Returns the provider along with the deployer's address.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(Wallet, Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let address = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok((DynProvider::new(provider), address))
}

/// Parse an address given in hex
pub fn parse_address(addr: &str) -> Result<Address, ScriptError> {
    Address::from_str(addr).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Parse optional calldata given in hex, with or without a `0x` prefix
pub fn parse_calldata(calldata: Option<&str>) -> Result<Vec<u8>, ScriptError> {
    match calldata {
        Some(calldata) => {
            hex::decode(calldata).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

/// Read the deployments file as a JSON object, or an empty object if the
/// file does not exist
fn read_deployments(file_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    if !file_path.exists() {
        return Ok(Map::new());
    }

    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
    match serde_json::from_str(&contents).map_err(|e| ScriptError::ReadFile(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(ScriptError::ReadFile(format!(
            "{} does not hold a JSON object",
            file_path.display()
        ))),
    }
}

/// Write the deployments JSON object to the file.
///
/// The contents go to a sibling temporary file first, which then replaces
/// the deployments file, so the file is never left partially written.
fn write_deployments(
    file_path: &Path,
    deployments: Map<String, Value>,
) -> Result<(), ScriptError> {
    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    let staged = tmp_path(file_path);
    fs::write(&staged, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    fs::rename(&staged, file_path).map_err(|e| ScriptError::WriteFile(e.to_string()))
}

/// The temporary file a new version of `file_path` is staged in
fn tmp_path(file_path: &Path) -> PathBuf {
    let mut tmp = file_path.as_os_str().to_owned();
    tmp.push(".tmp");
    tmp.into()
}

/// Parse the address recorded under `contract_key` in the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    let deployments = read_deployments(file_path)?;

    let addr = deployments
        .get(contract_key)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScriptError::ReadFile(format!("{contract_key} not found in deployments file"))
        })?;

    Address::from_str(addr).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Resolve an address given either in hex or as the key under which it is
/// recorded in the deployments file
pub fn resolve_address(addr_or_key: &str, file_path: &Path) -> Result<Address, ScriptError> {
    match parse_address(addr_or_key) {
        Ok(address) => Ok(address),
        Err(_) => parse_addr_from_deployments_file(file_path, addr_or_key),
    }
}

/// Record `address` under `contract_key` in the deployments file, creating
/// the file if necessary. Other entries are left untouched.
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let value = Value::String(format!("{address:#x}"));
    let mut deployments = read_deployments(file_path)?;
    deployments.insert(contract_key.to_string(), value);
    write_deployments(file_path, deployments)
}

/// Record every field of a serializable deployment record in the
/// deployments file, creating the file if necessary. Other entries are left
/// untouched.
pub fn write_deployment<T: Serialize>(
    file_path: &Path,
    deployment: &T,
) -> Result<(), ScriptError> {
    let value =
        serde_json::to_value(deployment).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    let entries = match value {
        Value::Object(map) => map,
        _ => return Err(ScriptError::WriteFile("deployment is not a record".to_string())),
    };

    let mut deployments = read_deployments(file_path)?;
    for (key, value) in entries {
        // Normalize to lowercase hex, matching `write_deployed_address`
        let value = match value.as_str().map(Address::from_str) {
            Some(Ok(address)) => Value::String(format!("{address:#x}")),
            _ => value,
        };
        deployments.insert(key, value);
    }
    write_deployments(file_path, deployments)
}
