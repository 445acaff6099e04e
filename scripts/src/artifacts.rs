//! Loading of contract compilation artifacts.
//!
//! Both the Brownie layout (`<dir>/<Name>.json`, with a flat `bytecode` hex
//! string) and the Foundry layout (`<dir>/<Name>.sol/<Name>.json`, with the
//! hex nested under `bytecode.object`) are understood.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::JsonAbi,
    primitives::{hex, Bytes},
};
use alloy_sol_types::SolCall;
use serde::Deserialize;
use tracing::warn;

use crate::{
    constants::{ARTIFACT_EXTENSION, LINK_PLACEHOLDER_PREFIX},
    errors::ScriptError,
    solidity::{IKayaCenter, IKayaDistributor, ISoKaya},
    types::KayaContract,
};

/// The parts of an artifact file the scripts make use of
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: JsonAbi,
    /// The creation bytecode, in either layout
    bytecode: RawBytecode,
}

/// The creation bytecode as found in an artifact file
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Brownie: a bare hex string
    Hex(String),
    /// Foundry: the hex is nested in an object alongside link references
    Object {
        /// The bytecode hex
        object: String,
    },
}

/// The compiled form of a single contract
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The contract name
    pub name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from the contents of its JSON file
    pub fn from_json(name: &str, contents: &str) -> Result<Self, ScriptError> {
        let RawArtifact { abi, bytecode } = serde_json::from_str(contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{name}: {e}")))?;

        let bytecode_hex = match bytecode {
            RawBytecode::Hex(code) => code,
            RawBytecode::Object { object } => object,
        };

        if bytecode_hex.contains(LINK_PLACEHOLDER_PREFIX) {
            return Err(ScriptError::ArtifactParsing(format!(
                "{name}: bytecode contains unlinked library references"
            )));
        }

        let bytecode = hex::decode(&bytecode_hex)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{name}: {e}")))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{name}: empty bytecode, is the contract abstract?"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            abi,
            bytecode: bytecode.into(),
        })
    }

    /// Load the artifact for the contract `name` from `dir`
    pub fn load(dir: &Path, name: &str) -> Result<Self, ScriptError> {
        let path = artifact_path(dir, name).ok_or_else(|| {
            ScriptError::ReadFile(format!("no artifact for {name} in {}", dir.display()))
        })?;

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
        Self::from_json(name, &contents)
    }

    /// Whether the ABI declares the function invoked by calls of type `C`,
    /// matching both its name and its selector
    pub fn declares<C: SolCall>(&self) -> bool {
        let name = C::SIGNATURE.split('(').next().unwrap_or_default();
        self.abi
            .function(name)
            .is_some_and(|fs| fs.iter().any(|f| f.selector().0 == C::SELECTOR))
    }

    /// The input of a creation transaction for this contract, i.e. the
    /// bytecode followed by the ABI-encoded constructor arguments
    pub fn creation_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(constructor_args);
        code.into()
    }
}

/// Find the artifact file for `name`, trying the Brownie layout first
fn artifact_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
    [
        dir.join(&file_name),
        dir.join(format!("{name}.sol")).join(&file_name),
    ]
    .into_iter()
    .find(|p| p.is_file())
}

/// The artifacts of every contract in the Kaya suite
#[derive(Clone, Debug)]
pub struct KayaArtifacts {
    /// The upgradeable proxy
    pub proxy: ContractArtifact,
    /// The Kaya token
    pub kaya: ContractArtifact,
    /// The center implementation
    pub center: ContractArtifact,
    /// The distributor implementation
    pub distributor: ContractArtifact,
    /// The escrow
    pub escrow: ContractArtifact,
    /// The soKaya implementation
    pub so_kaya: ContractArtifact,
}

impl KayaArtifacts {
    /// Load all of the suite's artifacts from `dir`
    pub fn load(dir: &Path) -> Result<Self, ScriptError> {
        let load = |contract: KayaContract| ContractArtifact::load(dir, contract.artifact_name());

        let artifacts = Self {
            proxy: load(KayaContract::KayaProxy)?,
            kaya: load(KayaContract::Kaya)?,
            center: load(KayaContract::KayaCenter)?,
            distributor: load(KayaContract::KayaDistributor)?,
            escrow: load(KayaContract::KayaEscrow)?,
            so_kaya: load(KayaContract::SoKaya)?,
        };

        warn_unless_declared::<IKayaDistributor::initializeCall>(&artifacts.distributor);
        warn_unless_declared::<IKayaCenter::initializeCall>(&artifacts.center);
        warn_unless_declared::<ISoKaya::initializeCall>(&artifacts.so_kaya);

        Ok(artifacts)
    }
}

/// Warn if `implementation` does not declare the function of `C`, meaning
/// a proxy calling it on construction will revert
fn warn_unless_declared<C: SolCall>(implementation: &ContractArtifact) {
    if !implementation.declares::<C>() {
        warn!(
            "`{}` ABI does not declare `{}`, its proxy will likely revert",
            implementation.name,
            C::SIGNATURE
        );
    }
}
