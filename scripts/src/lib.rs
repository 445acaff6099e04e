//! Scripts for deploying and wiring together the Kaya smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod solidity;
pub mod suite;
pub mod types;
pub mod utils;
