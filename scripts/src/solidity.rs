//! Definitions of Solidity functions called during deployment

use alloy::primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall, SolConstructor};

sol! {
    interface IKayaDistributor {
        function initialize(address kaya) external;
    }

    interface IKayaCenter {
        function initialize(address kaya, address governance) external;
    }

    interface ISoKaya {
        function initialize(address center, address distributor) external;
    }

    contract KayaProxy {
        constructor(address logic, address admin, bytes data);
    }
}

/// Prepare calldata for the distributor's `initialize` method
pub fn distributor_initialize_calldata(kaya: Address) -> Vec<u8> {
    IKayaDistributor::initializeCall { kaya }.abi_encode()
}

/// Prepare calldata for the center's `initialize` method
pub fn center_initialize_calldata(kaya: Address, governance: Address) -> Vec<u8> {
    IKayaCenter::initializeCall { kaya, governance }.abi_encode()
}

/// Prepare calldata for soKaya's `initialize` method.
///
/// Both arguments are expected to be proxy addresses.
pub fn so_kaya_initialize_calldata(center: Address, distributor: Address) -> Vec<u8> {
    ISoKaya::initializeCall {
        center,
        distributor,
    }
    .abi_encode()
}

/// ABI-encode the constructor arguments of a `KayaProxy` which delegates to
/// `logic`, is administered by `admin`, and calls into `logic` with
/// `init_calldata` upon construction
pub fn proxy_constructor_args(logic: Address, admin: Address, init_calldata: Vec<u8>) -> Vec<u8> {
    KayaProxy::constructorCall {
        logic,
        admin,
        data: Bytes::from(init_calldata),
    }
    .abi_encode()
}
