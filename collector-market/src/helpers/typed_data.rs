use serde_json::{json, Value};

use crate::helpers::chain::seaport_version;

/// EIP-712 payload for signing a Seaport order hash, in the shape accepted
/// by `eth_signTypedData_v4`. The domain is keyed by the protocol's
/// verifying contract so the signature only validates for that deployment.
pub fn order_hash_typed_data(protocol_address: &str, chain_id: u64, order_hash: &str) -> Value {
    json!({
        "domain": {
            "name": "Seaport",
            "version": seaport_version(protocol_address),
            "chainId": chain_id,
            "verifyingContract": protocol_address,
        },
        "types": {
            "OrderHash": [
                { "name": "orderHash", "type": "bytes32" },
            ],
        },
        "primaryType": "OrderHash",
        "message": { "orderHash": order_hash },
    })
}
