use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical on-chain-submittable order: Seaport parameters plus the
/// maker's signature. `parameters` always carries a string `counter`; the
/// signature may be empty when the order was normalized for cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedOrder {
    pub parameters: Value,
    pub signature: String,
}

impl SignedOrder {
    pub fn counter(&self) -> Option<&str> {
        self.parameters.get("counter").and_then(Value::as_str)
    }
}

/// Maker of a raw order, accepting both shapes the API uses: a plain
/// address string or an object holding an `address` field.
pub fn maker_address(raw: &Value) -> Option<String> {
    match raw.get("maker") {
        Some(Value::String(address)) => Some(address.clone()),
        Some(Value::Object(maker)) => maker
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Raw listing order as returned by the marketplace API. Kept as loose
/// JSON because endpoints nest the same fields differently; typed access
/// goes through these accessors and the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingOrder(pub Value);

impl ListingOrder {
    pub fn order_hash(&self) -> Option<&str> {
        self.0.get("order_hash").and_then(Value::as_str)
    }

    pub fn maker(&self) -> Option<String> {
        maker_address(&self.0)
    }

    pub fn current_price(&self) -> Option<&str> {
        self.0.get("current_price").and_then(Value::as_str)
    }

    pub fn payment_symbol(&self) -> Option<&str> {
        self.0
            .get("payment_token")
            .and_then(|token| token.get("symbol"))
            .and_then(Value::as_str)
    }

    pub fn payment_decimals(&self) -> u32 {
        self.0
            .get("payment_token")
            .and_then(|token| token.get("decimals"))
            .and_then(Value::as_u64)
            .map(|decimals| decimals as u32)
            .unwrap_or(18)
    }

    /// First offered asset `(token, identifier)` from the protocol data.
    pub fn offered_asset(&self) -> Option<(String, String)> {
        let offer = self
            .0
            .get("protocol_data")?
            .get("parameters")?
            .get("offer")?
            .as_array()?
            .first()?;
        let token = offer.get("token")?.as_str()?;
        let identifier = offer.get("identifierOrCriteria")?.as_str()?;
        Some((token.to_string(), identifier.to_string()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maker_accepts_string_and_object_shapes() {
        let plain = json!({ "maker": "0xAbC" });
        let wrapped = json!({ "maker": { "address": "0xAbC" } });
        let missing = json!({ "maker": 7 });

        assert_eq!(maker_address(&plain).as_deref(), Some("0xAbC"));
        assert_eq!(maker_address(&wrapped).as_deref(), Some("0xAbC"));
        assert_eq!(maker_address(&missing), None);
    }

    #[test]
    fn listing_order_accessors_read_nested_fields() {
        let order = ListingOrder(json!({
            "order_hash": "0xhash",
            "current_price": "500000000000000000",
            "payment_token": { "symbol": "WETH", "decimals": 18 },
            "protocol_data": {
                "parameters": {
                    "offer": [
                        { "token": "0xc0ffee", "identifierOrCriteria": "42" }
                    ]
                }
            }
        }));

        assert_eq!(order.order_hash(), Some("0xhash"));
        assert_eq!(order.current_price(), Some("500000000000000000"));
        assert_eq!(order.payment_symbol(), Some("WETH"));
        assert_eq!(order.payment_decimals(), 18);
        assert_eq!(
            order.offered_asset(),
            Some(("0xc0ffee".to_string(), "42".to_string()))
        );
    }

    #[test]
    fn payment_decimals_defaults_to_18() {
        let order = ListingOrder(json!({ "current_price": "10" }));
        assert_eq!(order.payment_decimals(), 18);
    }
}
