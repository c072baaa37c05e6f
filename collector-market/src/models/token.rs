use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub amount: String,
    pub currency: String,
}

/// A single NFT as presented to the gallery. Rebuilt from scratch on every
/// fetch, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftItem {
    pub id: String,
    pub name: String,
    pub token_id: String,
    pub contract_address: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opensea_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<TokenPrice>,
    /// Raw listing order as returned by the marketplace API, normalized
    /// only at action time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_order: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
}

impl NftItem {
    /// Identity key, unique per chain.
    pub fn item_key(contract_address: &str, token_id: &str) -> String {
        format!("{contract_address}-{token_id}")
    }

    pub fn is_listed(&self) -> bool {
        self.price.is_some()
    }
}

/// ERC-20 balance snapshot for the offer currency. Callers pass `None`
/// while the balance query is still loading.
#[derive(Debug, Clone)]
pub struct TokenBalance {
    pub value: BigUint,
    pub decimals: u32,
    pub symbol: String,
}
