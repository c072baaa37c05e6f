//! Wire DTOs for the marketplace API. Loosely typed on purpose: upstream
//! omits or nulls most fields depending on the endpoint, so everything
//! optional stays optional and defaults apply on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNft {
    pub identifier: String,
    pub contract: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_image_url: Option<String>,
    #[serde(default)]
    pub metadata_url: Option<String>,
    #[serde(default)]
    pub opensea_url: Option<String>,
}

impl RawNft {
    /// Display image with the same preference order the gallery uses.
    pub fn best_image(&self) -> &str {
        self.display_image_url
            .as_deref()
            .or(self.image_url.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountNftsResponse {
    #[serde(default)]
    pub nfts: Vec<RawNft>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NftDetailResponse {
    #[serde(default)]
    pub nft: Option<RawNft>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Value>,
}

/// Best listing price for a single NFT, both display-formatted and raw.
#[derive(Debug, Clone, PartialEq)]
pub struct NftPrice {
    pub amount: String,
    pub currency: String,
    pub raw_price: String,
    pub decimals: u32,
    pub order: Option<Value>,
}

/// Collection entry as returned by the list endpoint. `slug` and
/// `collection` are interchangeable upstream depending on the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub stats: Option<RawCollectionInlineStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCollectionInlineStats {
    #[serde(default)]
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
}

/// Detailed single-collection payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionProfile {
    pub collection: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub contracts: Vec<CollectionContract>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionContract {
    pub address: String,
    pub chain: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionStatsResponse {
    #[serde(default)]
    pub total: Option<CollectionStatsTotal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionStatsTotal {
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub num_owners: Option<f64>,
}
