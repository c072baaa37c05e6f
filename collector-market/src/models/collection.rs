use serde::{Deserialize, Serialize};

/// Read-only projection of a remote collection. No write path exists for
/// collection data in this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceCollection {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub top_offer: Option<f64>,
    #[serde(default)]
    pub num_owners: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub floor_price: Option<f64>,
    pub total_volume: Option<f64>,
    pub num_owners: Option<f64>,
    pub top_offer: Option<f64>,
    pub total_supply: Option<f64>,
}
