//! Marketplace data gateway: a thin reqwest client over the OpenSea v2
//! API plus the async trait the HTTP handlers consume.

pub mod client;
pub mod mapping;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::collection::CollectionStats;

pub use client::OpenSeaGateway;
pub use types::{AccountNftsResponse, CollectionProfile, NftPrice, RawCollection, RawNft};

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Cloudflare 522 from the upstream edge, remapped so users see a
    /// retryable condition instead of a bare status code.
    #[error("OpenSea API timed out (522). Try again shortly.")]
    UpstreamTimeout,
    #[error("OpenSea API error {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("OpenSea API request failed: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamTimeout => Some(522),
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Read and cancel operations the proxy surface needs. Handlers are
/// generic over this trait so tests can swap in a stub gateway.
#[async_trait]
pub trait MarketplaceData: Send + Sync {
    async fn fetch_account_nfts(
        &self,
        address: &str,
        chain_id: Option<u64>,
    ) -> Result<AccountNftsResponse, GatewayError>;

    async fn fetch_user_listings(
        &self,
        address: &str,
        chain_id: Option<u64>,
        limit: u32,
    ) -> Result<Vec<Value>, GatewayError>;

    /// Best listing for one NFT, `Ok(None)` when it is not listed. Callers
    /// on read paths treat an `Err` as unlisted too; only the buy path
    /// distinguishes the two.
    async fn fetch_nft_price(
        &self,
        contract_address: &str,
        token_id: &str,
        chain_override: Option<&str>,
    ) -> Result<Option<NftPrice>, GatewayError>;

    async fn fetch_nft_details(
        &self,
        contract_address: &str,
        token_id: &str,
        chain_id: Option<u64>,
    ) -> Result<Option<RawNft>, GatewayError>;

    async fn fetch_collection(
        &self,
        slug: &str,
    ) -> Result<Option<CollectionProfile>, GatewayError>;

    async fn fetch_collection_stats(
        &self,
        slug: &str,
    ) -> Result<Option<CollectionStats>, GatewayError>;

    async fn fetch_collection_nfts(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<RawNft>, GatewayError>;

    async fn fetch_trending_collections(
        &self,
        limit: u32,
        chain_id: Option<u64>,
    ) -> Result<Vec<RawCollection>, GatewayError>;

    async fn fetch_collections_by_search(
        &self,
        query: &str,
        limit: u32,
        chain_id: Option<u64>,
    ) -> Result<Vec<RawCollection>, GatewayError>;

    async fn fetch_popular_nfts(&self, limit: u32) -> Result<Vec<RawNft>, GatewayError>;

    /// Gasless cancellation through the marketplace, authorized by the
    /// maker's EIP-712 signature over the order hash.
    async fn offchain_cancel(
        &self,
        chain: &str,
        protocol_address: &str,
        order_hash: &str,
        offerer_signature: &str,
    ) -> Result<(), GatewayError>;
}
