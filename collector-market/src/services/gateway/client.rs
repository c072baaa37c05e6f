use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::helpers::app_config::AppConfig;
use crate::helpers::chain::chain_slug;
use crate::helpers::units::format_units;
use crate::models::collection::CollectionStats;

use super::mapping::price_from_order;
use super::types::{
    AccountNftsResponse, CollectionProfile, CollectionStatsResponse, NftDetailResponse,
    NftPrice, OrdersResponse, RawCollection, RawNft,
};
use super::{GatewayError, MarketplaceData};

const RETRY_DELAY: Duration = Duration::from_millis(450);
const ACCOUNT_PAGE_LIMIT: u32 = 50;
const COLLECTIONS_CAP: u32 = 30;
const POPULAR_SCAN_CAP: u32 = 24;

/// OpenSea v2 client. One retry after a fixed delay for transport
/// failures and the configured retryable statuses; everything else
/// surfaces on the first attempt.
pub struct OpenSeaGateway {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    default_chain: String,
    retryable_statuses: HashSet<u16>,
}

impl OpenSeaGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            default_chain: config.default_chain.clone(),
            retryable_statuses: config.retryable_statuses.iter().copied().collect(),
        })
    }

    fn chain(&self, chain_id: Option<u64>) -> String {
        match chain_id {
            Some(chain_id) => chain_slug(chain_id).to_string(),
            None => self.default_chain.clone(),
        }
    }

    fn status_error(status: u16, body: String) -> GatewayError {
        if status == 522 {
            GatewayError::UpstreamTimeout
        } else {
            GatewayError::Upstream { status, body }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error = GatewayError::Transport("request failed".to_string());

        for attempt in 0..2u8 {
            let request = self
                .client
                .get(&url)
                .query(params)
                .header("Accept", "application/json")
                .header("X-API-KEY", &self.api_key);

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if response.status().is_success() {
                        match response.json::<T>().await {
                            Ok(decoded) => return Ok(decoded),
                            Err(error) => {
                                // A garbled success body reads like a flaky
                                // edge response, so it gets the one retry too.
                                let error = GatewayError::Transport(error.to_string());
                                if attempt == 0 {
                                    tracing::debug!(%url, "retrying after decode failure");
                                    last_error = error;
                                    tokio::time::sleep(RETRY_DELAY).await;
                                    continue;
                                }
                                return Err(error);
                            }
                        }
                    }

                    let body = response.text().await.unwrap_or_default();
                    let error = Self::status_error(status, body);
                    if attempt == 0 && self.retryable_statuses.contains(&status) {
                        tracing::debug!(%url, status, "retrying marketplace request");
                        last_error = error;
                        tokio::time::sleep(RETRY_DELAY).await;
                        continue;
                    }
                    return Err(error);
                }
                Err(source) => {
                    let error = GatewayError::Transport(source.to_string());
                    if attempt == 0 {
                        tracing::debug!(%url, "retrying after transport failure");
                        last_error = error;
                        tokio::time::sleep(RETRY_DELAY).await;
                        continue;
                    }
                    return Err(error);
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl MarketplaceData for OpenSeaGateway {
    async fn fetch_account_nfts(
        &self,
        address: &str,
        chain_id: Option<u64>,
    ) -> Result<AccountNftsResponse, GatewayError> {
        let chain = self.chain(chain_id);
        self.get_json(
            &format!("/chain/{chain}/account/{address}/nfts"),
            &[
                ("include_metadata", "true".to_string()),
                ("limit", ACCOUNT_PAGE_LIMIT.to_string()),
            ],
        )
        .await
    }

    async fn fetch_user_listings(
        &self,
        address: &str,
        chain_id: Option<u64>,
        limit: u32,
    ) -> Result<Vec<Value>, GatewayError> {
        let chain = self.chain(chain_id);
        let response: OrdersResponse = self
            .get_json(
                &format!("/orders/{chain}/seaport/listings"),
                &[
                    ("maker", address.to_string()),
                    ("limit", limit.to_string()),
                    ("order_by", "created_date".to_string()),
                    ("order_direction", "desc".to_string()),
                ],
            )
            .await?;
        Ok(response.orders)
    }

    async fn fetch_nft_price(
        &self,
        contract_address: &str,
        token_id: &str,
        chain_override: Option<&str>,
    ) -> Result<Option<NftPrice>, GatewayError> {
        let chain = chain_override.unwrap_or(&self.default_chain);
        let response: OrdersResponse = self
            .get_json(
                &format!("/orders/{chain}/seaport/listings"),
                &[
                    ("asset_contract_address", contract_address.to_string()),
                    ("token_ids", token_id.to_string()),
                    ("limit", "1".to_string()),
                    ("order_by", "eth_price".to_string()),
                    ("order_direction", "asc".to_string()),
                ],
            )
            .await?;

        Ok(response.orders.first().and_then(price_from_order))
    }

    async fn fetch_nft_details(
        &self,
        contract_address: &str,
        token_id: &str,
        chain_id: Option<u64>,
    ) -> Result<Option<RawNft>, GatewayError> {
        let chain = self.chain(chain_id);
        let response: NftDetailResponse = self
            .get_json(
                &format!("/chain/{chain}/contract/{contract_address}/nfts/{token_id}"),
                &[],
            )
            .await?;
        Ok(response.nft)
    }

    async fn fetch_collection(
        &self,
        slug: &str,
    ) -> Result<Option<CollectionProfile>, GatewayError> {
        let slug = urlencoding::encode(slug);
        match self
            .get_json::<CollectionProfile>(&format!("/collections/{slug}"), &[])
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            Err(GatewayError::Upstream { status: 404, .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn fetch_collection_stats(
        &self,
        slug: &str,
    ) -> Result<Option<CollectionStats>, GatewayError> {
        let slug = urlencoding::encode(slug);
        let response: CollectionStatsResponse = self
            .get_json(&format!("/collections/{slug}/stats"), &[])
            .await?;

        Ok(response.total.map(|total| CollectionStats {
            floor_price: total.floor_price,
            total_volume: total.volume,
            num_owners: total.num_owners,
            top_offer: None,
            total_supply: None,
        }))
    }

    async fn fetch_collection_nfts(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<RawNft>, GatewayError> {
        let slug = urlencoding::encode(slug);
        let response: AccountNftsResponse = self
            .get_json(
                &format!("/collection/{slug}/nfts"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(response.nfts)
    }

    async fn fetch_trending_collections(
        &self,
        limit: u32,
        chain_id: Option<u64>,
    ) -> Result<Vec<RawCollection>, GatewayError> {
        let chain = self.chain(chain_id);
        let response: CollectionsEnvelope = self
            .get_json(
                "/collections",
                &[
                    ("chain", chain),
                    ("limit", limit.min(COLLECTIONS_CAP).to_string()),
                    ("order_by", "seven_day_volume".to_string()),
                ],
            )
            .await?;
        Ok(response.collections)
    }

    async fn fetch_collections_by_search(
        &self,
        query: &str,
        limit: u32,
        chain_id: Option<u64>,
    ) -> Result<Vec<RawCollection>, GatewayError> {
        let chain = self.chain(chain_id);
        let response: CollectionsEnvelope = self
            .get_json(
                "/collections",
                &[
                    ("chain", chain),
                    ("search", query.to_string()),
                    ("limit", limit.min(COLLECTIONS_CAP).to_string()),
                ],
            )
            .await?;
        Ok(response.collections)
    }

    async fn fetch_popular_nfts(&self, limit: u32) -> Result<Vec<RawNft>, GatewayError> {
        let collections = self
            .fetch_trending_collections(limit.min(POPULAR_SCAN_CAP), None)
            .await?;

        let mut results = Vec::new();
        for collection in collections {
            let Some(slug) = collection.slug.or(collection.collection) else {
                continue;
            };
            // One representative piece per collection; a collection whose
            // nft endpoint fails is skipped, not fatal.
            match self.fetch_collection_nfts(&slug, 1).await {
                Ok(nfts) => {
                    if let Some(nft) = nfts.into_iter().next() {
                        results.push(nft);
                    }
                }
                Err(error) => {
                    tracing::debug!(%slug, %error, "skipping collection");
                }
            }
            if results.len() as u32 >= limit {
                break;
            }
        }
        Ok(results)
    }

    async fn offchain_cancel(
        &self,
        chain: &str,
        protocol_address: &str,
        order_hash: &str,
        offerer_signature: &str,
    ) -> Result<(), GatewayError> {
        let url = format!(
            "{}/orders/chain/{chain}/protocol/{protocol_address}/{order_hash}/cancel",
            self.base_url
        );

        // Cancellation is not idempotent upstream, so no retry here.
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "offererSignature": offerer_signature }))
            .send()
            .await
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, body))
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct CollectionsEnvelope {
    #[serde(default)]
    collections: Vec<RawCollection>,
}

/// Whole-unit price string used by the listings view. Falls back to the
/// raw value when the payment token reports zero decimals.
pub fn whole_units(raw_price: &str, decimals: u32) -> String {
    if decimals == 0 {
        return raw_price.to_string();
    }
    match format_units(raw_price, decimals) {
        Ok(formatted) => formatted
            .split_once('.')
            .map(|(whole, _)| whole.to_string())
            .unwrap_or(formatted),
        Err(_) => raw_price.to_string(),
    }
}
