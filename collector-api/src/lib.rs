//! HTTP proxy surface over the marketplace gateway. Thin JSON-reshaping
//! endpoints; all upstream access goes through the `MarketplaceData`
//! trait so handlers stay generic and testable.

pub mod handlers;
pub mod routes;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use collector_market::models::collection::CollectionStats;
    use collector_market::services::gateway::types::{
        AccountNftsResponse, CollectionProfile, NftPrice, RawCollection, RawNft,
    };
    use collector_market::{GatewayError, MarketplaceData};

    pub const LISTED_CONTRACT: &str = "0xc0ffee";
    pub const LISTED_TOKEN: &str = "42";

    pub fn stub_nft() -> RawNft {
        RawNft {
            identifier: LISTED_TOKEN.to_string(),
            contract: LISTED_CONTRACT.to_string(),
            collection: Some("cool-cats".to_string()),
            name: Some("Cool Cat #42".to_string()),
            description: Some("A very cool cat".to_string()),
            image_url: Some("https://img/42.png".to_string()),
            display_image_url: None,
            metadata_url: None,
            opensea_url: Some("https://opensea.io/assets/42".to_string()),
        }
    }

    pub fn stub_order() -> Value {
        json!({
            "order_hash": "0xhash",
            "maker": "0x1111111111111111111111111111111111111111",
            "current_price": "1500000000000000000",
            "payment_token": { "symbol": "ETH", "decimals": 18 },
            "protocol_data": {
                "parameters": {
                    "offerer": "0x1111111111111111111111111111111111111111",
                    "counter": "0",
                    "offer": [
                        { "token": LISTED_CONTRACT, "identifierOrCriteria": LISTED_TOKEN }
                    ]
                },
                "signature": "0xsigned"
            }
        })
    }

    fn stub_collection() -> RawCollection {
        RawCollection {
            slug: Some("cool-cats".to_string()),
            name: Some("Cool Cats".to_string()),
            description: Some("Cats".to_string()),
            image_url: Some("https://img/cats.png".to_string()),
            ..RawCollection::default()
        }
    }

    /// Canned gateway for handler tests. `0xboom` as an address and
    /// `missing-slug` as a collection simulate upstream failures.
    pub struct StubGateway;

    #[async_trait]
    impl MarketplaceData for StubGateway {
        async fn fetch_account_nfts(
            &self,
            address: &str,
            _chain_id: Option<u64>,
        ) -> Result<AccountNftsResponse, GatewayError> {
            if address == "0xboom" {
                return Err(GatewayError::Transport("connection reset".to_string()));
            }
            Ok(AccountNftsResponse {
                nfts: vec![stub_nft()],
                next: None,
            })
        }

        async fn fetch_user_listings(
            &self,
            _address: &str,
            _chain_id: Option<u64>,
            _limit: u32,
        ) -> Result<Vec<Value>, GatewayError> {
            Ok(vec![stub_order()])
        }

        async fn fetch_nft_price(
            &self,
            contract_address: &str,
            token_id: &str,
            _chain_override: Option<&str>,
        ) -> Result<Option<NftPrice>, GatewayError> {
            if contract_address == LISTED_CONTRACT && token_id == LISTED_TOKEN {
                Ok(Some(NftPrice {
                    amount: "1.5".to_string(),
                    currency: "ETH".to_string(),
                    raw_price: "1500000000000000000".to_string(),
                    decimals: 18,
                    order: Some(stub_order()),
                }))
            } else {
                Ok(None)
            }
        }

        async fn fetch_nft_details(
            &self,
            contract_address: &str,
            _token_id: &str,
            _chain_id: Option<u64>,
        ) -> Result<Option<RawNft>, GatewayError> {
            if contract_address == LISTED_CONTRACT {
                Ok(Some(stub_nft()))
            } else {
                Ok(None)
            }
        }

        async fn fetch_collection(
            &self,
            slug: &str,
        ) -> Result<Option<CollectionProfile>, GatewayError> {
            if slug == "cool-cats" {
                Ok(Some(CollectionProfile {
                    collection: "cool-cats".to_string(),
                    name: Some("Cool Cats".to_string()),
                    description: Some("Cats".to_string()),
                    image_url: Some("https://img/cats.png".to_string()),
                    ..CollectionProfile::default()
                }))
            } else {
                Ok(None)
            }
        }

        async fn fetch_collection_stats(
            &self,
            slug: &str,
        ) -> Result<Option<CollectionStats>, GatewayError> {
            if slug == "cool-cats" {
                Ok(Some(CollectionStats {
                    floor_price: Some(0.25),
                    total_volume: Some(1234.5),
                    num_owners: Some(4200.0),
                    top_offer: None,
                    total_supply: None,
                }))
            } else {
                Ok(None)
            }
        }

        async fn fetch_collection_nfts(
            &self,
            slug: &str,
            _limit: u32,
        ) -> Result<Vec<RawNft>, GatewayError> {
            if slug == "cool-cats" {
                Ok(vec![stub_nft()])
            } else {
                Ok(vec![])
            }
        }

        async fn fetch_trending_collections(
            &self,
            _limit: u32,
            _chain_id: Option<u64>,
        ) -> Result<Vec<RawCollection>, GatewayError> {
            let slugless = RawCollection {
                collection: Some("Display Name Only!".to_string()),
                ..RawCollection::default()
            };
            Ok(vec![stub_collection(), slugless])
        }

        async fn fetch_collections_by_search(
            &self,
            query: &str,
            _limit: u32,
            _chain_id: Option<u64>,
        ) -> Result<Vec<RawCollection>, GatewayError> {
            if query.to_ascii_lowercase().contains("cool") {
                Ok(vec![stub_collection()])
            } else {
                Ok(vec![])
            }
        }

        async fn fetch_popular_nfts(&self, _limit: u32) -> Result<Vec<RawNft>, GatewayError> {
            Ok(vec![stub_nft()])
        }

        async fn offchain_cancel(
            &self,
            _chain: &str,
            _protocol_address: &str,
            order_hash: &str,
            _offerer_signature: &str,
        ) -> Result<(), GatewayError> {
            if order_hash == "0xhash" {
                Ok(())
            } else {
                Err(GatewayError::Upstream {
                    status: 404,
                    body: "order not found".to_string(),
                })
            }
        }
    }
}
