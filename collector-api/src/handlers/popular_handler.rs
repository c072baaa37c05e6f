use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use collector_market::services::gateway::mapping::priced_item;
use collector_market::MarketplaceData;

const DEFAULT_POPULAR_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<u32>,
}

/// One representative NFT from each trending collection. Unpriced: the
/// front page renders these before any wallet is connected.
pub async fn get_popular_nfts<D: MarketplaceData>(
    query: web::Query<PopularQuery>,
    gateway: web::Data<D>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    match gateway.get_ref().fetch_popular_nfts(limit).await {
        Ok(nfts) => {
            let items: Vec<_> = nfts.iter().map(|nft| priced_item(nft, None)).collect();
            HttpResponse::Ok().json(json!({ "nfts": items }))
        }
        Err(error) => {
            tracing::error!(%error, "popular nfts fetch failed");
            HttpResponse::InternalServerError()
                .json(json!({ "nfts": [], "error": error.to_string() }))
        }
    }
}
