use actix_web::{web, HttpResponse, Responder};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;

use collector_market::helpers::chain::chain_slug;
use collector_market::services::gateway::mapping::{
    collection_detail, collection_slug, collection_summary, priced_item,
};
use collector_market::MarketplaceData;

const COLLECTIONS_LIMIT: u32 = 20;
const COLLECTION_NFTS_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsQuery {
    pub query: Option<String>,
    pub chain_id: Option<u64>,
}

/// Trending collections, or search results when `query` is present. Each
/// entry is re-checked against the dedicated stats endpoint; a failed
/// stats lookup keeps the inline numbers.
pub async fn get_collections<D: MarketplaceData>(
    query: web::Query<CollectionsQuery>,
    gateway: web::Data<D>,
) -> impl Responder {
    let gateway = gateway.get_ref();
    let search = query.query.as_deref().map(str::trim).unwrap_or("");

    let fetched = if search.is_empty() {
        gateway
            .fetch_trending_collections(COLLECTIONS_LIMIT, query.chain_id)
            .await
    } else {
        gateway
            .fetch_collections_by_search(search, COLLECTIONS_LIMIT, query.chain_id)
            .await
    };
    let raw_collections = match fetched {
        Ok(raw_collections) => raw_collections,
        Err(error) => {
            tracing::error!(%error, "collections fetch failed");
            return HttpResponse::InternalServerError()
                .json(json!({ "collections": [], "error": error.to_string() }));
        }
    };

    let stats = join_all(raw_collections.iter().map(|raw| async move {
        let slug = collection_slug(raw)?;
        gateway.fetch_collection_stats(&slug).await.unwrap_or(None)
    }))
    .await;

    let collections: Vec<_> = raw_collections
        .iter()
        .zip(stats.iter())
        .filter_map(|(raw, stats)| collection_summary(raw, stats.as_ref()))
        .collect();

    HttpResponse::Ok().json(json!({ "collections": collections }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetailQuery {
    pub chain_id: Option<u64>,
}

/// One collection with its stats and a priced sample of its NFTs. The
/// three upstream fetches are independently fallible; only a page with
/// neither profile nor NFTs is a 404.
pub async fn get_collection<D: MarketplaceData>(
    path: web::Path<String>,
    query: web::Query<CollectionDetailQuery>,
    gateway: web::Data<D>,
) -> impl Responder {
    let slug = path.into_inner();
    if slug.is_empty() || slug == "undefined" {
        return HttpResponse::BadRequest().json(json!({
            "collection": null,
            "nfts": [],
            "error": "Collection slug is required."
        }));
    }

    let gateway = gateway.get_ref();
    let chain_override = query.chain_id.map(chain_slug);

    let (profile_result, nfts_result, stats_result) = tokio::join!(
        gateway.fetch_collection(&slug),
        gateway.fetch_collection_nfts(&slug, COLLECTION_NFTS_LIMIT),
        gateway.fetch_collection_stats(&slug),
    );

    let (profile, profile_error) = match profile_result {
        Ok(profile) => (profile, None),
        Err(error) => (None, Some(error.to_string())),
    };
    let nfts = nfts_result.unwrap_or_default();
    let stats = stats_result.unwrap_or(None);

    let collection_chain: Option<String> = chain_override
        .map(str::to_string)
        .or_else(|| {
            profile
                .as_ref()
                .and_then(|profile| profile.contracts.first())
                .map(|contract| contract.chain.clone())
        });

    let prices = join_all(nfts.iter().map(|nft| {
        let chain = collection_chain.clone();
        async move {
            gateway
                .fetch_nft_price(&nft.contract, &nft.identifier, chain.as_deref())
                .await
                .unwrap_or(None)
        }
    }))
    .await;

    let priced_nfts: Vec<_> = nfts
        .iter()
        .zip(prices.iter())
        .map(|(nft, price)| priced_item(nft, price.as_ref()))
        .collect();

    if profile.is_none() && priced_nfts.is_empty() {
        let message = profile_error.unwrap_or_else(|| "Collection not found.".to_string());
        return HttpResponse::NotFound().json(json!({
            "collection": null,
            "nfts": [],
            "error": message
        }));
    }

    let fallback_image = priced_nfts
        .iter()
        .map(|item| item.image_url.as_str())
        .find(|image| !image.is_empty())
        .unwrap_or("");
    let fallback_name = priced_nfts
        .first()
        .and_then(|item| item.collection.as_deref())
        .unwrap_or(&slug);

    let collection = collection_detail(
        &slug,
        profile.as_ref(),
        stats.as_ref(),
        fallback_image,
        fallback_name,
    );

    HttpResponse::Ok().json(json!({ "collection": collection, "nfts": priced_nfts }))
}
