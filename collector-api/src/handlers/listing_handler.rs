use actix_web::{web, HttpResponse, Responder};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;

use collector_market::helpers::chain::chain_slug;
use collector_market::models::order::ListingOrder;
use collector_market::services::gateway::mapping::listing_item;
use collector_market::MarketplaceData;

const DEFAULT_LISTINGS_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsQuery {
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    pub limit: Option<u32>,
}

/// Active listings created by an address, enriched with the listed NFT's
/// display details.
pub async fn get_user_listings<D: MarketplaceData>(
    query: web::Query<ListingsQuery>,
    gateway: web::Data<D>,
) -> impl Responder {
    let Some(address) = query.address.as_deref().filter(|address| !address.is_empty())
    else {
        return HttpResponse::BadRequest()
            .json(json!({ "listings": [], "error": "Missing address" }));
    };

    let gateway = gateway.get_ref();
    let limit = query.limit.unwrap_or(DEFAULT_LISTINGS_LIMIT);

    let orders = match gateway
        .fetch_user_listings(address, query.chain_id, limit)
        .await
    {
        Ok(orders) => orders,
        Err(error) => {
            tracing::error!(%address, %error, "listings fetch failed");
            return HttpResponse::InternalServerError()
                .json(json!({ "listings": [], "error": error.to_string() }));
        }
    };

    let chain_id = query.chain_id;
    let details = join_all(orders.iter().map(|order| async move {
        let (token, identifier) = ListingOrder(order.clone()).offered_asset()?;
        gateway
            .fetch_nft_details(&token, &identifier, chain_id)
            .await
            .unwrap_or(None)
    }))
    .await;

    let listings: Vec<_> = orders
        .iter()
        .zip(details.iter())
        .map(|(order, nft)| listing_item(order, nft.as_ref()))
        .collect();

    HttpResponse::Ok().json(json!({ "listings": listings }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBody {
    pub chain: Option<String>,
    pub chain_id: Option<u64>,
    pub protocol_address: Option<String>,
    pub order_hash: Option<String>,
    pub offerer_signature: Option<String>,
}

/// Off-chain (gasless) cancellation of a listing, authorized by the
/// maker's signature over the order hash. Upstream failure statuses are
/// forwarded as-is.
pub async fn cancel_listing<D: MarketplaceData>(
    body: web::Json<CancelBody>,
    gateway: web::Data<D>,
) -> impl Responder {
    let chain = body
        .chain
        .clone()
        .or_else(|| body.chain_id.map(|chain_id| chain_slug(chain_id).to_string()));
    let Some(chain) = chain else {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing chain or chainId." }));
    };

    let (Some(protocol_address), Some(order_hash), Some(offerer_signature)) = (
        body.protocol_address.as_deref().filter(|s| !s.is_empty()),
        body.order_hash.as_deref().filter(|s| !s.is_empty()),
        body.offerer_signature.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return HttpResponse::BadRequest().json(json!({
            "error": "Missing protocolAddress, orderHash, or offererSignature."
        }));
    };

    match gateway
        .get_ref()
        .offchain_cancel(&chain, protocol_address, order_hash, offerer_signature)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({ "ok": true })),
        Err(error) => {
            tracing::error!(%order_hash, %error, "offchain cancel failed");
            let status = error.status().unwrap_or(500);
            HttpResponse::build(
                actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            )
            .json(json!({ "error": error.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http, test, web, App};
    use serde_json::{json, Value};

    use super::{cancel_listing, get_user_listings};
    use crate::testing::StubGateway;

    macro_rules! listing_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(StubGateway))
                    .route(
                        "/api/marketplace/listings",
                        web::get().to(get_user_listings::<StubGateway>),
                    )
                    .route(
                        "/api/marketplace/cancel",
                        web::post().to(cancel_listing::<StubGateway>),
                    ),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn listings_are_enriched_with_nft_details() {
        let app = listing_app!();
        let req = test::TestRequest::get()
            .uri("/api/marketplace/listings?address=0xmaker&limit=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let listings = body["listings"].as_array().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["id"], "0xhash");
        assert_eq!(listings[0]["name"], "Cool Cat #42");
        assert_eq!(listings[0]["price"]["amount"], "1");
        assert!(listings[0]["listingOrder"].is_object());
    }

    #[actix_rt::test]
    async fn cancel_requires_a_chain() {
        let app = listing_app!();
        let req = test::TestRequest::post()
            .uri("/api/marketplace/cancel")
            .set_json(json!({
                "protocolAddress": "0xseaport",
                "orderHash": "0xhash",
                "offererSignature": "0xsig"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing chain or chainId.");
    }

    #[actix_rt::test]
    async fn cancel_forwards_the_upstream_status() {
        let app = listing_app!();
        let req = test::TestRequest::post()
            .uri("/api/marketplace/cancel")
            .set_json(json!({
                "chainId": 8453,
                "protocolAddress": "0xseaport",
                "orderHash": "0xunknown",
                "offererSignature": "0xsig"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn cancel_succeeds_for_a_known_order() {
        let app = listing_app!();
        let req = test::TestRequest::post()
            .uri("/api/marketplace/cancel")
            .set_json(json!({
                "chainId": 8453,
                "protocolAddress": "0xseaport",
                "orderHash": "0xhash",
                "offererSignature": "0xsig"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], true);
    }
}
