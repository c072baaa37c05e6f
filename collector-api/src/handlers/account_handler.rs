use actix_web::{web, HttpResponse, Responder};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;

use collector_market::helpers::chain::chain_slug;
use collector_market::services::gateway::mapping::priced_item;
use collector_market::MarketplaceData;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub address: Option<String>,
    pub chain_id: Option<u64>,
}

/// NFTs held by an address, each enriched with its best listing price.
/// A failed price lookup renders the item unlisted rather than failing
/// the whole page.
pub async fn get_account_nfts<D: MarketplaceData>(
    query: web::Query<AccountQuery>,
    gateway: web::Data<D>,
) -> impl Responder {
    let Some(address) = query.address.as_deref().filter(|address| !address.is_empty())
    else {
        return HttpResponse::BadRequest()
            .json(json!({ "nfts": [], "error": "Missing address" }));
    };

    let gateway = gateway.get_ref();
    let chain_override = query.chain_id.map(chain_slug);

    let page = match gateway.fetch_account_nfts(address, query.chain_id).await {
        Ok(page) => page,
        Err(error) => {
            tracing::error!(%address, %error, "account nfts fetch failed");
            return HttpResponse::InternalServerError()
                .json(json!({ "nfts": [], "error": error.to_string() }));
        }
    };

    let prices = join_all(page.nfts.iter().map(|nft| async move {
        gateway
            .fetch_nft_price(&nft.contract, &nft.identifier, chain_override)
            .await
            .unwrap_or(None)
    }))
    .await;

    let nfts: Vec<_> = page
        .nfts
        .iter()
        .zip(prices.iter())
        .map(|(nft, price)| priced_item(nft, price.as_ref()))
        .collect();

    HttpResponse::Ok().json(json!({ "nfts": nfts, "next": page.next }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http, test, web, App};
    use serde_json::Value;

    use super::get_account_nfts;
    use crate::testing::StubGateway;

    #[actix_rt::test]
    async fn account_nfts_carry_prices_when_listed() {
        let app = test::init_service(App::new().app_data(web::Data::new(StubGateway)).route(
            "/api/marketplace/account",
            web::get().to(get_account_nfts::<StubGateway>),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/marketplace/account?address=0xholder&chainId=8453")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let nfts = body["nfts"].as_array().unwrap();
        assert_eq!(nfts.len(), 1);
        assert_eq!(nfts[0]["id"], "0xc0ffee-42");
        assert_eq!(nfts[0]["price"]["amount"], "1.5");
        assert!(nfts[0]["listingOrder"].is_object());
    }

    #[actix_rt::test]
    async fn missing_address_is_a_bad_request() {
        let app = test::init_service(App::new().app_data(web::Data::new(StubGateway)).route(
            "/api/marketplace/account",
            web::get().to(get_account_nfts::<StubGateway>),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/marketplace/account")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing address");
    }

    #[actix_rt::test]
    async fn upstream_failure_returns_a_500_with_the_message() {
        let app = test::init_service(App::new().app_data(web::Data::new(StubGateway)).route(
            "/api/marketplace/account",
            web::get().to(get_account_nfts::<StubGateway>),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/marketplace/account?address=0xboom")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["nfts"].as_array().unwrap().len(), 0);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("connection reset"));
    }
}
