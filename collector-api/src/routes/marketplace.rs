use actix_web::web;

use collector_market::MarketplaceData;

use crate::handlers::{
    account_handler, collection_handler, listing_handler, popular_handler,
};

pub fn config<D: MarketplaceData + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/marketplace/account",
        web::get().to(account_handler::get_account_nfts::<D>),
    );

    cfg.route(
        "/api/marketplace/listings",
        web::get().to(listing_handler::get_user_listings::<D>),
    );

    cfg.route(
        "/api/marketplace/collections",
        web::get().to(collection_handler::get_collections::<D>),
    );

    cfg.route(
        "/api/marketplace/collections/{slug}",
        web::get().to(collection_handler::get_collection::<D>),
    );

    cfg.route(
        "/api/marketplace/popular",
        web::get().to(popular_handler::get_popular_nfts::<D>),
    );

    cfg.route(
        "/api/marketplace/cancel",
        web::post().to(listing_handler::cancel_listing::<D>),
    );
}
