//! Projections from wire DTOs to the crate's view models. Every mapping is
//! total: missing upstream fields degrade to empty strings or `None`,
//! never to an error.

use serde_json::Value;

use crate::models::collection::{CollectionStats, MarketplaceCollection};
use crate::models::order::ListingOrder;
use crate::models::token::{NftItem, TokenPrice};

use super::client::whole_units;
use super::types::{CollectionProfile, NftPrice, RawCollection, RawNft};

const UNTITLED: &str = "Untitled";

/// Best-price projection of a raw listing order. `None` when the order
/// carries no usable price, which callers read as "not listed".
pub fn price_from_order(order: &Value) -> Option<NftPrice> {
    let raw_price = order.get("current_price").and_then(Value::as_str)?;
    if raw_price.is_empty() {
        return None;
    }
    let listing = ListingOrder(order.clone());
    let decimals = listing.payment_decimals();
    let currency = listing.payment_symbol().unwrap_or("ETH").to_string();
    let amount = crate::helpers::units::format_units(raw_price, decimals).ok()?;

    Some(NftPrice {
        amount,
        currency,
        raw_price: raw_price.to_string(),
        decimals,
        order: Some(order.clone()),
    })
}

/// Gallery item for an NFT with an optional best price attached.
pub fn priced_item(nft: &RawNft, price: Option<&NftPrice>) -> NftItem {
    NftItem {
        id: NftItem::item_key(&nft.contract, &nft.identifier),
        name: nft.name.clone().unwrap_or_else(|| UNTITLED.to_string()),
        token_id: nft.identifier.clone(),
        contract_address: nft.contract.clone(),
        image_url: nft.best_image().to_string(),
        collection: nft.collection.clone(),
        description: Some(nft.description.clone().unwrap_or_default()),
        opensea_url: Some(nft.opensea_url.clone().unwrap_or_default()),
        price: price.map(|price| TokenPrice {
            amount: price.amount.clone(),
            currency: price.currency.clone(),
        }),
        listing_order: price.and_then(|price| price.order.clone()),
        is_owner: None,
        owner_address: None,
    }
}

/// Listing-centric item: identity comes from the order, display fields
/// from the separately fetched NFT details when available.
pub fn listing_item(order: &Value, nft: Option<&RawNft>) -> NftItem {
    let listing = ListingOrder(order.clone());
    let (asset_token, asset_identifier) = listing.offered_asset().unwrap_or_default();

    let contract_address = nft
        .map(|nft| nft.contract.clone())
        .filter(|contract| !contract.is_empty())
        .unwrap_or_else(|| asset_token.clone());
    let token_id = nft
        .map(|nft| nft.identifier.clone())
        .filter(|identifier| !identifier.is_empty())
        .unwrap_or_else(|| asset_identifier.clone());

    let id = listing
        .order_hash()
        .map(str::to_string)
        .unwrap_or_else(|| NftItem::item_key(&contract_address, &token_id));

    let raw_price = listing.current_price().unwrap_or("0");
    let amount = whole_units(raw_price, listing.payment_decimals());
    let currency = listing.payment_symbol().unwrap_or("ETH").to_string();

    NftItem {
        id,
        name: nft
            .and_then(|nft| nft.name.clone())
            .unwrap_or_else(|| UNTITLED.to_string()),
        token_id,
        contract_address,
        image_url: nft.map(|nft| nft.best_image().to_string()).unwrap_or_default(),
        collection: Some(
            nft.and_then(|nft| nft.collection.clone()).unwrap_or_default(),
        ),
        description: Some(
            nft.and_then(|nft| nft.description.clone()).unwrap_or_default(),
        ),
        opensea_url: Some(
            nft.and_then(|nft| nft.opensea_url.clone()).unwrap_or_default(),
        ),
        price: Some(TokenPrice { amount, currency }),
        listing_order: Some(order.clone()),
        is_owner: None,
        owner_address: None,
    }
}

/// Slug for a raw collection entry: the explicit slug, or the collection
/// identifier when it already looks like a slug. `None` drops the entry.
pub fn collection_slug(raw: &RawCollection) -> Option<String> {
    if let Some(slug) = raw.slug.as_ref().filter(|slug| !slug.is_empty()) {
        return Some(slug.clone());
    }
    let fallback = raw.collection.as_deref().unwrap_or("");
    let slug_like = !fallback.is_empty()
        && fallback
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    slug_like.then(|| fallback.to_string())
}

/// Summary card for the collections index. Stats from the dedicated stats
/// endpoint override the inline ones when present.
pub fn collection_summary(
    raw: &RawCollection,
    stats: Option<&CollectionStats>,
) -> Option<MarketplaceCollection> {
    let slug = collection_slug(raw)?;
    let inline = raw.stats.as_ref();

    Some(MarketplaceCollection {
        slug,
        name: raw
            .name
            .clone()
            .or_else(|| raw.collection.clone())
            .unwrap_or_else(|| UNTITLED.to_string()),
        description: Some(raw.description.clone().unwrap_or_default()),
        image_url: Some(raw.image_url.clone().unwrap_or_default()),
        banner_image_url: Some(raw.banner_image_url.clone().unwrap_or_default()),
        floor_price: stats
            .and_then(|stats| stats.floor_price)
            .or_else(|| inline.and_then(|inline| inline.floor_price)),
        total_supply: inline.and_then(|inline| inline.total_supply),
        total_volume: stats.and_then(|stats| stats.total_volume),
        top_offer: stats.and_then(|stats| stats.top_offer),
        num_owners: stats.and_then(|stats| stats.num_owners),
    })
}

/// Detail card for a single collection page. `fallback_image` and
/// `fallback_name` come from the collection's own NFTs when the profile
/// is missing fields (or missing entirely).
pub fn collection_detail(
    slug: &str,
    profile: Option<&CollectionProfile>,
    stats: Option<&CollectionStats>,
    fallback_image: &str,
    fallback_name: &str,
) -> MarketplaceCollection {
    let floor_price = stats.and_then(|stats| stats.floor_price);
    let total_volume = stats.and_then(|stats| stats.total_volume);
    let top_offer = stats.and_then(|stats| stats.top_offer);
    let num_owners = stats.and_then(|stats| stats.num_owners);

    match profile {
        Some(profile) => MarketplaceCollection {
            slug: if profile.collection.is_empty() {
                slug.to_string()
            } else {
                profile.collection.clone()
            },
            name: profile
                .name
                .clone()
                .unwrap_or_else(|| UNTITLED.to_string()),
            description: Some(profile.description.clone().unwrap_or_default()),
            image_url: Some(
                profile
                    .image_url
                    .clone()
                    .unwrap_or_else(|| fallback_image.to_string()),
            ),
            banner_image_url: Some(profile.banner_image_url.clone().unwrap_or_default()),
            floor_price,
            total_supply: stats
                .and_then(|stats| stats.total_supply)
                .or(profile.total_supply),
            total_volume,
            top_offer,
            num_owners,
        },
        None => MarketplaceCollection {
            slug: slug.to_string(),
            name: fallback_name.to_string(),
            description: Some(String::new()),
            image_url: Some(fallback_image.to_string()),
            banner_image_url: Some(String::new()),
            floor_price,
            total_supply: stats.and_then(|stats| stats.total_supply),
            total_volume,
            top_offer,
            num_owners,
        },
    }
}
