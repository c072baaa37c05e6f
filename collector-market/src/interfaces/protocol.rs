use async_trait::async_trait;
use num_bigint::BigUint;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::order::SignedOrder;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Wallet user declined or the signer failed; surfaced verbatim.
    #[error("{0}")]
    Rejected(String),
    /// Broadcasting or registering the order failed.
    #[error("{0}")]
    Submission(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Native,
    Erc20,
    Erc721,
    Erc1155,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferTerm {
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsiderationTerm {
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub recipient: String,
}

/// Offer/consideration terms for a new order, mirroring the protocol's
/// create-order input.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub offer: Vec<OfferTerm>,
    pub consideration: Vec<ConsiderationTerm>,
    pub offerer: String,
}

impl CreateOrderRequest {
    /// Fixed-price listing: the maker offers one ERC-721 and receives the
    /// price in the chain's native currency.
    pub fn listing(
        token_address: &str,
        token_id: &str,
        maker: &str,
        price_wei: &BigUint,
    ) -> Self {
        Self {
            offer: vec![OfferTerm {
                item_type: ItemType::Erc721,
                token: Some(token_address.to_string()),
                identifier: Some(token_id.to_string()),
                amount: None,
            }],
            consideration: vec![ConsiderationTerm {
                item_type: ItemType::Native,
                token: None,
                identifier: None,
                amount: Some(price_wei.to_string()),
                recipient: maker.to_string(),
            }],
            offerer: maker.to_string(),
        }
    }

    /// ERC-20 offer on a specific token: the offerer puts up the currency
    /// amount and receives the ERC-721 on acceptance.
    pub fn erc20_offer(
        currency_address: &str,
        amount_wei: &BigUint,
        token_address: &str,
        token_id: &str,
        offerer: &str,
    ) -> Self {
        Self {
            offer: vec![OfferTerm {
                item_type: ItemType::Erc20,
                token: Some(currency_address.to_string()),
                identifier: None,
                amount: Some(amount_wei.to_string()),
            }],
            consideration: vec![ConsiderationTerm {
                item_type: ItemType::Erc721,
                token: Some(token_address.to_string()),
                identifier: Some(token_id.to_string()),
                amount: None,
                recipient: offerer.to_string(),
            }],
            offerer: offerer.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FulfillmentReceipt {
    pub tx_hash: Option<String>,
}

/// On-chain order-matching protocol, driven through the connected signer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderProtocol: Send + Sync {
    /// Constructs and signs a new order; resolves once the wallet approved
    /// every required action.
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<SignedOrder, ProtocolError>;

    /// Fulfills (buys into) an existing signed order.
    async fn fulfill_order(
        &self,
        order: &SignedOrder,
        fulfiller: &str,
    ) -> Result<FulfillmentReceipt, ProtocolError>;

    /// Cancels orders on chain by their parameters. No signature is needed,
    /// the maker authorizes via the cancel transaction itself.
    async fn cancel_orders(
        &self,
        parameters: &[Value],
        canceller: &str,
    ) -> Result<(), ProtocolError>;
}
