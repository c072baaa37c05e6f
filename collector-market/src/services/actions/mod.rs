//! Order action engine: four wallet-driven flows (sell, offer, buy,
//! cancel), each a short sequence of validation, wallet interaction and
//! submission steps over a status machine. One engine instance serves a
//! session; records carry the per-invocation state.

pub mod buy;
pub mod cancel;
pub mod offer;
pub mod records;
pub mod sell;
pub mod status;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

use crate::helpers::typed_data::order_hash_typed_data;
use crate::interfaces::notifier::{Notification, Notifier};
use crate::interfaces::protocol::OrderProtocol;
use crate::interfaces::wallet::{AccountsRequest, WalletClient, WalletError};

pub use records::{BuyRecord, CancelRecord, OfferRecord, SellRecord};
pub use status::{BuyStatus, CancelStatus, OfferStatus, SellStatus};

use records::Failable;
use status::StatusMachine;

/// Bound on each wallet account-discovery step in the cancel flow.
pub const WALLET_ACCOUNT_TIMEOUT: Duration = Duration::from_secs(10);

/// Grace period between order registration and reporting a listing live.
pub const LISTING_SETTLE_DELAY: Duration = Duration::from_millis(400);

pub(crate) const MSG_ORDER_DATA_MISSING: &str = "Listing order data is missing.";
pub(crate) const MSG_ONLY_CREATOR_CANCELS: &str = "Only the creator can cancel this listing.";

#[derive(Debug, Error)]
pub enum ActionError {
    /// Detected before any wallet call; never retried.
    #[error("{0}")]
    Precondition(String),
    /// Wallet interaction failed or was rejected.
    #[error("{0}")]
    Wallet(String),
    /// Protocol submission failed.
    #[error("{0}")]
    Protocol(String),
    #[error("illegal status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Orchestrates the four on-chain actions against a signer. Errors are
/// local to a single invocation: they land on the record and as a
/// notification, never aborting sibling actions.
pub struct ActionEngine<W, P, N> {
    wallet: Arc<W>,
    protocol: Arc<P>,
    notifier: N,
    refresh: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<W, P, N> ActionEngine<W, P, N>
where
    W: WalletClient,
    P: OrderProtocol,
    N: Notifier,
{
    pub fn new(wallet: Arc<W>, protocol: Arc<P>, notifier: N) -> Self {
        Self {
            wallet,
            protocol,
            notifier,
            refresh: None,
        }
    }

    /// Hook invoked after a successful cancellation so stale listings
    /// disappear from views.
    pub fn with_refresh_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.refresh = Some(Arc::new(hook));
        self
    }

    /// Actively confirms the wallet exposes an authorized account: the
    /// already-exposed account if any, otherwise a read-only query, then an
    /// explicit permission request, each bounded by
    /// [`WALLET_ACCOUNT_TIMEOUT`].
    pub async fn require_wallet_account(&self) -> Result<String, WalletError> {
        if let Some(account) = self.wallet.account() {
            return Ok(account);
        }

        let accounts = timeout(
            WALLET_ACCOUNT_TIMEOUT,
            self.wallet.request_accounts(AccountsRequest::Query),
        )
        .await
        .map_err(|_| WalletError::Timeout)??;
        if let Some(account) = accounts.into_iter().next() {
            return Ok(account);
        }

        let requested = timeout(
            WALLET_ACCOUNT_TIMEOUT,
            self.wallet.request_accounts(AccountsRequest::Authorize),
        )
        .await
        .map_err(|_| WalletError::Timeout)??;
        requested.into_iter().next().ok_or(WalletError::NotReady)
    }

    /// Signs a Seaport order hash for off-chain (gasless) cancellation.
    pub async fn sign_cancellation(
        &self,
        protocol_address: &str,
        order_hash: &str,
    ) -> Result<String, ActionError> {
        let chain_id = self
            .wallet
            .chain_id()
            .ok_or_else(|| ActionError::Wallet("Wallet client not available.".to_string()))?;
        let payload = order_hash_typed_data(protocol_address, chain_id, order_hash);
        self.wallet
            .sign_typed_data(&payload)
            .await
            .map_err(|error| ActionError::Wallet(error.to_string()))
    }

    fn precondition<R: Failable>(&self, record: &mut R, message: &str) -> ActionError {
        record.fail(message);
        self.notifier.notify(Notification::error(message));
        ActionError::Precondition(message.to_string())
    }

    fn failure<R: Failable>(&self, record: &mut R, error: ActionError) -> ActionError {
        let message = error.to_string();
        record.fail(&message);
        self.notifier.notify(Notification::error(message));
        error
    }

    fn notify_success(&self, message: &str) {
        self.notifier.notify(Notification::success(message));
    }
}

/// True when a record should swallow the submission: an invocation is
/// already holding it or it already succeeded. An errored record is not
/// blocked, resubmitting retries from idle.
pub(crate) fn submission_blocked<S: StatusMachine>(status: S) -> bool {
    status.in_flight() || (status.is_terminal() && status != S::ERROR)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use crate::interfaces::notifier::{Notification, Notifier};
    use crate::models::token::{NftItem, TokenPrice};

    pub const OWNER: &str = "0x1111111111111111111111111111111111111111";
    pub const BUYER: &str = "0x2222222222222222222222222222222222222222";

    #[derive(Default)]
    pub struct RecordingNotifier(pub Mutex<Vec<Notification>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    pub fn unlisted_item() -> NftItem {
        NftItem {
            id: NftItem::item_key("0xc0ffee", "42"),
            name: "Test Piece".to_string(),
            token_id: "42".to_string(),
            contract_address: "0xc0ffee".to_string(),
            image_url: String::new(),
            collection: Some("test-collection".to_string()),
            description: None,
            opensea_url: None,
            price: None,
            listing_order: None,
            is_owner: None,
            owner_address: None,
        }
    }

    pub fn signed_listing_order(maker: &str) -> Value {
        json!({
            "order_hash": "0xhash",
            "maker": maker,
            "current_price": "500000000000000000",
            "protocol_data": {
                "parameters": {
                    "offerer": maker,
                    "counter": "0"
                },
                "signature": "0xsigned"
            }
        })
    }

    pub fn listed_item(maker: &str) -> NftItem {
        let mut item = unlisted_item();
        item.price = Some(TokenPrice {
            amount: "0.5".to_string(),
            currency: "ETH".to_string(),
        });
        item.listing_order = Some(signed_listing_order(maker));
        item.owner_address = Some(maker.to_string());
        item
    }
}
