//! Buy flow: fulfill an existing listing at its asking price.

use crate::interfaces::notifier::Notifier;
use crate::interfaces::protocol::OrderProtocol;
use crate::interfaces::wallet::WalletClient;
use crate::services::normalizer::normalize_order;

use super::records::BuyRecord;
use super::status::BuyStatus;
use super::{submission_blocked, ActionEngine, ActionError, MSG_ORDER_DATA_MISSING};

impl<W, P, N> ActionEngine<W, P, N>
where
    W: WalletClient,
    P: OrderProtocol,
    N: Notifier,
{
    /// Fulfills the listing attached to the record's item. The raw listing
    /// payload is normalized with a mandatory signature before it is handed
    /// to the protocol; an order without one never reaches the wallet.
    pub async fn submit_buy(&self, record: &mut BuyRecord) -> Result<(), ActionError> {
        if submission_blocked(record.status()) {
            return Ok(());
        }
        if record.status() == BuyStatus::Error {
            record.reset();
        }
        record.tx_hash = None;
        record.clear_error();
        if record.status() == BuyStatus::Idle {
            record.advance(BuyStatus::Confirm)?;
        }

        let Some(account) = self.wallet.account() else {
            return Err(self.precondition(record, "Connect your wallet to buy."));
        };

        if record.item.price.is_none() {
            return Err(self.precondition(record, "This NFT is not listed."));
        }

        let order = record
            .item
            .listing_order
            .as_ref()
            .and_then(|raw| normalize_order(raw, true));
        let Some(order) = order else {
            return Err(self.precondition(record, MSG_ORDER_DATA_MISSING));
        };

        record.advance(BuyStatus::Wallet)?;
        match self.protocol.fulfill_order(&order, &account).await {
            Ok(receipt) => {
                record.tx_hash = receipt.tx_hash;
            }
            Err(error) => {
                return Err(self.failure(record, ActionError::Protocol(error.to_string())));
            }
        }

        record.advance(BuyStatus::Success)?;
        self.notify_success("Purchase submitted.");
        Ok(())
    }
}
