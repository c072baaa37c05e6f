//! Cancel flow: withdraw one of the caller's own listings.

use crate::interfaces::notifier::Notifier;
use crate::interfaces::protocol::OrderProtocol;
use crate::interfaces::wallet::WalletClient;
use crate::models::order::{maker_address, ListingOrder};
use crate::services::normalizer::normalize_order;

use super::records::CancelRecord;
use super::status::CancelStatus;
use super::{
    submission_blocked, ActionEngine, ActionError, MSG_ONLY_CREATOR_CANCELS,
    MSG_ORDER_DATA_MISSING,
};

impl<W, P, N> ActionEngine<W, P, N>
where
    W: WalletClient,
    P: OrderProtocol,
    N: Notifier,
{
    /// Cancels the listing attached to the record's item. Creator identity
    /// is checked three ways before the wallet is touched: the ownership
    /// flag, the recorded owner address and the order maker. On-chain
    /// `InvalidCanceller` reverts are mapped back to the same message so a
    /// stale view and a hostile request read identically.
    pub async fn submit_cancel(&self, record: &mut CancelRecord) -> Result<(), ActionError> {
        if submission_blocked(record.status()) {
            return Ok(());
        }
        if record.status() == CancelStatus::Error {
            record.reset();
        }
        record.clear_error();
        record.advance(CancelStatus::Validating)?;

        if self.wallet.account().is_none() {
            return Err(
                self.precondition(record, "Connect your wallet to cancel the listing.")
            );
        }

        let Some(raw_order) = record.item.listing_order.clone() else {
            return Err(self.precondition(record, MSG_ORDER_DATA_MISSING));
        };

        if record.item.is_owner == Some(false) {
            return Err(self.precondition(record, MSG_ONLY_CREATOR_CANCELS));
        }

        // Account discovery may prompt the user, so it runs after the cheap
        // identity checks but before the maker comparison that needs the
        // resolved address.
        let account = match self.require_wallet_account().await {
            Ok(account) => account,
            Err(error) => {
                return Err(self.failure(record, ActionError::Wallet(error.to_string())));
            }
        };

        let owner_mismatch = record
            .item
            .owner_address
            .as_deref()
            .is_some_and(|owner| !owner.eq_ignore_ascii_case(&account));
        if owner_mismatch {
            return Err(self.precondition(record, MSG_ONLY_CREATOR_CANCELS));
        }

        let listing = ListingOrder(raw_order);
        let maker_mismatch = listing
            .maker()
            .is_some_and(|maker| !maker.eq_ignore_ascii_case(&account));
        if maker_mismatch {
            return Err(self.precondition(record, MSG_ONLY_CREATOR_CANCELS));
        }

        let Some(order) = normalize_order(listing.as_value(), false) else {
            return Err(self.precondition(record, MSG_ORDER_DATA_MISSING));
        };
        if maker_address(&order.parameters)
            .is_some_and(|maker| !maker.eq_ignore_ascii_case(&account))
        {
            return Err(self.precondition(record, MSG_ONLY_CREATOR_CANCELS));
        }

        record.advance(CancelStatus::Wallet)?;
        let orders = [order.parameters];
        if let Err(error) = self.protocol.cancel_orders(&orders, &account).await {
            let message = error.to_string();
            let message = if message.contains("InvalidCanceller") {
                MSG_ONLY_CREATOR_CANCELS.to_string()
            } else {
                message
            };
            return Err(self.failure(record, ActionError::Protocol(message)));
        }

        record.advance(CancelStatus::Success)?;
        if let Some(refresh) = &self.refresh {
            refresh();
        }
        self.notify_success("Listing canceled. Refreshing...");
        Ok(())
    }
}
