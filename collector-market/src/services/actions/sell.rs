//! Sell flow: create a fixed-price listing for an owned NFT.

use crate::helpers::units::parse_units;
use crate::interfaces::notifier::Notifier;
use crate::interfaces::protocol::{CreateOrderRequest, OrderProtocol};
use crate::interfaces::wallet::WalletClient;

use super::records::SellRecord;
use super::status::SellStatus;
use super::{submission_blocked, ActionEngine, ActionError, LISTING_SETTLE_DELAY};

const NATIVE_DECIMALS: u32 = 18;

impl<W, P, N> ActionEngine<W, P, N>
where
    W: WalletClient,
    P: OrderProtocol,
    N: Notifier,
{
    /// Validates ownership and price, then asks the wallet to construct and
    /// sign the listing order. Preconditions short-circuit on the first
    /// failure with a field-attributable message.
    pub async fn submit_listing(&self, record: &mut SellRecord) -> Result<(), ActionError> {
        if submission_blocked(record.status()) {
            return Ok(());
        }
        if record.status() == SellStatus::Error {
            record.reset();
        }
        record.clear_error();
        record.advance(SellStatus::Validating)?;

        let Some(account) = self.wallet.account() else {
            return Err(self.precondition(record, "Connect your wallet to create a listing."));
        };

        if record.item.is_owner == Some(false) {
            return Err(self.precondition(record, "Only the owner can create a listing."));
        }

        let owner_mismatch = record
            .item
            .owner_address
            .as_deref()
            .is_some_and(|owner| !owner.eq_ignore_ascii_case(&account));
        if owner_mismatch {
            return Err(self.precondition(record, "Wallet does not match the NFT owner."));
        }

        let price: f64 = record.price_input.trim().parse().unwrap_or(f64::NAN);
        if !price.is_finite() || price <= 0.0 {
            return Err(self.precondition(record, "Enter a valid price greater than 0."));
        }
        let price_wei = match parse_units(&record.price_input, NATIVE_DECIMALS) {
            Ok(price_wei) => price_wei,
            Err(_) => {
                return Err(self.precondition(record, "Enter a valid price greater than 0."));
            }
        };

        record.advance(SellStatus::Wallet)?;
        let request = CreateOrderRequest::listing(
            &record.item.contract_address,
            &record.item.token_id,
            &account,
            &price_wei,
        );
        if let Err(error) = self.protocol.create_order(request).await {
            return Err(self.failure(record, ActionError::Protocol(error.to_string())));
        }

        record.advance(SellStatus::Listing)?;
        tokio::time::sleep(LISTING_SETTLE_DELAY).await;
        record.advance(SellStatus::Success)?;
        self.notify_success("Listing created.");
        Ok(())
    }
}
