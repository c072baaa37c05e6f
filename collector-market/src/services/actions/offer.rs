//! Offer flow: put up WETH against someone else's NFT.

use crate::helpers::chain::weth_address;
use crate::helpers::units::parse_units;
use crate::interfaces::notifier::Notifier;
use crate::interfaces::protocol::{CreateOrderRequest, OrderProtocol};
use crate::interfaces::wallet::WalletClient;
use crate::models::token::TokenBalance;

use super::records::OfferRecord;
use super::status::OfferStatus;
use super::{submission_blocked, ActionEngine, ActionError};

/// Display precision accepted for offer amounts.
const MAX_OFFER_DECIMALS: usize = 4;
const MIN_OFFER_AMOUNT: f64 = 0.0001;

impl<W, P, N> ActionEngine<W, P, N>
where
    W: WalletClient,
    P: OrderProtocol,
    N: Notifier,
{
    /// Validates the amount against precision, minimum and the caller's
    /// WETH balance, then constructs and signs the offer. `balance` is
    /// `None` while the balance query is still loading; the flow refuses to
    /// proceed on an unknown balance.
    pub async fn submit_offer(
        &self,
        record: &mut OfferRecord,
        balance: Option<&TokenBalance>,
    ) -> Result<(), ActionError> {
        if submission_blocked(record.status()) {
            return Ok(());
        }
        if record.status() == OfferStatus::Error {
            record.reset();
        }
        record.clear_error();
        if record.status() == OfferStatus::Idle {
            record.advance(OfferStatus::Checking)?;
        }

        let Some(account) = self.wallet.account() else {
            return Err(self.precondition(record, "Connect your wallet to make an offer."));
        };

        // Currency contract is re-derived from the live chain id on every
        // submission; the user may have switched networks since the modal
        // opened.
        let Some(chain_id) = self.wallet.chain_id() else {
            return Err(self.precondition(record, "Wallet client not available."));
        };
        let Some(currency) = weth_address(chain_id) else {
            return Err(self.precondition(record, "WETH is not supported on this network."));
        };

        let amount_input = record.amount_input.trim().to_string();
        let amount: f64 = amount_input.parse().unwrap_or(f64::NAN);
        if !amount.is_finite() || amount <= 0.0 {
            return Err(self.precondition(record, "Enter a valid offer amount."));
        }

        let fractional = amount_input
            .split_once('.')
            .map(|(_, fraction)| fraction)
            .unwrap_or("");
        if fractional.len() > MAX_OFFER_DECIMALS {
            return Err(
                self.precondition(record, "Offer amount supports up to 4 decimal places.")
            );
        }

        if amount < MIN_OFFER_AMOUNT {
            return Err(self.precondition(record, "Minimum offer amount is 0.0001 WETH."));
        }

        let Some(balance) = balance else {
            return Err(self.precondition(record, "WETH balance is still loading."));
        };

        let amount_wei = match parse_units(&amount_input, balance.decimals) {
            Ok(amount_wei) => amount_wei,
            Err(_) => {
                return Err(self.precondition(record, "Enter a valid offer amount."));
            }
        };
        if amount_wei > balance.value {
            return Err(
                self.precondition(record, "Insufficient WETH balance for this offer.")
            );
        }

        record.advance(OfferStatus::Wallet)?;
        let request = CreateOrderRequest::erc20_offer(
            currency,
            &amount_wei,
            &record.item.contract_address,
            &record.item.token_id,
            &account,
        );
        if let Err(error) = self.protocol.create_order(request).await {
            return Err(self.failure(record, ActionError::Protocol(error.to_string())));
        }

        record.advance(OfferStatus::Success)?;
        self.notify_success("Offer submitted.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use num_bigint::BigUint;

    use crate::interfaces::protocol::MockOrderProtocol;
    use crate::interfaces::wallet::MockWalletClient;
    use crate::models::order::SignedOrder;
    use crate::models::token::TokenBalance;
    use crate::services::actions::testing::{unlisted_item, RecordingNotifier, BUYER};
    use crate::services::actions::{ActionEngine, OfferRecord, OfferStatus};

    fn connected_wallet() -> MockWalletClient {
        let mut wallet = MockWalletClient::new();
        wallet
            .expect_account()
            .return_const(Some(BUYER.to_string()));
        wallet.expect_chain_id().return_const(Some(8453u64));
        wallet
    }

    fn engine(
        wallet: MockWalletClient,
        protocol: MockOrderProtocol,
    ) -> ActionEngine<MockWalletClient, MockOrderProtocol, RecordingNotifier> {
        ActionEngine::new(
            Arc::new(wallet),
            Arc::new(protocol),
            RecordingNotifier::default(),
        )
    }

    fn weth_balance(raw: &str) -> TokenBalance {
        TokenBalance {
            value: raw.parse::<BigUint>().unwrap(),
            decimals: 18,
            symbol: "WETH".to_string(),
        }
    }

    fn record_with_amount(amount: &str) -> OfferRecord {
        let mut record = OfferRecord::open(unlisted_item());
        record.amount_input = amount.to_string();
        record
    }

    #[tokio::test]
    async fn five_fraction_digits_are_rejected_four_accepted() {
        let balance = weth_balance("10000000000000000000");

        let engine = engine(connected_wallet(), MockOrderProtocol::new());
        let mut record = record_with_amount("1.00001");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap_err();
        assert_eq!(
            record.error(),
            Some("Offer amount supports up to 4 decimal places.")
        );

        let mut protocol = MockOrderProtocol::new();
        protocol.expect_create_order().times(1).returning(|_| {
            Ok(SignedOrder {
                parameters: serde_json::json!({ "counter": "0" }),
                signature: "0xsigned".to_string(),
            })
        });
        let engine = engine_ok(protocol);
        let mut record = record_with_amount("1.0001");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap();
        assert_eq!(record.status(), OfferStatus::Success);
    }

    fn engine_ok(
        protocol: MockOrderProtocol,
    ) -> ActionEngine<MockWalletClient, MockOrderProtocol, RecordingNotifier> {
        engine(connected_wallet(), protocol)
    }

    #[tokio::test]
    async fn amount_below_minimum_is_rejected() {
        let engine = engine_ok(MockOrderProtocol::new());
        let mut record = record_with_amount("0.00005");

        let balance = weth_balance("10000000000000000000");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap_err();
        assert_eq!(record.error(), Some("Minimum offer amount is 0.0001 WETH."));
    }

    #[tokio::test]
    async fn loading_balance_blocks_the_offer() {
        let engine = engine_ok(MockOrderProtocol::new());
        let mut record = record_with_amount("0.5");

        engine.submit_offer(&mut record, None).await.unwrap_err();
        assert_eq!(record.error(), Some("WETH balance is still loading."));
    }

    #[tokio::test]
    async fn amount_exceeding_balance_is_rejected() {
        let engine = engine_ok(MockOrderProtocol::new());
        let mut record = record_with_amount("2");

        let balance = weth_balance("1000000000000000000");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap_err();
        assert_eq!(
            record.error(),
            Some("Insufficient WETH balance for this offer.")
        );
    }

    #[tokio::test]
    async fn unsupported_chain_fails_closed() {
        let mut wallet = MockWalletClient::new();
        wallet
            .expect_account()
            .return_const(Some(BUYER.to_string()));
        wallet.expect_chain_id().return_const(Some(11155111u64));

        let engine = engine(wallet, MockOrderProtocol::new());
        let mut record = record_with_amount("0.5");

        let balance = weth_balance("10000000000000000000");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap_err();
        assert_eq!(
            record.error(),
            Some("WETH is not supported on this network.")
        );
    }

    #[tokio::test]
    async fn offer_terms_use_the_chain_currency_and_exact_units() {
        let mut protocol = MockOrderProtocol::new();
        protocol
            .expect_create_order()
            .withf(|request| {
                let offer = &request.offer[0];
                offer.token.as_deref()
                    == Some("0x4200000000000000000000000000000000000006")
                    && offer.amount.as_deref() == Some("500000000000000000")
                    && request.consideration[0].recipient == BUYER
            })
            .times(1)
            .returning(|_| {
                Ok(SignedOrder {
                    parameters: serde_json::json!({ "counter": "0" }),
                    signature: "0xsigned".to_string(),
                })
            });

        let engine = engine_ok(protocol);
        let mut record = record_with_amount("0.5");

        let balance = weth_balance("10000000000000000000");
        engine.submit_offer(&mut record, Some(&balance)).await.unwrap();
        assert_eq!(record.status(), OfferStatus::Success);
    }
}
