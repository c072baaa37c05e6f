//! Per-invocation action records. One record exists per open action modal;
//! records are never shared across concurrent actions on different items.

use crate::models::token::NftItem;

use super::status::{BuyStatus, CancelStatus, OfferStatus, SellStatus, StatusMachine};
use super::ActionError;

#[derive(Debug)]
pub(crate) struct ActionState<S: StatusMachine> {
    status: S,
    error: Option<String>,
}

impl<S: StatusMachine> ActionState<S> {
    fn new() -> Self {
        Self {
            status: S::IDLE,
            error: None,
        }
    }

    /// Entry state for records that open mid-machine (buy opens at
    /// `confirm`, offer at `checking`).
    fn opened(status: S) -> Self {
        Self {
            status,
            error: None,
        }
    }

    fn reset(&mut self) {
        self.status = S::IDLE;
        self.error = None;
    }

    fn fail(&mut self, message: &str) {
        self.status = S::ERROR;
        self.error = Some(message.to_string());
    }

    fn advance(&mut self, next: S) -> Result<(), ActionError> {
        if !self.status.can_advance(next) {
            return Err(ActionError::InvalidTransition {
                from: format!("{:?}", self.status),
                to: format!("{next:?}"),
            });
        }
        tracing::debug!(from = ?self.status, to = ?next, "action status");
        self.status = next;
        Ok(())
    }
}

/// Shared failure hook so the engine can record an error on any action
/// record type.
pub(crate) trait Failable {
    fn fail(&mut self, message: &str);
}

macro_rules! record_common {
    ($record:ident, $status:ident) => {
        impl $record {
            pub fn status(&self) -> $status {
                self.state.status
            }

            pub fn error(&self) -> Option<&str> {
                self.state.error.as_deref()
            }

            pub fn reset(&mut self) {
                self.state.reset();
            }

            pub(crate) fn clear_error(&mut self) {
                self.state.error = None;
            }

            pub(crate) fn advance(&mut self, next: $status) -> Result<(), ActionError> {
                self.state.advance(next)
            }
        }

        impl Failable for $record {
            fn fail(&mut self, message: &str) {
                self.state.fail(message);
            }
        }
    };
}

#[derive(Debug)]
pub struct SellRecord {
    pub item: NftItem,
    pub price_input: String,
    pub(crate) state: ActionState<SellStatus>,
}

impl SellRecord {
    pub fn open(item: NftItem) -> Self {
        let price_input = item
            .price
            .as_ref()
            .map(|price| price.amount.clone())
            .unwrap_or_default();
        Self {
            item,
            price_input,
            state: ActionState::new(),
        }
    }
}

record_common!(SellRecord, SellStatus);

#[derive(Debug)]
pub struct BuyRecord {
    pub item: NftItem,
    pub tx_hash: Option<String>,
    pub(crate) state: ActionState<BuyStatus>,
}

impl BuyRecord {
    pub fn open(item: NftItem) -> Self {
        Self {
            item,
            tx_hash: None,
            state: ActionState::opened(BuyStatus::Confirm),
        }
    }
}

record_common!(BuyRecord, BuyStatus);

#[derive(Debug)]
pub struct OfferRecord {
    pub item: NftItem,
    pub amount_input: String,
    pub(crate) state: ActionState<OfferStatus>,
}

impl OfferRecord {
    pub fn open(item: NftItem) -> Self {
        Self {
            item,
            amount_input: String::new(),
            state: ActionState::opened(OfferStatus::Checking),
        }
    }
}

record_common!(OfferRecord, OfferStatus);

#[derive(Debug)]
pub struct CancelRecord {
    pub item: NftItem,
    pub(crate) state: ActionState<CancelStatus>,
}

impl CancelRecord {
    pub fn open(item: NftItem) -> Self {
        Self {
            item,
            state: ActionState::new(),
        }
    }
}

record_common!(CancelRecord, CancelStatus);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::actions::testing::unlisted_item;

    #[test]
    fn records_open_at_their_entry_states() {
        let item = unlisted_item();
        assert_eq!(SellRecord::open(item.clone()).status(), SellStatus::Idle);
        assert_eq!(BuyRecord::open(item.clone()).status(), BuyStatus::Confirm);
        assert_eq!(OfferRecord::open(item.clone()).status(), OfferStatus::Checking);
        assert_eq!(CancelRecord::open(item).status(), CancelStatus::Idle);
    }

    #[test]
    fn advance_rejects_illegal_transitions() {
        let mut record = SellRecord::open(unlisted_item());
        record.advance(SellStatus::Validating).unwrap();
        record.advance(SellStatus::Wallet).unwrap();
        record.advance(SellStatus::Listing).unwrap();
        record.advance(SellStatus::Success).unwrap();

        let error = record.advance(SellStatus::Wallet).unwrap_err();
        assert!(matches!(error, ActionError::InvalidTransition { .. }));
    }

    #[test]
    fn reset_returns_a_failed_record_to_idle() {
        let mut record = CancelRecord::open(unlisted_item());
        record.fail("boom");
        assert_eq!(record.status(), CancelStatus::Error);
        assert_eq!(record.error(), Some("boom"));

        record.reset();
        assert_eq!(record.status(), CancelStatus::Idle);
        assert_eq!(record.error(), None);
    }
}
