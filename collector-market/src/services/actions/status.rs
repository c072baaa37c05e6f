//! Closed status machines for the four order actions. Each enum carries an
//! explicit allowed-transition table so an illegal move (say success back
//! to wallet) is rejected at the `advance` call instead of silently
//! corrupting a record.

use serde::Serialize;
use std::fmt::Debug;

pub trait StatusMachine: Copy + Debug + PartialEq + Send {
    const IDLE: Self;
    const ERROR: Self;

    /// True for `success`/`error`: the invocation is finished, a new one
    /// starts from idle again.
    fn is_terminal(self) -> bool;

    /// True while an invocation holds the record; submission is a no-op in
    /// these states.
    fn in_flight(self) -> bool;

    fn can_advance(self, next: Self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SellStatus {
    Idle,
    Validating,
    Wallet,
    Listing,
    Success,
    Error,
}

impl StatusMachine for SellStatus {
    const IDLE: Self = Self::Idle;
    const ERROR: Self = Self::Error;

    fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    fn in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Wallet | Self::Listing)
    }

    fn can_advance(self, next: Self) -> bool {
        match self {
            Self::Idle => matches!(next, Self::Validating | Self::Error),
            Self::Validating => matches!(next, Self::Wallet | Self::Error),
            Self::Wallet => matches!(next, Self::Listing | Self::Error),
            Self::Listing => matches!(next, Self::Success | Self::Error),
            Self::Success | Self::Error => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyStatus {
    Idle,
    Confirm,
    Wallet,
    Success,
    Error,
}

impl StatusMachine for BuyStatus {
    const IDLE: Self = Self::Idle;
    const ERROR: Self = Self::Error;

    fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    fn in_flight(self) -> bool {
        matches!(self, Self::Wallet)
    }

    fn can_advance(self, next: Self) -> bool {
        match self {
            Self::Idle => matches!(next, Self::Confirm | Self::Error),
            Self::Confirm => matches!(next, Self::Wallet | Self::Error),
            Self::Wallet => matches!(next, Self::Success | Self::Error),
            Self::Success | Self::Error => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Idle,
    Checking,
    Wallet,
    Success,
    Error,
}

impl StatusMachine for OfferStatus {
    const IDLE: Self = Self::Idle;
    const ERROR: Self = Self::Error;

    fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    fn in_flight(self) -> bool {
        matches!(self, Self::Wallet)
    }

    fn can_advance(self, next: Self) -> bool {
        match self {
            Self::Idle => matches!(next, Self::Checking | Self::Error),
            Self::Checking => matches!(next, Self::Wallet | Self::Error),
            Self::Wallet => matches!(next, Self::Success | Self::Error),
            Self::Success | Self::Error => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelStatus {
    Idle,
    Validating,
    Wallet,
    Success,
    Error,
}

impl StatusMachine for CancelStatus {
    const IDLE: Self = Self::Idle;
    const ERROR: Self = Self::Error;

    fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    fn in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Wallet)
    }

    fn can_advance(self, next: Self) -> bool {
        match self {
            Self::Idle => matches!(next, Self::Validating | Self::Error),
            Self::Validating => matches!(next, Self::Wallet | Self::Error),
            Self::Wallet => matches!(next, Self::Success | Self::Error),
            Self::Success | Self::Error => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_accept_no_transition() {
        assert!(!SellStatus::Success.can_advance(SellStatus::Wallet));
        assert!(!SellStatus::Error.can_advance(SellStatus::Validating));
        assert!(!BuyStatus::Success.can_advance(BuyStatus::Wallet));
        assert!(!OfferStatus::Error.can_advance(OfferStatus::Checking));
        assert!(!CancelStatus::Success.can_advance(CancelStatus::Wallet));
    }

    #[test]
    fn error_is_reachable_from_every_non_terminal_state() {
        for status in [
            SellStatus::Idle,
            SellStatus::Validating,
            SellStatus::Wallet,
            SellStatus::Listing,
        ] {
            assert!(status.can_advance(SellStatus::Error), "{status:?}");
        }
    }

    #[test]
    fn sell_happy_path_is_allowed_in_order() {
        let path = [
            SellStatus::Idle,
            SellStatus::Validating,
            SellStatus::Wallet,
            SellStatus::Listing,
            SellStatus::Success,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance(pair[1]));
        }
    }
}
