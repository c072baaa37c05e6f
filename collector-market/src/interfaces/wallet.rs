use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Wallet request timed out.")]
    Timeout,
    #[error("Wallet is not ready for signing.")]
    NotReady,
    #[error("{0}")]
    Provider(String),
}

/// Account discovery method to issue against the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountsRequest {
    /// `eth_accounts`: read-only query of already-authorized accounts.
    Query,
    /// `eth_requestAccounts`: explicit permission prompt.
    Authorize,
}

/// Connected wallet/signer. Chain id and account are re-read on every use
/// rather than cached; the active chain can change at any time outside this
/// crate's control.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletClient: Send + Sync {
    fn chain_id(&self) -> Option<u64>;

    /// Account already exposed by the wallet, if any. Absent until the
    /// wallet has authorized one.
    fn account(&self) -> Option<String>;

    async fn request_accounts(
        &self,
        request: AccountsRequest,
    ) -> Result<Vec<String>, WalletError>;

    /// Signs an EIP-712 payload (see `helpers::typed_data`).
    async fn sign_typed_data(&self, payload: &Value) -> Result<String, WalletError>;
}
