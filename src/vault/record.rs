use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Asset};

/// One persisted ledger entry: `owner` may claim `balance` of `asset`.
///
/// Native coin is always reported as its wrapped-native token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// The ledger token.
    pub asset: Asset,
    /// Entitled account.
    pub owner: Address,
    /// Claimable amount.
    pub balance: Amount,
}
