//! Engine errors

use thiserror::Error;

use crate::types::{Address, AssetId};

/// Errors returned by matchmaking and ledger queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("caller {caller} does not own asset {asset}")]
    NotOwner { caller: Address, asset: AssetId },

    #[error("asset {0} is not known to the ownership registry")]
    UnknownAsset(AssetId),

    #[error("cannot start another battle while in a pending battle (#{battle_index})")]
    AlreadyPending { battle_index: u64 },

    #[error("battle index {index} out of range (ledger holds {len})")]
    IndexOutOfRange { index: u64, len: u64 },
}

impl BattleError {
    /// Validation errors are detected before any mutation and need the
    /// caller to change something before retrying.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BattleError::NotOwner { .. }
                | BattleError::UnknownAsset(_)
                | BattleError::AlreadyPending { .. }
        )
    }
}

pub type BattleResult<T> = Result<T, BattleError>;
