//! Custom error codes

use anchor_lang::prelude::*;
use battle_engine::BattleError;

#[error_code]
pub enum ArenaError {
    #[msg("Caller does not own this asset")]
    NotOwner = 6000,

    #[msg("Asset is not known to the token program")]
    UnknownAsset = 6001,

    #[msg("Cannot start another battle while in a pending battle")]
    AlreadyPending = 6002,

    #[msg("Matchmaking is paused")]
    ArenaPaused = 6003,

    #[msg("Not authorized to perform this action")]
    Unauthorized = 6004,

    #[msg("Battle account does not match the open slot")]
    InvalidBattleAccount = 6005,

    #[msg("Win record of the opposing asset is required")]
    MissingOpponentRecord = 6006,

    #[msg("Win record does not belong to the winning asset")]
    InvalidWinRecord = 6007,

    #[msg("Arithmetic overflow")]
    Overflow = 6008,
}

impl From<BattleError> for ArenaError {
    fn from(err: BattleError) -> Self {
        match err {
            BattleError::NotOwner { .. } => ArenaError::NotOwner,
            BattleError::UnknownAsset(_) => ArenaError::UnknownAsset,
            BattleError::AlreadyPending { .. } => ArenaError::AlreadyPending,
            BattleError::IndexOutOfRange { .. } => ArenaError::InvalidBattleAccount,
        }
    }
}
