//! Events emitted for off-chain listeners

use anchor_lang::prelude::*;

#[event]
pub struct BattleOpened {
    pub battle_index: u64,
    pub caller: Pubkey,
    pub asset: Pubkey,
    pub created_at: i64,
}

/// Raised once per battle, in the same transaction that resolves it
#[event]
pub struct BattleComplete {
    pub battle_index: u64,
    /// 0 = opener won, 1 = joiner won
    pub winner: u8,
    pub winning_asset: Pubkey,
    pub wins: u64,
}
