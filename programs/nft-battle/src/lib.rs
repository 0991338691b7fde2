//! NFT Battle - head-to-head collectible battles
//!
//! A Solana program that pairs owners of SPL collectibles into battles,
//! resolves each battle as soon as its second player joins, and keeps a
//! win count per collectible.

use anchor_lang::prelude::*;

mod state;
mod instructions;
mod error;
mod events;
mod oracle;

use instructions::*;
pub use state::{Arena, BattlePlayer, BattleRecord, CallerRecord, WinRecord};
pub use events::{BattleComplete, BattleOpened};

declare_id!("97DGUBABLs5fGtsf5dQc8vcE6CzrDV7WxHZfRfti1MMq");

#[program]
pub mod nft_battle {
    use super::*;

    /// Create the arena config (one-time setup)
    pub fn initialize_arena(ctx: Context<InitializeArena>) -> Result<()> {
        instructions::admin::initialize_arena(ctx)
    }

    /// Change admin or pause matchmaking (admin only)
    pub fn update_arena(ctx: Context<UpdateArena>, params: UpdateArenaParams) -> Result<()> {
        instructions::admin::update_arena(ctx, params)
    }

    /// Join the open battle with an owned collectible, or open a new one
    pub fn join_battle(ctx: Context<JoinBattle>) -> Result<()> {
        instructions::player::join_battle(ctx)
    }
}
