//! Admin instructions

use anchor_lang::prelude::*;
use crate::state::Arena;
use crate::error::ArenaError;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateArenaParams {
    pub admin: Option<Pubkey>,
    pub paused: Option<bool>,
}

/// Create the arena config (one-time setup)
#[derive(Accounts)]
pub struct InitializeArena<'info> {
    #[account(
        init,
        payer = admin,
        space = Arena::LEN,
        seeds = [Arena::SEED],
        bump
    )]
    pub arena: Account<'info, Arena>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_arena(ctx: Context<InitializeArena>) -> Result<()> {
    let arena = &mut ctx.accounts.arena;

    arena.admin = ctx.accounts.admin.key();
    arena.battle_count = 0;
    arena.open_battle = None;
    arena.paused = false;
    arena.bump = ctx.bumps.arena;

    msg!("Arena initialized by {}", arena.admin);
    Ok(())
}

/// Update arena settings
#[derive(Accounts)]
pub struct UpdateArena<'info> {
    #[account(
        mut,
        seeds = [Arena::SEED],
        bump = arena.bump,
        has_one = admin @ ArenaError::Unauthorized
    )]
    pub arena: Account<'info, Arena>,

    pub admin: Signer<'info>,
}

pub fn update_arena(ctx: Context<UpdateArena>, params: UpdateArenaParams) -> Result<()> {
    let UpdateArenaParams { admin, paused } = params;
    let arena = &mut ctx.accounts.arena;

    if let Some(new_admin) = admin {
        require_keys_neq!(new_admin, Pubkey::default(), ArenaError::Unauthorized);
        arena.admin = new_admin;
    }

    // An open battle stays open while paused; it resolves after unpausing
    if let Some(p) = paused {
        arena.paused = p;
    }

    msg!("Arena updated: admin = {}, paused = {}", arena.admin, arena.paused);
    Ok(())
}
