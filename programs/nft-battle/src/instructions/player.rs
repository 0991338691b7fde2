//! Player instructions

use anchor_lang::prelude::*;
use battle_engine::verify_owner;
use crate::state::{
    apply_join, to_address, to_asset, Arena, BattlePlayer, BattleRecord, CallerRecord, JoinEffect,
    WinRecord,
};
use crate::events::{BattleComplete, BattleOpened};
use crate::oracle::TokenAccountOracle;
use crate::error::ArenaError;

/// Join the open battle, or open a new one, with an owned collectible
#[derive(Accounts)]
pub struct JoinBattle<'info> {
    #[account(
        mut,
        seeds = [Arena::SEED],
        bump = arena.bump
    )]
    pub arena: Account<'info, Arena>,

    /// The open battle, or the account for the battle about to be opened
    #[account(
        init_if_needed,
        payer = caller,
        space = BattleRecord::LEN,
        seeds = [BattleRecord::SEED, arena.slot_index().to_le_bytes().as_ref()],
        bump
    )]
    pub battle: Account<'info, BattleRecord>,

    #[account(
        init_if_needed,
        payer = caller,
        space = CallerRecord::LEN,
        seeds = [CallerRecord::SEED, caller.key().as_ref()],
        bump
    )]
    pub caller_record: Account<'info, CallerRecord>,

    /// Win record of the waiting player's asset; required to complete a
    /// battle. Created when the opponent joined.
    #[account(mut)]
    pub opponent_wins: Option<Account<'info, WinRecord>>,

    #[account(
        init_if_needed,
        payer = caller,
        space = WinRecord::LEN,
        seeds = [WinRecord::SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub caller_wins: Account<'info, WinRecord>,

    /// CHECK: must be an SPL mint with supply 1 and no decimals, checked by TokenAccountOracle::load
    pub asset_mint: UncheckedAccount<'info>,

    /// CHECK: parsed and validated by TokenAccountOracle::load
    pub asset_token: UncheckedAccount<'info>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn join_battle(ctx: Context<JoinBattle>) -> Result<()> {
    let caller_key = ctx.accounts.caller.key();
    let asset_key = ctx.accounts.asset_mint.key();

    // Ownership first: nothing is written unless the caller holds the asset
    let oracle = TokenAccountOracle::load(&ctx.accounts.asset_token, &ctx.accounts.asset_mint)?;
    verify_owner(&oracle, &to_address(&caller_key), &to_asset(&asset_key))
        .map_err(ArenaError::from)?;

    if let Some(opponent_wins) = &ctx.accounts.opponent_wins {
        require_keys_neq!(opponent_wins.key(), ctx.accounts.caller_wins.key(), ArenaError::InvalidWinRecord);
    }

    let clock = Clock::get()?;
    let entrant = BattlePlayer {
        identity: caller_key,
        asset: asset_key,
    };

    let accounts = &mut *ctx.accounts;
    let effect = apply_join(
        &mut accounts.arena,
        &mut accounts.battle,
        &mut accounts.caller_record,
        &mut accounts.caller_wins,
        accounts.opponent_wins.as_deref_mut(),
        entrant,
        clock.unix_timestamp,
    )?;

    accounts.battle.bump = ctx.bumps.battle;
    accounts.caller_record.bump = ctx.bumps.caller_record;
    accounts.caller_wins.bump = ctx.bumps.caller_wins;

    match effect {
        JoinEffect::Opened { battle_index } => {
            emit!(BattleOpened {
                battle_index,
                caller: caller_key,
                asset: asset_key,
                created_at: clock.unix_timestamp,
            });

            msg!("Battle {} opened by {} with asset {}", battle_index, caller_key, asset_key);
        }
        JoinEffect::Resolved {
            battle_index,
            side,
            winning_asset,
            wins,
        } => {
            emit!(BattleComplete {
                battle_index,
                winner: side.index() as u8,
                winning_asset,
                wins,
            });

            msg!(
                "Battle {} resolved: side {} won with asset {} ({} wins)",
                battle_index,
                side.index(),
                winning_asset,
                wins
            );
        }
    }

    Ok(())
}
