//! Account state definitions

use anchor_lang::prelude::*;
use battle_engine::{plan_join, winning_side, Address, AssetId, Battle, JoinPlan, Player, Side};
use crate::error::ArenaError;

/// Global arena configuration and the single open battle slot
#[account]
#[derive(Default)]
pub struct Arena {
    /// Admin who can pause and unpause matchmaking
    pub admin: Pubkey,
    /// Number of battles ever opened (next battle index)
    pub battle_count: u64,
    /// Index of the battle waiting for an opponent, if any
    pub open_battle: Option<u64>,
    /// Joins are rejected while set
    pub paused: bool,
    /// PDA bump seed
    pub bump: u8,
}

impl Arena {
    pub const SEED: &'static [u8] = b"arena";

    pub const LEN: usize = 8 + // discriminator
        32 +  // admin
        8 +   // battle_count
        9 +   // open_battle (Option<u64>)
        1 +   // paused
        1 +   // bump
        16;   // padding

    /// Index of the battle account the next join touches: the open battle,
    /// or the one about to be created.
    pub fn slot_index(&self) -> u64 {
        self.open_battle.unwrap_or(self.battle_count)
    }
}

/// One side of a battle as stored on-chain
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BattlePlayer {
    pub identity: Pubkey,
    /// Mint of the collectible
    pub asset: Pubkey,
}

impl BattlePlayer {
    pub const LEN: usize = 32 + 32;

    pub fn to_player(&self) -> Player {
        Player::new(to_address(&self.identity), to_asset(&self.asset))
    }
}

/// Battle account, one per ledger position
#[account]
#[derive(Default)]
pub struct BattleRecord {
    /// Position in the battle ledger
    pub index: u64,
    /// 1 while open, 2 once resolved
    pub players: Vec<BattlePlayer>,
    /// Unix timestamp when the battle was opened
    pub created_at: i64,
    /// Winning side (0 or 1), set together with the second player
    pub winner: Option<u8>,
    /// PDA bump seed
    pub bump: u8,
}

impl BattleRecord {
    pub const SEED: &'static [u8] = b"battle";

    pub const LEN: usize = 8 + // discriminator
        8 +   // index
        4 + battle_engine::PLAYERS_PER_BATTLE * BattlePlayer::LEN + // players
        8 +   // created_at
        2 +   // winner (Option<u8>)
        1 +   // bump
        16;   // padding

    pub fn to_battle(&self) -> Battle {
        Battle {
            players: self.players.iter().map(BattlePlayer::to_player).collect(),
            created_at: self.created_at,
            winner: self.winner.and_then(|w| Side::from_index(w as usize)),
        }
    }
}

/// Latest battle of one caller
#[account]
#[derive(Default)]
pub struct CallerRecord {
    pub caller: Pubkey,
    /// Index of the caller's most recent battle
    pub latest_battle: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl CallerRecord {
    pub const SEED: &'static [u8] = b"caller";

    pub const LEN: usize = 8 + // discriminator
        32 +  // caller
        8 +   // latest_battle
        1 +   // bump
        16;   // padding
}

/// Win count of one collectible
#[account]
#[derive(Default)]
pub struct WinRecord {
    /// Mint of the collectible
    pub asset: Pubkey,
    pub wins: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl WinRecord {
    pub const SEED: &'static [u8] = b"wins";

    pub const LEN: usize = 8 + // discriminator
        32 +  // asset
        8 +   // wins
        1 +   // bump
        16;   // padding

    /// Credit one win; returns the new count
    pub fn record_win(&mut self) -> u64 {
        self.wins = self.wins.saturating_add(1);
        self.wins
    }
}

/// What a successful join wrote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinEffect {
    Opened {
        battle_index: u64,
    },
    Resolved {
        battle_index: u64,
        side: Side,
        winning_asset: Pubkey,
        /// Win count of `winning_asset` after this battle
        wins: u64,
    },
}

/// Apply a join by `entrant`, whose ownership of the asset is already
/// verified, to the arena accounts.
///
/// `battle` is the account at `arena.slot_index()`. `opponent_wins` is the
/// win record of the waiting player's asset; it is required to complete a
/// battle against a different asset. Every check runs before the first write
/// and the coin flip itself cannot fail.
pub fn apply_join(
    arena: &mut Arena,
    battle: &mut BattleRecord,
    caller_record: &mut CallerRecord,
    caller_wins: &mut WinRecord,
    opponent_wins: Option<&mut WinRecord>,
    entrant: BattlePlayer,
    now: i64,
) -> Result<JoinEffect> {
    require!(!arena.paused, ArenaError::ArenaPaused);

    let waiting = match arena.open_battle {
        Some(index) => {
            require!(
                battle.index == index && battle.players.len() == 1 && battle.winner.is_none(),
                ArenaError::InvalidBattleAccount
            );
            Some((index, battle.players[0]))
        }
        None => {
            require!(battle.players.is_empty(), ArenaError::InvalidBattleAccount);
            None
        }
    };

    let caller = to_address(&entrant.identity);
    let open = waiting.map(|(index, player)| (index, player.to_player()));
    let plan = plan_join(open.as_ref().map(|(index, player)| (*index, player)), &caller)
        .map_err(ArenaError::from)?;

    let opponent_wins = match waiting {
        Some((_, waiting)) if waiting.asset != entrant.asset => {
            let record = opponent_wins.ok_or(ArenaError::MissingOpponentRecord)?;
            require_keys_eq!(record.asset, waiting.asset, ArenaError::InvalidWinRecord);
            Some(record)
        }
        _ => None,
    };

    caller_record.caller = entrant.identity;
    caller_wins.asset = entrant.asset;

    match plan {
        JoinPlan::OpenNew => {
            let index = arena.battle_count;
            arena.battle_count = index.checked_add(1).ok_or(ArenaError::Overflow)?;
            arena.open_battle = Some(index);

            battle.index = index;
            battle.players = vec![entrant];
            battle.created_at = now;
            battle.winner = None;
            caller_record.latest_battle = index;

            Ok(JoinEffect::Opened { battle_index: index })
        }
        JoinPlan::Complete { battle_index } => {
            battle.players.push(entrant);
            arena.open_battle = None;
            caller_record.latest_battle = battle_index;

            let side = winning_side(now, &caller);
            battle.winner = Some(side.index() as u8);
            let winning_asset = battle.players[side.index()].asset;

            // Both records were settled above, so either outcome lands
            let record = match opponent_wins {
                Some(record) if winning_asset != entrant.asset => record,
                _ => caller_wins,
            };
            let wins = record.record_win();

            Ok(JoinEffect::Resolved {
                battle_index,
                side,
                winning_asset,
                wins,
            })
        }
    }
}

pub fn to_address(key: &Pubkey) -> Address {
    Address::new(key.to_bytes())
}

pub fn to_asset(key: &Pubkey) -> AssetId {
    AssetId::new(key.to_bytes())
}
