//! Battle resolution
//!
//! Resolution is part of the join that fills a battle's second slot, never a
//! separate step. Reaching it with anything other than a fresh two-player
//! battle means the matchmaker let a malformed battle through, so it panics.

use crate::random::winning_side;
use crate::types::{Address, AssetId, Side};
use crate::world::World;

/// What the resolver wrote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub winner: Side,
    pub winning_asset: AssetId,
    /// Win count of `winning_asset` after this battle
    pub wins: u64,
}

/// Pick a winner for battle `battle_index`, record it and credit the
/// winning asset.
///
/// # Panics
/// If the battle is missing, does not have exactly two players, or was
/// already resolved.
pub(crate) fn resolve(
    world: &mut World,
    battle_index: u64,
    resolver: &Address,
    now: i64,
) -> Resolution {
    let battle = match world.ledger.get_mut(battle_index) {
        Ok(battle) => battle,
        Err(err) => panic!("resolver invoked on missing battle: {}", err),
    };
    assert_eq!(
        battle.players.len(),
        2,
        "resolver invoked on battle #{} with {} players",
        battle_index,
        battle.players.len()
    );
    assert!(
        battle.winner.is_none(),
        "battle #{} resolved twice",
        battle_index
    );

    let winner = winning_side(now, resolver);
    battle.winner = Some(winner);
    let winning_asset = battle.players[winner.index()].asset;

    let wins = world.wins.record_win(winning_asset);
    log::info!(
        "battle #{} resolved: {:?} side won with asset {} ({} wins)",
        battle_index,
        winner,
        winning_asset,
        wins
    );

    Resolution {
        winner,
        winning_asset,
        wins,
    }
}
