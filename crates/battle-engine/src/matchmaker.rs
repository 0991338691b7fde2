//! Matchmaking state machine
//!
//! The queue has capacity one: the newest battle is either waiting for an
//! opponent or already resolved. A join either fills that slot (and resolves
//! the battle on the spot) or opens a fresh one.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::oracle::{verify_owner, OwnershipOracle};
use crate::resolver::{resolve, Resolution};
use crate::types::{Address, AssetId, Battle, BattleComplete, Player, Side};
use crate::world::World;

/// What a join request is going to do, decided before anything is written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinPlan {
    /// No battle is open; start one
    OpenNew,
    /// Take the second slot of the open battle
    Complete { battle_index: u64 },
}

/// Decide what to do with a join from `caller`, given the open battle (its
/// index and its only player), if any.
pub fn plan_join(open: Option<(u64, &Player)>, caller: &Address) -> BattleResult<JoinPlan> {
    match open {
        Some((battle_index, waiting)) if waiting.identity == *caller => {
            Err(BattleError::AlreadyPending { battle_index })
        }
        Some((battle_index, _)) => Ok(JoinPlan::Complete { battle_index }),
        None => Ok(JoinPlan::OpenNew),
    }
}

/// Result of a successful join
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    /// Caller is waiting in a new battle
    Opened { battle_index: u64 },
    /// Caller filled the open battle and it was resolved
    Resolved {
        battle_index: u64,
        winner: Side,
        winning_asset: AssetId,
        /// Win count of `winning_asset` after this battle
        wins: u64,
    },
}

impl JoinOutcome {
    pub fn battle_index(&self) -> u64 {
        match self {
            JoinOutcome::Opened { battle_index } => *battle_index,
            JoinOutcome::Resolved { battle_index, .. } => *battle_index,
        }
    }

    /// The completion notice for a resolved battle
    pub fn completion(&self) -> Option<BattleComplete> {
        match self {
            JoinOutcome::Opened { .. } => None,
            JoinOutcome::Resolved { battle_index, .. } => Some(BattleComplete {
                battle_index: *battle_index,
            }),
        }
    }
}

/// Run one join request against `world`.
///
/// Every check happens before the first write, so an error leaves `world`
/// untouched. Callers that share a world between threads must hold its lock
/// for the whole call.
pub fn join_battle<O: OwnershipOracle + ?Sized>(
    world: &mut World,
    oracle: &O,
    caller: Address,
    asset: AssetId,
    now: i64,
) -> BattleResult<JoinOutcome> {
    if let Err(err) = verify_owner(oracle, &caller, &asset) {
        log::debug!("join rejected for {}: {}", caller, err);
        return Err(err);
    }

    let plan = match plan_join(world.ledger.open_battle(), &caller) {
        Ok(plan) => plan,
        Err(err) => {
            log::debug!("join rejected for {}: {}", caller, err);
            return Err(err);
        }
    };

    let entrant = Player::new(caller, asset);
    match plan {
        JoinPlan::OpenNew => {
            let battle_index = world.ledger.append(Battle::open(entrant, now));
            world.ledger.record_caller(caller, battle_index);
            log::info!("battle #{} opened by {} with asset {}", battle_index, caller, asset);
            Ok(JoinOutcome::Opened { battle_index })
        }
        JoinPlan::Complete { battle_index } => {
            world.ledger.get_mut(battle_index)?.players.push(entrant);
            world.ledger.record_caller(caller, battle_index);

            let Resolution {
                winner,
                winning_asset,
                wins,
            } = resolve(world, battle_index, &caller, now);

            Ok(JoinOutcome::Resolved {
                battle_index,
                winner,
                winning_asset,
                wins,
            })
        }
    }
}
