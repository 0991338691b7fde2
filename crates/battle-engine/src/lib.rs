//! Battle Engine for NFT Battle Arena
//!
//! Matchmaking and resolution core for head-to-head collectible battles.
//! This crate is compiled to:
//! - Native (for the on-chain program and off-chain services)
//! - WASM (for front-end outcome verification)

mod arena;
mod error;
mod ledger;
mod matchmaker;
mod oracle;
mod random;
mod resolver;
mod types;
mod wins;
mod world;

#[cfg(feature = "wasm")]
mod wasm;

pub use arena::{Arena, ManualTime, TimeSource, WallClock};
pub use error::{BattleError, BattleResult};
pub use ledger::BattleLedger;
pub use matchmaker::{join_battle, plan_join, JoinOutcome, JoinPlan};
pub use oracle::{verify_owner, AssetRegistry, OwnershipOracle};
pub use random::{winning_side, SeededRng};
pub use resolver::Resolution;
pub use types::{Address, AssetId, Battle, BattleComplete, CallerStatus, Player, Side};
pub use wins::WinLedger;
pub use world::World;

/// Maximum number of players in one battle
pub const PLAYERS_PER_BATTLE: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OWNERS: u8 = 4;

    /// Owner n (1..=4) holds assets 10n and 10n + 1
    fn registry() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        for n in 1..=OWNERS {
            registry.register(AssetId::new([10 * n; 32]), Address::new([n; 32]));
            registry.register(AssetId::new([10 * n + 1; 32]), Address::new([n; 32]));
        }
        registry
    }

    proptest! {
        #[test]
        fn prop_ledger_invariants(
            joins in prop::collection::vec((1u8..=5, 0u8..=5, 0u8..2, 0i64..4), 1..60)
        ) {
            let oracle = registry();
            let mut world = World::new();
            let mut now = 1_700_000_000i64;

            for (caller, owner_of_asset, which, step) in joins {
                now += step;
                let caller = Address::new([caller; 32]);
                let asset = AssetId::new([10 * owner_of_asset + which; 32]);

                let before_len = world.battle_count();
                let before_total = world.win_ledger().total();
                let open_before = world.ledger().open_battle().map(|(i, p)| (i, *p));

                match join_battle(&mut world, &oracle, caller, asset, now) {
                    Ok(JoinOutcome::Opened { battle_index }) => {
                        prop_assert!(open_before.is_none());
                        prop_assert_eq!(battle_index, before_len);
                        prop_assert_eq!(world.battle_count(), before_len + 1);
                        prop_assert_eq!(world.win_ledger().total(), before_total);
                    }
                    Ok(JoinOutcome::Resolved { battle_index, .. }) => {
                        let (open_index, waiting) = open_before.unwrap();
                        prop_assert_eq!(battle_index, open_index);
                        prop_assert_ne!(waiting.identity, caller);
                        prop_assert_eq!(world.battle_count(), before_len);
                        prop_assert_eq!(world.win_ledger().total(), before_total + 1);
                    }
                    Err(err) => {
                        prop_assert!(err.is_validation());
                        prop_assert_eq!(world.battle_count(), before_len);
                        prop_assert_eq!(world.win_ledger().total(), before_total);
                    }
                }

                // Structural invariants over the whole ledger
                let mut resolved = 0u64;
                let count = world.battle_count();
                for (i, battle) in world.ledger().iter().enumerate() {
                    prop_assert!(!battle.players.is_empty());
                    prop_assert!(battle.players.len() <= PLAYERS_PER_BATTLE);
                    prop_assert_eq!(battle.winner.is_some(), battle.players.len() == 2);
                    if battle.players.len() == 1 {
                        // Only the newest battle may be waiting
                        prop_assert_eq!(i as u64, count - 1);
                    } else {
                        resolved += 1;
                    }
                }
                prop_assert_eq!(world.win_ledger().total(), resolved);
            }
        }
    }

    #[test]
    fn test_reexports_cover_the_flow() {
        let oracle = registry();
        let mut world = World::new();
        let a = Address::new([1; 32]);
        let b = Address::new([2; 32]);

        join_battle(&mut world, &oracle, a, AssetId::new([10; 32]), 0).unwrap();
        let outcome = join_battle(&mut world, &oracle, b, AssetId::new([20; 32]), 1).unwrap();
        let battle = world.battle(outcome.battle_index()).unwrap();
        assert_eq!(battle.players.len(), PLAYERS_PER_BATTLE);
        assert_eq!(
            battle.winner,
            Some(winning_side(1, &b))
        );
    }
}
