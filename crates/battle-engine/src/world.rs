//! All battle state in one value
//!
//! Ledger, caller index and win counts move together so a single lock (or a
//! single owner) covers every read-decide-write sequence.

use serde::{Deserialize, Serialize};

use crate::error::BattleResult;
use crate::ledger::BattleLedger;
use crate::types::{Address, AssetId, Battle, CallerStatus};
use crate::wins::WinLedger;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct World {
    pub(crate) ledger: BattleLedger,
    pub(crate) wins: WinLedger,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &BattleLedger {
        &self.ledger
    }

    pub fn win_ledger(&self) -> &WinLedger {
        &self.wins
    }

    pub fn latest_battle(&self, caller: &Address) -> Option<&Battle> {
        self.ledger.latest_for(caller)
    }

    pub fn battle(&self, index: u64) -> BattleResult<&Battle> {
        self.ledger.get(index)
    }

    pub fn battle_count(&self) -> u64 {
        self.ledger.len()
    }

    pub fn wins(&self, asset: &AssetId) -> u64 {
        self.wins.get(asset)
    }

    pub fn status(&self, caller: &Address) -> CallerStatus {
        match self.ledger.latest_index_for(caller) {
            Some(battle_index) => match self.ledger.get(battle_index) {
                Ok(battle) if battle.is_pending() => CallerStatus::Pending { battle_index },
                _ => CallerStatus::NoneOrResolved,
            },
            None => CallerStatus::NoneOrResolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_status() {
        let alice = Address::new([1; 32]);
        let mut world = World::new();
        assert_eq!(world.status(&alice), CallerStatus::NoneOrResolved);

        let index = world
            .ledger
            .append(Battle::open(Player::new(alice, AssetId::new([9; 32])), 0));
        world.ledger.record_caller(alice, index);
        assert_eq!(world.status(&alice), CallerStatus::Pending { battle_index: 0 });
    }

    #[test]
    fn test_snapshot_json() {
        let alice = Address::new([1; 32]);
        let mut world = World::new();
        let index = world
            .ledger
            .append(Battle::open(Player::new(alice, AssetId::new([9; 32])), 42));
        world.ledger.record_caller(alice, index);

        let json = serde_json::to_string(&world).unwrap();
        let restored: World = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.latest_battle(&alice), world.latest_battle(&alice));
        assert_eq!(restored.battle_count(), 1);
    }
}
