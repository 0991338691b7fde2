//! Append-only battle history and the per-caller index
//!
//! Battle indices are 0-based positions in the ledger. A caller that never
//! joined simply has no entry in the index; there is no placeholder record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::types::{Address, Battle, Player};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BattleLedger {
    battles: Vec<Battle>,
    latest: HashMap<Address, u64>,
}

impl BattleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a battle and return its index
    pub fn append(&mut self, battle: Battle) -> u64 {
        let index = self.battles.len() as u64;
        self.battles.push(battle);
        index
    }

    pub fn get(&self, index: u64) -> BattleResult<&Battle> {
        self.battles
            .get(index as usize)
            .ok_or(BattleError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Mutable access is crate-private: only the matchmaker and resolver
    /// write to recorded battles.
    pub(crate) fn get_mut(&mut self, index: u64) -> BattleResult<&mut Battle> {
        let len = self.len();
        self.battles
            .get_mut(index as usize)
            .ok_or(BattleError::IndexOutOfRange { index, len })
    }

    pub(crate) fn record_caller(&mut self, caller: Address, index: u64) {
        self.latest.insert(caller, index);
    }

    /// Index of the caller's most recent battle
    pub fn latest_index_for(&self, caller: &Address) -> Option<u64> {
        self.latest.get(caller).copied()
    }

    /// The caller's most recent battle, `None` if they never joined one
    pub fn latest_for(&self, caller: &Address) -> Option<&Battle> {
        self.latest_index_for(caller)
            .and_then(|index| self.battles.get(index as usize))
    }

    /// The single open battle, if the newest entry is still waiting for an
    /// opponent. Matchmaking only ever looks here.
    pub fn open_battle(&self) -> Option<(u64, &Player)> {
        let last = self.battles.last()?;
        if last.is_pending() {
            Some((self.len() - 1, &last.players[0]))
        } else {
            None
        }
    }

    pub fn len(&self) -> u64 {
        self.battles.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Battle> {
        self.battles.iter()
    }
}
