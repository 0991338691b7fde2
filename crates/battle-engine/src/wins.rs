//! Per-asset win counts

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::AssetId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WinLedger {
    wins: HashMap<AssetId, u64>,
}

impl WinLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for `asset`, 0 if it never won
    pub fn get(&self, asset: &AssetId) -> u64 {
        self.wins.get(asset).copied().unwrap_or(0)
    }

    /// Only the resolver records wins
    pub(crate) fn record_win(&mut self, asset: AssetId) -> u64 {
        let count = self.wins.entry(asset).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Sum of all wins; equals the number of resolved battles
    pub fn total(&self) -> u64 {
        self.wins.values().sum()
    }

    /// Assets ordered by win count, highest first (ties by asset id)
    pub fn leaderboard(&self) -> Vec<(AssetId, u64)> {
        let mut rows: Vec<(AssetId, u64)> = self.wins.iter().map(|(a, w)| (*a, *w)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }
}
