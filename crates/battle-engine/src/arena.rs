//! Thread-safe battle service
//!
//! [`Arena`] owns the [`World`] behind one mutex. Each `join_battle` runs the
//! ownership check, the matchmaking decision, the write and the resolution
//! inside a single critical section, so two concurrent joins can never both
//! grab the same open slot or both open a new one.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::error::BattleResult;
use crate::matchmaker::{self, JoinOutcome};
use crate::oracle::OwnershipOracle;
use crate::types::{Address, AssetId, Battle, BattleComplete, CallerStatus};
use crate::world::World;

/// Source of "now" in unix seconds
pub trait TimeSource {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Settable clock for tests and deterministic replays
#[derive(Debug, Default)]
pub struct ManualTime(AtomicI64);

impl ManualTime {
    pub fn new(start: i64) -> Self {
        Self(AtomicI64::new(start))
    }

    pub fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Arena<O, T = WallClock> {
    oracle: O,
    time: T,
    world: Mutex<World>,
    subscribers: Mutex<Vec<Sender<BattleComplete>>>,
}

impl<O: OwnershipOracle> Arena<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_time(oracle, WallClock)
    }
}

impl<O: OwnershipOracle, T: TimeSource> Arena<O, T> {
    pub fn with_time(oracle: O, time: T) -> Self {
        Self::from_world(oracle, time, World::new())
    }

    /// Resume from a previously exported world
    pub fn from_world(oracle: O, time: T, world: World) -> Self {
        Self {
            oracle,
            time,
            world: Mutex::new(world),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Join with `asset`: open a battle or complete the open one.
    ///
    /// A completed battle is announced to every subscriber once the lock has
    /// been released.
    pub fn join_battle(&self, caller: Address, asset: AssetId) -> BattleResult<JoinOutcome> {
        let outcome = {
            let mut world = self.world.lock();
            let now = self.time.now();
            matchmaker::join_battle(&mut world, &self.oracle, caller, asset, now)?
        };

        if let Some(event) = outcome.completion() {
            self.notify(event);
        }
        Ok(outcome)
    }

    /// Receive a `BattleComplete` for every battle resolved from now on
    pub fn subscribe(&self) -> Receiver<BattleComplete> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }

    fn notify(&self, event: BattleComplete) {
        let mut subscribers = self.subscribers.lock();
        // Drop subscribers whose receiver is gone
        subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// The caller's most recent battle; `None` means no battle yet
    pub fn latest_battle(&self, caller: &Address) -> Option<Battle> {
        self.world.lock().latest_battle(caller).cloned()
    }

    pub fn battle(&self, index: u64) -> BattleResult<Battle> {
        self.world.lock().battle(index).cloned()
    }

    pub fn battle_count(&self) -> u64 {
        self.world.lock().battle_count()
    }

    pub fn wins(&self, asset: &AssetId) -> u64 {
        self.world.lock().wins(asset)
    }

    pub fn status(&self, caller: &Address) -> CallerStatus {
        self.world.lock().status(caller)
    }

    pub fn leaderboard(&self) -> Vec<(AssetId, u64)> {
        self.world.lock().win_ledger().leaderboard()
    }

    pub fn history(&self) -> Vec<Battle> {
        self.world.lock().ledger().iter().cloned().collect()
    }

    /// Every battle in ledger order, as JSON
    pub fn history_json(&self) -> serde_json::Value {
        let world = self.world.lock();
        let battles: Vec<serde_json::Value> = world
            .ledger()
            .iter()
            .enumerate()
            .map(|(index, battle)| {
                serde_json::json!({
                    "index": index,
                    "players": battle.players,
                    "created_at": battle.created_at,
                    "winner": battle.winner.map(|side| side.index()),
                })
            })
            .collect();
        serde_json::Value::Array(battles)
    }

    /// Copy of the full state, e.g. for persistence
    pub fn snapshot(&self) -> World {
        self.world.lock().clone()
    }
}
