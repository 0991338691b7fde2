//! Battle data model
//!
//! Identities and assets are opaque 32-byte values so the same types can
//! carry a Solana `Pubkey`, an EVM token id or a test fixture.

use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub const fn to_bytes(self) -> [u8; 32] {
                self.0
            }

            /// Parse from a 64-character hex string (no `0x` prefix).
            pub fn from_hex(s: &str) -> Option<Self> {
                let mut out = [0u8; 32];
                hex::decode_to_slice(s, &mut out).ok()?;
                Some(Self(out))
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // First 4 bytes are plenty to tell fixtures apart in test output
                write!(f, "{}({}..)", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).ok_or_else(|| {
                    serde::de::Error::custom(format!("expected 64 hex chars, got {:?}", s))
                })
            }
        }
    };
}

hex_id! {
    /// Identity of a caller (wallet address)
    Address
}

hex_id! {
    /// Identifier of a collectible managed by the ownership registry
    AssetId
}

/// One side of a battle: who joined, and with which asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub identity: Address,
    pub asset: AssetId,
}

impl Player {
    pub fn new(identity: Address, asset: AssetId) -> Self {
        Self { identity, asset }
    }
}

/// Winning side of a resolved battle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The player who opened the battle
    First,
    /// The player who joined it
    Second,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Side> {
        match index {
            0 => Some(Side::First),
            1 => Some(Side::Second),
            _ => None,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// A single match between two (caller, asset) pairs.
///
/// A battle with one player is open; the second join resolves it in the
/// same step, so `winner` is `Some` exactly when both slots are filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub players: Vec<Player>,
    /// Unix timestamp (seconds) when the battle was opened
    pub created_at: i64,
    pub winner: Option<Side>,
}

impl Battle {
    pub fn open(first: Player, created_at: i64) -> Self {
        Self {
            players: vec![first],
            created_at,
            winner: None,
        }
    }

    /// Exactly one player, waiting for an opponent
    pub fn is_pending(&self) -> bool {
        self.players.len() == 1
    }

    pub fn is_resolved(&self) -> bool {
        self.players.len() == 2 && self.winner.is_some()
    }

    pub fn player(&self, side: Side) -> Option<&Player> {
        self.players.get(side.index())
    }

    pub fn winning_player(&self) -> Option<&Player> {
        self.winner.and_then(|side| self.player(side))
    }

    pub fn losing_player(&self) -> Option<&Player> {
        self.winner.and_then(|side| self.player(side.opponent()))
    }

    pub fn involves(&self, caller: &Address) -> bool {
        self.players.iter().any(|p| p.identity == *caller)
    }
}

/// Where a caller stands with respect to matchmaking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerStatus {
    /// Never joined, or the latest battle is already resolved
    NoneOrResolved,
    /// Waiting in the open battle
    Pending { battle_index: u64 },
}

/// Notification raised once per resolved battle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleComplete {
    pub battle_index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_through_json() {
        let addr = Address::new([0xab; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(AssetId::from_hex("abcd").is_none());
        assert!(AssetId::from_hex(&"zz".repeat(32)).is_none());
        assert!(serde_json::from_str::<AssetId>("\"0x00\"").is_err());
    }

    #[test]
    fn test_debug_is_short() {
        let asset = AssetId::new([1; 32]);
        assert_eq!(format!("{:?}", asset), "AssetId(01010101..)");
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::from_index(0), Some(Side::First));
        assert_eq!(Side::from_index(1), Some(Side::Second));
        assert_eq!(Side::from_index(2), None);
        assert_eq!(Side::First.opponent(), Side::Second);
        assert_eq!(Side::Second.index(), 1);
    }

    #[test]
    fn test_battle_states() {
        let a = Player::new(Address::new([1; 32]), AssetId::new([10; 32]));
        let b = Player::new(Address::new([2; 32]), AssetId::new([20; 32]));

        let mut battle = Battle::open(a, 100);
        assert!(battle.is_pending());
        assert!(!battle.is_resolved());
        assert!(battle.winning_player().is_none());

        battle.players.push(b);
        battle.winner = Some(Side::Second);
        assert!(!battle.is_pending());
        assert!(battle.is_resolved());
        assert_eq!(battle.winning_player(), Some(&b));
        assert_eq!(battle.losing_player(), Some(&a));
        assert!(battle.involves(&a.identity));
    }
}
