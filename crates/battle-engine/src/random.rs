//! Seeded pseudo-random coin flip
//!
//! Battle outcomes are derived from the resolution timestamp and the
//! resolving caller's identity. Anyone who can observe or influence those
//! inputs can predict the winner. This is acceptable for a casual game and
//! nothing else; value-bearing deployments need a VRF or an off-chain
//! entropy source instead.

use crate::types::{Address, Side};

/// Seeded random number generator (xorshift64*)
///
/// Deterministic: same seed + salt = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and a salt
    pub fn new(seed: &[u8; 32], salt: u64) -> Self {
        let mut state = salt.wrapping_mul(0x517cc1b727220a95);
        for chunk in seed.chunks_exact(8) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            state = (state ^ u64::from_le_bytes(bytes))
                .wrapping_mul(0x9e3779b97f4a7c15)
                .rotate_left(29);
        }

        // xorshift never leaves zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}

/// Pick the winning side of a battle resolved at `timestamp` by `resolver`.
///
/// No bias correction is applied to the modulo-2 reduction.
pub fn winning_side(timestamp: i64, resolver: &Address) -> Side {
    let mut rng = SeededRng::new(resolver.as_bytes(), timestamp as u64);
    if rng.next_range(2) == 0 {
        Side::First
    } else {
        Side::Second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = [42u8; 32];
        let mut r1 = SeededRng::new(&seed, 7);
        let mut r2 = SeededRng::new(&seed, 7);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(&[1u8; 32], 0);
        let mut rng2 = SeededRng::new(&[2u8; 32], 0);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_different_salt() {
        let seed = [42u8; 32];
        let mut rng1 = SeededRng::new(&seed, 0);
        let mut rng2 = SeededRng::new(&seed, 1);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_zero_seed_does_not_stall() {
        let mut rng = SeededRng::new(&[0u8; 32], 0);
        let vals: Vec<_> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().all(|v| *v != 0));
    }

    #[test]
    fn test_next_range() {
        let mut rng = SeededRng::new(&[42u8; 32], 0);
        for max in [1, 2, 10, 1000].iter() {
            for _ in 0..100 {
                let val = rng.next_range(*max);
                assert!(val < *max, "next_range({}) returned {}", max, val);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_winning_side_is_deterministic() {
        let resolver = Address::new([9; 32]);
        for ts in 1_700_000_000..1_700_000_020 {
            assert_eq!(winning_side(ts, &resolver), winning_side(ts, &resolver));
        }
    }

    #[test]
    fn test_winning_side_takes_both_values() {
        let resolver = Address::new([2; 32]);
        let sides: Vec<Side> = (0..20)
            .map(|i| winning_side(1_700_000_000 + i, &resolver))
            .collect();
        assert!(sides.contains(&Side::First));
        assert!(sides.contains(&Side::Second));
    }

    #[test]
    fn test_winning_side_roughly_balanced() {
        let resolver = Address::new([0xbb; 32]);
        let first = (0..1000)
            .filter(|&i: &i64| winning_side(1_700_000_000 + i, &resolver) == Side::First)
            .count();
        assert!((350..=650).contains(&first), "first won {} of 1000", first);
    }
}
