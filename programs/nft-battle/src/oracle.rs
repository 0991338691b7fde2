//! Ownership check against the SPL token account of the asset

use anchor_lang::prelude::*;
use battle_engine::{Address, AssetId, BattleError, BattleResult, OwnershipOracle};

use crate::error::ArenaError;

/// SPL Token program (TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA)
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
    237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// The fields of an SPL mint that decide whether it is a collectible.
///
/// Layout: mint_authority [0..36), supply [36..44) little-endian,
/// decimals [44], is_initialized [45].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintInfo {
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
}

impl MintInfo {
    pub const LEN: usize = 82;

    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        let supply = u64::from_le_bytes(data[36..44].try_into().ok()?);
        Some(Self {
            supply,
            decimals: data[44],
            is_initialized: data[45] != 0,
        })
    }

    /// One indivisible token in existence, so at most one holder
    pub fn is_unique(&self) -> bool {
        self.is_initialized && self.supply == 1 && self.decimals == 0
    }
}

/// The fields of an SPL token account that decide ownership.
///
/// Layout: mint [0..32), owner [32..64), amount [64..72) little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccountOracle {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccountOracle {
    pub const LEN: usize = 165;

    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        let mint = Pubkey::new_from_array(data[0..32].try_into().ok()?);
        let owner = Pubkey::new_from_array(data[32..64].try_into().ok()?);
        let amount = u64::from_le_bytes(data[64..72].try_into().ok()?);
        Some(Self { mint, owner, amount })
    }

    /// Read the token account passed with the instruction. The mint must be
    /// a collectible; fungible mints are `UnknownAsset`.
    pub fn load(token: &AccountInfo, mint: &AccountInfo) -> Result<Self> {
        require_keys_eq!(*mint.owner, SPL_TOKEN_PROGRAM_ID, ArenaError::UnknownAsset);
        let mint_info = MintInfo::parse(&mint.try_borrow_data()?)
            .ok_or_else(|| error!(ArenaError::UnknownAsset))?;
        require!(mint_info.is_unique(), ArenaError::UnknownAsset);

        require_keys_eq!(*token.owner, SPL_TOKEN_PROGRAM_ID, ArenaError::UnknownAsset);
        let data = token.try_borrow_data()?;
        Self::parse(&data).ok_or_else(|| error!(ArenaError::UnknownAsset))
    }
}

impl OwnershipOracle for TokenAccountOracle {
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address> {
        if self.mint.to_bytes() != *asset.as_bytes() {
            return Err(BattleError::UnknownAsset(*asset));
        }
        if self.amount != 1 {
            // The account holder does not hold the collectible
            return Err(BattleError::NotOwner {
                caller: Address::new(self.owner.to_bytes()),
                asset: *asset,
            });
        }
        Ok(Address::new(self.owner.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_engine::verify_owner;

    fn token_account(mint: [u8; 32], owner: [u8; 32], amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; TokenAccountOracle::LEN];
        data[0..32].copy_from_slice(&mint);
        data[32..64].copy_from_slice(&owner);
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    #[test]
    fn test_token_program_id() {
        assert_eq!(
            SPL_TOKEN_PROGRAM_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn test_parse_layout() {
        let data = token_account([7; 32], [1; 32], 1);
        let oracle = TokenAccountOracle::parse(&data).unwrap();
        assert_eq!(oracle.mint, Pubkey::new_from_array([7; 32]));
        assert_eq!(oracle.owner, Pubkey::new_from_array([1; 32]));
        assert_eq!(oracle.amount, 1);

        assert!(TokenAccountOracle::parse(&data[..100]).is_none());
    }

    fn mint_account(supply: u64, decimals: u8) -> Vec<u8> {
        let mut data = vec![0u8; MintInfo::LEN];
        data[36..44].copy_from_slice(&supply.to_le_bytes());
        data[44] = decimals;
        data[45] = 1;
        data
    }

    #[test]
    fn test_parse_mint_layout() {
        let mint = MintInfo::parse(&mint_account(1, 0)).unwrap();
        assert_eq!(mint.supply, 1);
        assert_eq!(mint.decimals, 0);
        assert!(mint.is_initialized);
        assert!(mint.is_unique());

        assert!(MintInfo::parse(&mint_account(1, 0)[..44]).is_none());
    }

    #[test]
    fn test_fungible_mints_are_not_collectibles() {
        // Many wallets could each hold one unit of these
        assert!(!MintInfo::parse(&mint_account(1_000, 0)).unwrap().is_unique());
        assert!(!MintInfo::parse(&mint_account(1, 6)).unwrap().is_unique());
        assert!(!MintInfo::parse(&mint_account(0, 0)).unwrap().is_unique());

        let mut uninitialized = mint_account(1, 0);
        uninitialized[45] = 0;
        assert!(!MintInfo::parse(&uninitialized).unwrap().is_unique());
    }

    #[test]
    fn test_owner_of() {
        let asset = AssetId::new([7; 32]);
        let holder = Address::new([1; 32]);

        let oracle = TokenAccountOracle::parse(&token_account([7; 32], [1; 32], 1)).unwrap();
        assert_eq!(oracle.owner_of(&asset), Ok(holder));
        assert_eq!(verify_owner(&oracle, &holder, &asset), Ok(()));
        assert!(matches!(
            verify_owner(&oracle, &Address::new([2; 32]), &asset),
            Err(BattleError::NotOwner { .. })
        ));

        let other_mint = AssetId::new([8; 32]);
        assert_eq!(oracle.owner_of(&other_mint), Err(BattleError::UnknownAsset(other_mint)));

        let empty = TokenAccountOracle::parse(&token_account([7; 32], [1; 32], 0)).unwrap();
        assert!(matches!(
            verify_owner(&empty, &holder, &asset),
            Err(BattleError::NotOwner { .. })
        ));
    }
}
