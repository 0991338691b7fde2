//! Ownership oracle seam
//!
//! The engine never tracks who owns what. It asks an oracle before every
//! join; on-chain that is the SPL token account, in tests and sandboxes it is
//! the in-memory [`AssetRegistry`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{BattleError, BattleResult};
use crate::types::{Address, AssetId};

/// Answers "who owns this asset?"
pub trait OwnershipOracle {
    /// Current owner of `asset`, or `UnknownAsset` if it does not exist
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address>;
}

impl<T: OwnershipOracle + ?Sized> OwnershipOracle for &T {
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address> {
        (**self).owner_of(asset)
    }
}

impl<T: OwnershipOracle + ?Sized> OwnershipOracle for Arc<T> {
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address> {
        (**self).owner_of(asset)
    }
}

/// A registry that keeps changing hands while battles run
impl<T: OwnershipOracle> OwnershipOracle for RwLock<T> {
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address> {
        self.read().owner_of(asset)
    }
}

/// Fail with `NotOwner` unless `caller` currently owns `asset`.
pub fn verify_owner<O: OwnershipOracle + ?Sized>(
    oracle: &O,
    caller: &Address,
    asset: &AssetId,
) -> BattleResult<()> {
    let owner = oracle.owner_of(asset)?;
    if owner != *caller {
        return Err(BattleError::NotOwner {
            caller: *caller,
            asset: *asset,
        });
    }
    Ok(())
}

/// In-memory ownership registry
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    owners: HashMap<AssetId, Address>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `owner` as the holder of a newly minted `asset`.
    /// Returns the previous owner if the asset already existed.
    pub fn register(&mut self, asset: AssetId, owner: Address) -> Option<Address> {
        self.owners.insert(asset, owner)
    }

    pub fn transfer(&mut self, asset: &AssetId, to: Address) -> BattleResult<Address> {
        let slot = self
            .owners
            .get_mut(asset)
            .ok_or(BattleError::UnknownAsset(*asset))?;
        Ok(std::mem::replace(slot, to))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl OwnershipOracle for AssetRegistry {
    fn owner_of(&self, asset: &AssetId) -> BattleResult<Address> {
        self.owners
            .get(asset)
            .copied()
            .ok_or(BattleError::UnknownAsset(*asset))
    }
}
