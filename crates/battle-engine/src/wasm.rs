//! WASM bindings for front-end outcome verification

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{winning_side, Address, Battle, Side};

fn parse_address(bytes: &[u8]) -> Result<Address, JsError> {
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| JsError::new("Address must be exactly 32 bytes"))?;
    Ok(Address::new(arr))
}

/// Winning side (0 or 1) for a battle resolved at `timestamp` by `resolver`
#[wasm_bindgen]
pub fn winning_side_for(timestamp: i64, resolver: &[u8]) -> Result<u8, JsError> {
    let resolver = parse_address(resolver)?;
    Ok(winning_side(timestamp, &resolver).index() as u8)
}

/// Check a recorded battle against the coin flip.
///
/// # Arguments
/// * `battle_json` - JSON serialized Battle (as exported by the arena history)
/// * `resolved_at` - Unix timestamp of the second join
///
/// The resolver is always the second player.
#[wasm_bindgen]
pub fn verify_outcome(battle_json: &str, resolved_at: i64) -> Result<bool, JsError> {
    let battle: Battle = serde_json::from_str(battle_json)
        .map_err(|e| JsError::new(&format!("Invalid battle: {}", e)))?;

    let (Some(second), Some(recorded)) = (battle.player(Side::Second), battle.winner) else {
        return Ok(false);
    };
    Ok(winning_side(resolved_at, &second.identity) == recorded)
}

#[derive(serde::Serialize)]
struct BattleSummary {
    status: String,
    players: usize,
    created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    winning_asset: Option<String>,
}

/// Summarise a battle for display.
///
/// Returns `{status, players, created_at, winner?, winning_asset?}`.
#[wasm_bindgen]
pub fn describe_battle(battle_json: &str) -> Result<JsValue, JsError> {
    let battle: Battle = serde_json::from_str(battle_json)
        .map_err(|e| JsError::new(&format!("Invalid battle: {}", e)))?;

    let status = if battle.is_resolved() {
        "Resolved"
    } else if battle.is_pending() {
        "Pending"
    } else {
        "Empty"
    };

    let summary = BattleSummary {
        status: status.to_string(),
        players: battle.players.len(),
        created_at: battle.created_at,
        winner: battle.winning_player().map(|p| p.identity.to_string()),
        winning_asset: battle.winning_player().map(|p| p.asset.to_string()),
    };

    serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
