use anchor_lang::prelude::*;

#[constant]
pub const MAX_CONNECTORS: u8 = 8;
#[constant]
pub const MAX_FEE_WAIVED: u8 = 16;
#[constant]
pub const MAX_PACKED_PARAMS_LEN: u8 = 64;
#[constant]
pub const WRAPPER_MINT_AUTH_SEED: &[u8] = b"wrapper-mint-auth";
#[constant]
pub const RESERVE_AUTH_SEED: &[u8] = b"reserve-auth";
#[constant]
pub const MIN_MOVEMENT_UNITS: u64 = 1_000_000; // avoid low-amount/rounding attacks
#[constant]
pub const LOCKED_PROFIT_UNLOCK_SECONDS: u64 = 6 * 60 * 60;
#[constant]
pub const MAX_PERFORMANCE_FEE_BP: u16 = 9_999; // a 100% fee would confiscate every harvest

/// accounts per connector group in a poke's remaining_accounts:
/// [connector_program, connector_state, connector_authority, connector_deposit_account]
pub const CONNECTOR_GROUP_ACCOUNTS: usize = 4;

// anchor instruction discriminators of the connector interface,
// sha256("global:<name>")[0..8]
pub const CONNECTOR_IX_REDEEM: [u8; 8] = [184, 12, 86, 149, 70, 196, 97, 225];
pub const CONNECTOR_IX_CLAIM_REWARDS: [u8; 8] = [4, 144, 132, 71, 116, 23, 151, 80];
pub const CONNECTOR_IX_BEFORE_POKE: [u8; 8] = [218, 161, 179, 91, 91, 83, 37, 233];
pub const CONNECTOR_IX_AFTER_POKE: [u8; 8] = [216, 94, 168, 113, 140, 152, 53, 168];
