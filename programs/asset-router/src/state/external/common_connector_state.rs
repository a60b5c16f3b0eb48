use crate::error::ErrorCode::ErrDeserializingConnectorState;
use anchor_lang::{error, prelude::AccountInfo, solana_program::pubkey::Pubkey, Result};
use borsh::{BorshDeserialize, BorshSerialize};

// EXTERNAL state, belonging to connector programs.
// Every connector program must lay out its state account with this
// common first part; the router reads it fresh on every poke and never
// caches it across instructions.
#[derive(Clone, Debug, BorshDeserialize, BorshSerialize, PartialEq)]
pub struct CommonConnectorState {
    pub discriminator: [u8; 8],

    pub underlying_mint: Pubkey,

    /// underlying-equivalent currently held by the external target,
    /// computed by the connector from the external protocol's own
    /// share-to-underlying exchange rate.
    /// incremented when receiving tokens from the reserve
    /// incremented when the external position accrues value
    /// decremented when slashed
    /// decremented when redeeming back to the reserve
    pub connector_total_underlying: u64,

    /// forecast of the next claim_rewards(), in underlying units
    pub claimable_rewards: u64,

    /// external share price with 32-bit precision,
    /// assets_per_share_p32 = underlying-held * 2^32 / shares-held;
    /// the emergency path refuses to operate below its safety floor
    pub assets_per_share_p32: u64,
}

/// deserialize common_connector_state: &AccountInfo
pub fn deserialize(common_connector_state: &AccountInfo) -> Result<CommonConnectorState> {
    let mut data_slice = &common_connector_state.data.borrow()[..];
    CommonConnectorState::deserialize(&mut data_slice)
        .map_err(|_err| error!(ErrDeserializingConnectorState))
}
