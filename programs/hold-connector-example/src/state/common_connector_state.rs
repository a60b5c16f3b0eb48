use anchor_lang::prelude::*;

// Every connector program must lay out its state account with this common
// first part (after the discriminator); the router reads it fresh on every
// poke. Connector-specific fields go after the common view.
#[derive(InitSpace)]
#[account]
pub struct CommonConnectorState {
    pub underlying_mint: Pubkey,

    /// underlying-equivalent held by this connector
    /// incremented when receiving tokens from the router's reserve
    /// incremented when the position accrues value
    /// decremented when slashed
    /// decremented when redeeming back to the reserve
    pub connector_total_underlying: u64,

    /// forecast of the next claim_rewards(); a just-hold connector
    /// never accrues rewards, so this stays zero
    pub claimable_rewards: u64,

    /// external share price, 32-bit precision; holding is always 1.0
    pub assets_per_share_p32: u64,

    // ---- connector-specific fields, opaque to the router ----
    /// fixed redeem/claim destination: the router's reserve account
    pub reserve_account: Pubkey,
}
