use anchor_lang::prelude::*;

#[event]
#[derive(Debug)]
pub struct UpdateUnderlyingAmountEvent {
    pub connector_state: Pubkey,
    pub underlying_mint: Pubkey,
    /// amount before this event
    pub old_underlying: u64,
    /// profit underlying amount discovered
    pub profit: u64,
    /// slashing underlying amount discovered
    pub slashing: u64,
}

#[event]
#[derive(Debug)]
pub struct ConnectorRedeemEvent {
    pub connector_state: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Debug)]
pub struct ConnectorClaimEvent {
    pub connector_state: Pubkey,
    pub claimed: u64,
}
