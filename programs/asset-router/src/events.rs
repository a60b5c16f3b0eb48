use anchor_lang::prelude::*;

#[event]
#[derive(Debug)]
pub struct DepositEvent {
    pub router_state: Pubkey,
    pub depositor: Pubkey,
    pub underlying_amount: u64,
    pub wrapper_minted: u64,
    pub deposit_fee_lamports: u64,
    //--- wrapper price components after the deposit
    pub reserve_amount: u64,
    pub total_staked_amount: u64,
    pub wrapper_supply: u64,
}

#[event]
#[derive(Debug)]
pub struct WithdrawEvent {
    pub router_state: Pubkey,
    pub withdrawer: Pubkey,
    pub wrapper_burned: u64,
    pub underlying_returned: u64,
    /// underlying pulled from connectors by the pre-withdraw redeem
    pub redeemed_from_connectors: u64,
    //--- wrapper price components after the withdraw
    pub reserve_amount: u64,
    pub total_staked_amount: u64,
    pub wrapper_supply: u64,
}

#[event]
#[derive(Debug)]
pub struct PokeEvent {
    pub router_state: Pubkey,
    pub caller: Pubkey,
    /// 0 = reporter, 1 = slasher
    pub caller_class: u8,
    pub claim_rewards: bool,
    pub connectors_poked: u8,
    pub reserve_amount: u64,
    pub total_staked_amount: u64,
    /// opaque payload forwarded to the external keeper-incentive system
    pub compensation_opts: Vec<u8>,
}

#[event]
#[derive(Debug)]
pub struct StakeToConnectorEvent {
    pub router_state: Pubkey,
    pub connector_state: Pubkey,
    pub amount: u64,
    pub forced: bool,
}

#[event]
#[derive(Debug)]
pub struct RedeemFromConnectorEvent {
    pub router_state: Pubkey,
    pub connector_state: Pubkey,
    pub amount: u64,
    pub forced: bool,
}

#[event]
#[derive(Debug)]
pub struct ClaimRewardsEvent {
    pub router_state: Pubkey,
    pub connector_state: Pubkey,
    pub claimed: u64,
    pub performance_fee: u64,
    /// post-fee remainder credited to the connector's locked profit
    pub locked_profit_added: u64,
}

#[event]
#[derive(Debug)]
pub struct ConnectorReportEvent {
    pub router_state: Pubkey,
    pub connector_state: Pubkey,
    /// amount before this report
    pub old_underlying: u64,
    pub new_underlying: u64,
    /// profit underlying amount discovered
    pub profit: u64,
    /// slashing underlying amount discovered
    pub slashing: u64,
}

#[event]
#[derive(Debug)]
pub struct SetReserveConfigEvent {
    pub router_state: Pubkey,
    pub target_reserve_ratio_bp: u16,
    pub lower_bound_bp: u16,
    pub upper_bound_bp: u16,
    pub min_rebalance_interval: u64,
    pub max_rebalance_interval: u64,
}

#[event]
#[derive(Debug)]
pub struct SetConnectorListEvent {
    pub router_state: Pubkey,
    pub connectors: u8,
}

#[event]
#[derive(Debug)]
pub struct SetPerformanceFeeEvent {
    pub router_state: Pubkey,
    pub performance_fee_bp: u16,
}

#[event]
#[derive(Debug)]
pub struct EmergencyWithdrawEvent {
    pub router_state: Pubkey,
    pub connector_state: Pubkey,
    pub amount: u64,
    pub assets_per_share_p32: u64,
}

#[event]
#[derive(Debug)]
pub struct RouterMigratedEvent {
    pub router_state: Pubkey,
    pub new_manager: Pubkey,
    pub reserve_moved: u64,
    /// arbitrary payload forwarded to the successor
    pub payload: Vec<u8>,
}

#[event]
#[derive(Debug)]
pub struct CallExternalEvent {
    pub router_state: Pubkey,
    pub target_program: Pubkey,
    pub data_len: u32,
}

#[event]
#[derive(Debug)]
pub struct OwnershipTransferredEvent {
    pub router_state: Pubkey,
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
