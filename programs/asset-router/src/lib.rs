pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod util;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK7W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod asset_router {
    use super::*;

    // ------------------
    // admin
    // ------------------
    pub fn initialize(
        ctx: Context<Initialize>,
        target_reserve_ratio_bp: u16,
        lower_bound_bp: u16,
        upper_bound_bp: u16,
        min_rebalance_interval: u64,
        max_rebalance_interval: u64,
        performance_fee_bp: u16,
    ) -> Result<()> {
        initialize::handle_initialize(
            ctx,
            target_reserve_ratio_bp,
            lower_bound_bp,
            upper_bound_bp,
            min_rebalance_interval,
            max_rebalance_interval,
            performance_fee_bp,
        )
    }

    pub fn set_reserve_config(
        ctx: Context<SetReserveConfig>,
        target_reserve_ratio_bp: u16,
        lower_bound_bp: u16,
        upper_bound_bp: u16,
        min_rebalance_interval: u64,
        max_rebalance_interval: u64,
    ) -> Result<()> {
        configure_router::handle_set_reserve_config(
            ctx,
            target_reserve_ratio_bp,
            lower_bound_bp,
            upper_bound_bp,
            min_rebalance_interval,
            max_rebalance_interval,
        )
    }

    pub fn set_connector_list(
        ctx: Context<SetConnectorList>,
        setups: Vec<ConnectorSetup>,
    ) -> Result<()> {
        set_connector_list::handle_set_connector_list(ctx, setups)
    }

    pub fn set_stake_params(
        ctx: Context<SetConnectorParams>,
        index: u8,
        params: Vec<u8>,
    ) -> Result<()> {
        set_connector_params::handle_set_stake_params(ctx, index, params)
    }

    pub fn set_claim_params(
        ctx: Context<SetConnectorParams>,
        index: u8,
        params: Vec<u8>,
    ) -> Result<()> {
        set_connector_params::handle_set_claim_params(ctx, index, params)
    }

    pub fn set_emergency_params(
        ctx: Context<SetConnectorParams>,
        index: u8,
        params: Vec<u8>,
    ) -> Result<()> {
        set_connector_params::handle_set_emergency_params(ctx, index, params)
    }

    pub fn set_performance_fee(ctx: Context<SetPerformanceFee>, bp: u16) -> Result<()> {
        configure_router::handle_set_performance_fee(ctx, bp)
    }

    pub fn set_fee_receiver(ctx: Context<SetFeeReceiver>) -> Result<()> {
        configure_router::handle_set_fee_receiver(ctx)
    }

    pub fn set_deposit_fee(ctx: Context<SetDepositFee>, lamports: u64) -> Result<()> {
        configure_router::handle_set_deposit_fee(ctx, lamports)
    }

    pub fn set_fee_waived(ctx: Context<SetDepositFee>, list: Vec<Pubkey>) -> Result<()> {
        configure_router::handle_set_fee_waived(ctx, list)
    }

    pub fn collect_deposit_fees(ctx: Context<CollectDepositFees>) -> Result<()> {
        configure_router::handle_collect_deposit_fees(ctx)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
        configure_router::handle_transfer_ownership(ctx, new_admin)
    }

    pub fn manual_stake<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManualRebalance<'info>>,
        index: u8,
        amount: u64,
    ) -> Result<()> {
        manual_rebalance::handle_manual_stake(ctx, index, amount)
    }

    pub fn manual_redeem<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManualRebalance<'info>>,
        index: u8,
        amount: u64,
    ) -> Result<()> {
        manual_rebalance::handle_manual_redeem(ctx, index, amount)
    }

    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, index: u8) -> Result<()> {
        emergency_withdraw::handle_emergency_withdraw(ctx, index)
    }

    pub fn migrate_to_new_manager(
        ctx: Context<MigrateToNewManager>,
        payload: Vec<u8>,
    ) -> Result<()> {
        migrate::handle_migrate_to_new_manager(ctx, payload)
    }

    pub fn call_external<'info>(
        ctx: Context<'_, '_, 'info, 'info, CallExternal<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        call_external::handle_call_external(ctx, data)
    }

    pub fn call_external_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, CallExternal<'info>>,
        calls: Vec<RelayCall>,
    ) -> Result<()> {
        call_external::handle_call_external_batch(ctx, calls)
    }

    // ------------------
    // cranks
    // ------------------
    pub fn poke_from_reporter<'info>(
        ctx: Context<'_, '_, 'info, 'info, Poke<'info>>,
        claim_rewards: bool,
        compensation_opts: Vec<u8>,
    ) -> Result<()> {
        poke::handle_poke(ctx, PokeCaller::Reporter, claim_rewards, compensation_opts)
    }

    pub fn poke_from_slasher<'info>(
        ctx: Context<'_, '_, 'info, 'info, Poke<'info>>,
        claim_rewards: bool,
        compensation_opts: Vec<u8>,
    ) -> Result<()> {
        poke::handle_poke(ctx, PokeCaller::Slasher, claim_rewards, compensation_opts)
    }

    pub fn sync_connector(ctx: Context<SyncConnector>, index: u8) -> Result<()> {
        sync_connector::handle_sync_connector(ctx, index)
    }

    // ------------------
    // users
    // ------------------
    pub fn deposit(ctx: Context<Deposit>, amount: u64, fee_offered_lamports: u64) -> Result<()> {
        deposit::handle_deposit(ctx, amount, fee_offered_lamports)
    }

    pub fn withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
        amount: u64,
        fee_offered_lamports: u64,
    ) -> Result<()> {
        withdraw::handle_withdraw(ctx, amount, fee_offered_lamports)
    }
}
