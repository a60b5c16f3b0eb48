use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ8FEfcYkg476zPFsLnT");

#[program]
pub mod hold_connector_example {
    use super::*;

    // ------------------
    // admin
    // ------------------
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::handle_initialize(ctx)
    }

    // ------------------
    // cranks
    // ------------------
    pub fn update_underlying_amount(ctx: Context<UpdateUnderlyingAmount>) -> Result<()> {
        update_underlying_amount::handle_update_underlying_amount(ctx)
    }

    // ------------------
    // router interface
    // ------------------
    pub fn redeem(ctx: Context<Redeem>, amount: u64) -> Result<()> {
        redeem::handle_redeem(ctx, amount)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<u64> {
        claim_rewards::handle_claim_rewards(ctx)
    }

    pub fn before_poke(ctx: Context<PokeHook>) -> Result<()> {
        hooks::handle_before_poke(ctx)
    }

    pub fn after_poke(ctx: Context<PokeHook>) -> Result<()> {
        hooks::handle_after_poke(ctx)
    }
}
