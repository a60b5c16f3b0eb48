use crate::instructions::cranks::connector_ops::{
    cpi_claim_rewards, cpi_poke_hook, cpi_redeem, parse_connector_groups, transfer_to_connector,
};
use crate::util::now_ts;
use crate::{constants::*, error::ErrorCode, ConnectorAction, RouterState};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount, Transfer};
use shared_lib::StakeParams;

/// which keeper class is poking; classes differ only in their interval threshold
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PokeCaller {
    /// low-latency keeper, gated on min_rebalance_interval
    Reporter,
    /// fallback keeper, gated on max_rebalance_interval
    Slasher,
}

#[derive(Accounts)]
/// permissionless: anyone may poke; the decision algorithm makes it
/// idempotent and the deliberate NothingToDo failure keeps competing
/// keepers from wasting a rebalance on an already-settled state
pub struct Poke<'info> {
    #[account(mut)]
    pub router_state: Account<'info, RouterState>,

    #[account()]
    pub caller: Signer<'info>,

    #[account(address = router_state.underlying_mint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            &router_state.key().to_bytes(),
            RESERVE_AUTH_SEED
        ],
        bump
    )]
    pub reserve_authority: UncheckedAccount<'info>,
    #[account(mut, associated_token::mint = underlying_mint, associated_token::authority = reserve_authority)]
    pub reserve_account: Account<'info, TokenAccount>,

    /// performance fees land here
    #[account(mut, address = router_state.fee_receiver)]
    pub fee_receiver_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    // remaining_accounts: one group per registry entry, in list order:
    // [connector_program, connector_state, connector_authority, connector_deposit_account]
}

pub fn handle_poke<'info>(
    ctx: Context<'_, '_, 'info, 'info, Poke<'info>>,
    caller_class: PokeCaller,
    claim_rewards: bool,
    compensation_opts: Vec<u8>,
) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;

    let now = now_ts();
    let groups = parse_connector_groups(&ctx.accounts.router_state, ctx.remaining_accounts)?;

    // Phase 1: refresh every connector's report, recognizing profit or
    // slashing, so targets are computed from fresh totals
    let mut claimables = Vec::with_capacity(groups.len());
    for (index, connector) in groups.iter().enumerate() {
        let report = connector.read_state()?;
        let (profit, slashing) =
            ctx.accounts.router_state.recognize_connector_report(
                index,
                report.connector_total_underlying,
                now,
            );
        if profit > 0 || slashing > 0 {
            emit!(crate::events::ConnectorReportEvent {
                router_state: ctx.accounts.router_state.key(),
                connector_state: connector.state.key(),
                old_underlying: report.connector_total_underlying + slashing - profit,
                new_underlying: report.connector_total_underlying,
                profit,
                slashing,
            });
        }
        claimables.push(report.claimable_rewards);
    }

    // Phase 2: per-connector decisions, fresh every poke
    let caller_min_interval = match caller_class {
        PokeCaller::Reporter => ctx.accounts.router_state.min_rebalance_interval,
        PokeCaller::Slasher => ctx.accounts.router_state.max_rebalance_interval,
    };
    let statuses = (0..groups.len())
        .map(|index| {
            ctx.accounts.router_state.connector_status(
                index,
                claimables[index],
                now,
                caller_min_interval,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    RouterState::ensure_poke_actionable(&statuses, claim_rewards)?;

    // Phase 3: execute in list order. Redeem/claim first (freeing and
    // harvesting), distribute the performance fee, then stake any excess:
    // this order never needs more reserve than the router holds
    let mut connectors_poked = 0u8;
    for (index, connector) in groups.iter().enumerate() {
        let status = statuses[index];
        let claiming = claim_rewards && status.claim_available;
        if status.action == ConnectorAction::NoAction && !claiming {
            continue;
        }
        connectors_poked += 1;

        let call_hooks = ctx.accounts.router_state.connectors[index].call_hooks_around_poke;
        if call_hooks {
            cpi_poke_hook(connector, CONNECTOR_IX_BEFORE_POKE)?;
        }

        if let ConnectorAction::NeedsRedeem(amount) = status.action {
            cpi_redeem(
                connector,
                &ctx.accounts.reserve_account.to_account_info(),
                &ctx.accounts.token_program.to_account_info(),
                amount,
            )?;
            ctx.accounts.router_state.apply_redeem(index, amount, now);
            emit!(crate::events::RedeemFromConnectorEvent {
                router_state: ctx.accounts.router_state.key(),
                connector_state: connector.state.key(),
                amount,
                forced: status.force_rebalance,
            });
        }

        if claiming {
            let claimed = cpi_claim_rewards(
                connector,
                &ctx.accounts.reserve_account.to_account_info(),
                &ctx.accounts.token_program.to_account_info(),
            )?;
            if claimed > 0 {
                let fee = ctx.accounts.router_state.apply_claim(index, claimed, now);
                if fee > 0 {
                    // the fee never touches the tracked reserve: straight out
                    anchor_spl::token::transfer(
                        CpiContext::new_with_signer(
                            ctx.accounts.token_program.to_account_info(),
                            Transfer {
                                from: ctx.accounts.reserve_account.to_account_info(),
                                to: ctx.accounts.fee_receiver_account.to_account_info(),
                                authority: ctx.accounts.reserve_authority.to_account_info(),
                            },
                            &[&[
                                &ctx.accounts.router_state.key().to_bytes(),
                                RESERVE_AUTH_SEED,
                                &[ctx.bumps.reserve_authority],
                            ]],
                        ),
                        fee,
                    )?;
                }
                emit!(crate::events::ClaimRewardsEvent {
                    router_state: ctx.accounts.router_state.key(),
                    connector_state: connector.state.key(),
                    claimed,
                    performance_fee: fee,
                    locked_profit_added: claimed - fee,
                });
            }
        }

        if let ConnectorAction::NeedsStake(wanted) = status.action {
            let entry = &ctx.accounts.router_state.connectors[index];
            let stake_params = StakeParams::unpack_or_default(&entry.stake_params)
                .ok_or(error!(ErrorCode::MalformedPackedParams))?;
            let amount =
                crate::state::clamp_stake_amount(&stake_params, entry.last_read_underlying, wanted)
                    .min(ctx.accounts.router_state.reserve_amount);
            if amount > 0 {
                transfer_to_connector(
                    &ctx.accounts.router_state.key(),
                    &ctx.accounts.reserve_account.to_account_info(),
                    &ctx.accounts.reserve_authority.to_account_info(),
                    ctx.bumps.reserve_authority,
                    &ctx.accounts.token_program.to_account_info(),
                    connector,
                    amount,
                )?;
                ctx.accounts.router_state.apply_stake(index, amount, now);
                emit!(crate::events::StakeToConnectorEvent {
                    router_state: ctx.accounts.router_state.key(),
                    connector_state: connector.state.key(),
                    amount,
                    forced: status.force_rebalance,
                });
            }
        }

        if call_hooks {
            cpi_poke_hook(connector, CONNECTOR_IX_AFTER_POKE)?;
        }
    }

    // conservation guard: the tracked reserve never exceeds the physical balance
    ctx.accounts.reserve_account.reload()?;
    require_gte!(
        ctx.accounts.reserve_account.amount,
        ctx.accounts.router_state.reserve_amount,
        ErrorCode::ReserveAccountingMismatch
    );

    let event = crate::events::PokeEvent {
        router_state: ctx.accounts.router_state.key(),
        caller: ctx.accounts.caller.key(),
        caller_class: caller_class as u8,
        claim_rewards,
        connectors_poked,
        reserve_amount: ctx.accounts.router_state.reserve_amount,
        total_staked_amount: ctx.accounts.router_state.total_staked_amount,
        compensation_opts,
    };
    emit!(event);
    msg!("{:?}", event);
    Ok(())
}
