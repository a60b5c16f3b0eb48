use crate::state::external::common_connector_state;
use crate::util::now_ts;
use crate::{error::ErrorCode, RouterState};
use anchor_lang::prelude::*;

#[derive(Accounts)]
/// permissionless
/// check how much underlying the connector reports now
/// if more than before => yield, withheld from pricing while it unlocks
pub struct SyncConnector<'info> {
    #[account(mut)]
    pub router_state: Account<'info, RouterState>,

    /// must be the one listed at the given registry index
    /// CHECK: external acc manually deserialized
    #[account()]
    pub connector_state: UncheckedAccount<'info>,
}

pub fn handle_sync_connector(ctx: Context<SyncConnector>, index: u8) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;

    let entry = ctx.accounts.router_state.connector_entry(index as usize)?;
    require_keys_eq!(
        ctx.accounts.connector_state.key(),
        entry.connector_state,
        ErrorCode::WrongConnectorAccount
    );
    require_keys_eq!(
        *ctx.accounts.connector_state.owner,
        entry.connector_program,
        ErrorCode::WrongConnectorAccount
    );

    let report = common_connector_state::deserialize(&ctx.accounts.connector_state)?;
    let old_underlying = entry.last_read_underlying;

    let now = now_ts();
    let (profit, slashing) = ctx.accounts.router_state.recognize_connector_report(
        index as usize,
        report.connector_total_underlying,
        now,
    );

    emit!(crate::events::ConnectorReportEvent {
        router_state: ctx.accounts.router_state.key(),
        connector_state: ctx.accounts.connector_state.key(),
        old_underlying,
        new_underlying: report.connector_total_underlying,
        profit,
        slashing,
    });

    Ok(())
}
