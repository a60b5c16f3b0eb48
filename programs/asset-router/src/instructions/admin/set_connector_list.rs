use crate::{constants::*, error::ErrorCode, ConnectorEntry, RouterState};
use anchor_lang::prelude::*;
use shared_lib::BASIS_POINTS_100_PERCENT;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct ConnectorSetup {
    pub connector_program: Pubkey,
    pub connector_state: Pubkey,
    pub share_bp: u16,
    pub call_hooks_around_poke: bool,
}

/// Note: before listing a connector
/// THE CONNECTOR PROGRAM CODE HAS TO BE VERIFIED
/// it must keep its CommonConnectorState truthful,
/// with full backing and a permissionless redeem path
#[derive(Accounts)]
pub struct SetConnectorList<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}

/// list-level validation, before any state is touched
pub fn check_connector_setups(setups: &[ConnectorSetup]) -> Result<()> {
    require_gte!(
        MAX_CONNECTORS as usize,
        setups.len(),
        ErrorCode::MaxConnectorsReached
    );

    // shares must sum to exactly 100% when any connector is listed
    if !setups.is_empty() {
        let total_share_bp: u64 = setups.iter().map(|s| s.share_bp as u64).sum();
        require_eq!(
            total_share_bp,
            BASIS_POINTS_100_PERCENT as u64,
            ErrorCode::TotalSharesNotWhole
        );
    }
    for setup in setups.iter() {
        if setup.share_bp > 0 {
            require_keys_neq!(setup.connector_state, Pubkey::default(), ErrorCode::ConnectorIsNull);
            require_keys_neq!(
                setup.connector_program,
                Pubkey::default(),
                ErrorCode::ConnectorIsNull
            );
        }
    }
    Ok(())
}

pub fn handle_set_connector_list(
    ctx: Context<SetConnectorList>,
    setups: Vec<ConnectorSetup>,
) -> Result<()> {
    check_connector_setups(&setups)?;

    let state = &mut ctx.accounts.router_state;

    // a connector may only leave the list once its recognized position is zero
    // (redeem it out first, manually or via pokes)
    for old in state.connectors.iter() {
        let kept = setups.iter().any(|s| s.connector_state == old.connector_state);
        if !kept {
            require_eq!(old.last_read_underlying, 0, ErrorCode::ConnectorStillHasFunds);
            require_eq!(old.locked_profit, 0, ErrorCode::ConnectorStillHasFunds);
        }
    }

    // rebuild the ordered list; entries whose connector_state survives keep
    // their packed params and stake/claim result (index reuse is allowed,
    // index stability only matters within a single poke)
    let connectors = setups
        .into_iter()
        .map(|setup| {
            match state.connectors.iter().find(|c| c.connector_state == setup.connector_state) {
                Some(existing) => ConnectorEntry {
                    connector_program: setup.connector_program,
                    share_bp: setup.share_bp,
                    call_hooks_around_poke: setup.call_hooks_around_poke,
                    ..existing.clone()
                },
                None => ConnectorEntry {
                    connector_program: setup.connector_program,
                    connector_state: setup.connector_state,
                    share_bp: setup.share_bp,
                    call_hooks_around_poke: setup.call_hooks_around_poke,
                    ..Default::default()
                },
            }
        })
        .collect::<Vec<_>>();
    state.connectors = connectors;

    emit!(crate::events::SetConnectorListEvent {
        router_state: state.key(),
        connectors: state.connectors.len() as u8,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(share_bp: u16) -> ConnectorSetup {
        ConnectorSetup {
            connector_program: Pubkey::new_unique(),
            connector_state: Pubkey::new_unique(),
            share_bp,
            call_hooks_around_poke: false,
        }
    }

    #[test]
    fn shares_must_sum_to_one_hundred_percent() {
        assert!(check_connector_setups(&[setup(6_000), setup(4_000)]).is_ok());
        assert_eq!(
            check_connector_setups(&[setup(6_000), setup(3_000)]),
            err!(ErrorCode::TotalSharesNotWhole)
        );
        assert_eq!(
            check_connector_setups(&[setup(6_000), setup(5_000)]),
            err!(ErrorCode::TotalSharesNotWhole)
        );
        // an empty list (all connectors removed) is valid
        assert!(check_connector_setups(&[]).is_ok());
    }

    #[test]
    fn null_connector_with_share_is_rejected() {
        let mut null_setup = setup(10_000);
        null_setup.connector_state = Pubkey::default();
        assert_eq!(
            check_connector_setups(&[null_setup]),
            err!(ErrorCode::ConnectorIsNull)
        );
        // a null entry carrying no share is tolerated (being wound down)
        let mut idle = setup(0);
        idle.connector_state = Pubkey::default();
        let full = setup(10_000);
        assert!(check_connector_setups(&[full, idle]).is_ok());
    }

    #[test]
    fn list_is_bounded() {
        let too_many: Vec<ConnectorSetup> =
            (0..=MAX_CONNECTORS).map(|_| setup(10_000 / (MAX_CONNECTORS as u16 + 1))).collect();
        assert_eq!(
            check_connector_setups(&too_many),
            err!(ErrorCode::MaxConnectorsReached)
        );
    }
}
