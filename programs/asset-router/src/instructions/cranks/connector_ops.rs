use crate::state::external::common_connector_state::{self, CommonConnectorState};
use crate::{constants::*, error::ErrorCode, ConnectorEntry, RouterState};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::{get_return_data, invoke, invoke_signed},
};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::Transfer;
use shared_lib::CONNECTOR_AUTH_SEED;

/// one connector's accounts, sliced out of remaining_accounts:
/// [connector_program, connector_state, connector_authority, connector_deposit_account]
pub struct ConnectorAccounts<'c, 'info> {
    pub program: &'c AccountInfo<'info>,
    pub state: &'c AccountInfo<'info>,
    pub authority: &'c AccountInfo<'info>,
    pub deposit_account: &'c AccountInfo<'info>,
}

impl<'c, 'info> ConnectorAccounts<'c, 'info> {
    /// verify one account group against a registry entry:
    /// keys must match the entry, the state account must be owned by the
    /// connector program, the authority must be the connector's auth PDA and
    /// the deposit account its underlying ATA
    pub fn checked(
        entry: &ConnectorEntry,
        underlying_mint: &Pubkey,
        group: &'c [AccountInfo<'info>],
    ) -> Result<Self> {
        let [program, state, authority, deposit_account] = group else {
            return err!(ErrorCode::WrongConnectorAccountsLen);
        };
        require_keys_eq!(program.key(), entry.connector_program, ErrorCode::WrongConnectorAccount);
        require_keys_eq!(state.key(), entry.connector_state, ErrorCode::WrongConnectorAccount);
        require_keys_eq!(*state.owner, entry.connector_program, ErrorCode::WrongConnectorAccount);
        let (expected_authority, _bump) = Pubkey::find_program_address(
            &[CONNECTOR_AUTH_SEED, &state.key().to_bytes()],
            &entry.connector_program,
        );
        require_keys_eq!(authority.key(), expected_authority, ErrorCode::WrongConnectorAccount);
        require_keys_eq!(
            deposit_account.key(),
            get_associated_token_address(&expected_authority, underlying_mint),
            ErrorCode::WrongConnectorAccount
        );
        Ok(Self { program, state, authority, deposit_account })
    }

    /// fresh read of the connector's self-reported position
    pub fn read_state(&self) -> Result<CommonConnectorState> {
        common_connector_state::deserialize(self.state)
    }
}

/// slice remaining_accounts into one verified group per registry entry, in list order
pub fn parse_connector_groups<'c, 'info>(
    router_state: &RouterState,
    remaining_accounts: &'c [AccountInfo<'info>],
) -> Result<Vec<ConnectorAccounts<'c, 'info>>> {
    require_eq!(
        remaining_accounts.len(),
        router_state.connectors.len() * CONNECTOR_GROUP_ACCOUNTS,
        ErrorCode::WrongConnectorAccountsLen
    );
    router_state
        .connectors
        .iter()
        .zip(remaining_accounts.chunks(CONNECTOR_GROUP_ACCOUNTS))
        .map(|(entry, group)| {
            ConnectorAccounts::checked(entry, &router_state.underlying_mint, group)
        })
        .collect()
}

/// stake = plain SPL transfer reserve -> connector deposit ATA;
/// the connector recognizes the inflow on its next update crank
pub fn transfer_to_connector<'info>(
    router_state_key: &Pubkey,
    reserve_account: &AccountInfo<'info>,
    reserve_authority: &AccountInfo<'info>,
    reserve_authority_bump: u8,
    token_program: &AccountInfo<'info>,
    connector: &ConnectorAccounts<'_, 'info>,
    amount: u64,
) -> Result<()> {
    anchor_spl::token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: reserve_account.clone(),
                to: connector.deposit_account.clone(),
                authority: reserve_authority.clone(),
            },
            &[&[
                &router_state_key.to_bytes(),
                RESERVE_AUTH_SEED,
                &[reserve_authority_bump],
            ]],
        ),
        amount,
    )
}

fn connector_instruction(
    connector: &ConnectorAccounts,
    reserve_account: &Pubkey,
    token_program: &Pubkey,
    data: Vec<u8>,
) -> Instruction {
    Instruction {
        program_id: connector.program.key(),
        accounts: vec![
            AccountMeta::new(connector.state.key(), false),
            AccountMeta::new_readonly(connector.authority.key(), false),
            AccountMeta::new(connector.deposit_account.key(), false),
            AccountMeta::new(*reserve_account, false),
            AccountMeta::new_readonly(*token_program, false),
        ],
        data,
    }
}

/// CPI connector.redeem(amount): moves exactly `amount` underlying back to
/// the reserve or fails inside the connector (insufficient external liquidity)
pub fn cpi_redeem<'info>(
    connector: &ConnectorAccounts<'_, 'info>,
    reserve_account: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let mut data = CONNECTOR_IX_REDEEM.to_vec();
    data.extend_from_slice(&amount.to_le_bytes());
    let ix = connector_instruction(connector, &reserve_account.key(), &token_program.key(), data);
    invoke(
        &ix,
        &[
            connector.state.clone(),
            connector.authority.clone(),
            connector.deposit_account.clone(),
            reserve_account.clone(),
            token_program.clone(),
        ],
    )?;
    Ok(())
}

/// CPI connector.claim_rewards(): harvests to the reserve, returns the
/// amount via program return data (zero when nothing was claimable)
pub fn cpi_claim_rewards<'info>(
    connector: &ConnectorAccounts<'_, 'info>,
    reserve_account: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
) -> Result<u64> {
    let ix = connector_instruction(
        connector,
        &reserve_account.key(),
        &token_program.key(),
        CONNECTOR_IX_CLAIM_REWARDS.to_vec(),
    );
    invoke(
        &ix,
        &[
            connector.state.clone(),
            connector.authority.clone(),
            connector.deposit_account.clone(),
            reserve_account.clone(),
            token_program.clone(),
        ],
    )?;
    let (program_id, data) = get_return_data().ok_or(ErrorCode::MissingConnectorReturnData)?;
    require_keys_eq!(program_id, connector.program.key(), ErrorCode::MissingConnectorReturnData);
    let bytes: [u8; 8] =
        data.try_into().map_err(|_| error!(ErrorCode::MissingConnectorReturnData))?;
    Ok(u64::from_le_bytes(bytes))
}

/// CPI one of the connector's poke hooks (before_poke / after_poke)
pub fn cpi_poke_hook<'info>(
    connector: &ConnectorAccounts<'_, 'info>,
    discriminator: [u8; 8],
) -> Result<()> {
    let ix = Instruction {
        program_id: connector.program.key(),
        accounts: vec![AccountMeta::new_readonly(connector.state.key(), false)],
        data: discriminator.to_vec(),
    };
    invoke(&ix, &[connector.state.clone()])?;
    Ok(())
}

/// used by the owner relay: rebuild the caller-supplied metas, letting the
/// reserve authority PDA sign for the custody identity
pub fn invoke_as_reserve_authority<'info>(
    router_state_key: &Pubkey,
    reserve_authority: &Pubkey,
    reserve_authority_bump: u8,
    target_program: &AccountInfo<'info>,
    accounts: &[AccountInfo<'info>],
    data: Vec<u8>,
) -> Result<()> {
    let metas = accounts
        .iter()
        .map(|a| AccountMeta {
            pubkey: a.key(),
            is_signer: a.is_signer || a.key() == *reserve_authority,
            is_writable: a.is_writable,
        })
        .collect();
    let ix = Instruction { program_id: target_program.key(), accounts: metas, data };
    invoke_signed(
        &ix,
        accounts,
        &[&[&router_state_key.to_bytes(), RESERVE_AUTH_SEED, &[reserve_authority_bump]]],
    )?;
    Ok(())
}
