use anchor_lang::prelude::*;

// NOTE: Anchor adds 6000 to user error codes
#[error_code]
pub enum ErrorCode {
    #[msg("deposit amount is zero")]
    ZeroDepositAmount, // 6000 0x1770

    #[msg("withdraw amount is zero")]
    ZeroWithdrawAmount, // 6001 0x1771

    #[msg("deposit amount too small")]
    DepositAmountTooSmall,

    #[msg("deposit fee required")]
    DepositFeeRequired,

    #[msg("no fee for allow-listed caller")]
    FeeNotWaived,

    #[msg("not enough tokens in the reserve")]
    NotEnoughTokensInReserve,

    #[msg("connector shares must sum to 100%")]
    TotalSharesNotWhole,

    #[msg("null connector with nonzero share")]
    ConnectorIsNull,

    #[msg("performance fee over the limit")]
    PerformanceFeeOverLimit,

    #[msg("reserve ratio bounds must satisfy lower <= target <= upper")]
    InvalidReserveBounds,

    #[msg("min rebalance interval above max")]
    InvalidRebalanceIntervals,

    #[msg("invalid connector index")]
    InvalidConnectorIndex,

    #[msg("max connectors reached")]
    MaxConnectorsReached,

    #[msg("fee waive list too long")]
    FeeWaivedListTooLong,

    #[msg("connector still holds recognized funds")]
    ConnectorStillHasFunds,

    #[msg("malformed packed params")]
    MalformedPackedParams,

    #[msg("rebalance interval not reached")]
    IntervalNotReached,

    #[msg("nothing to do")]
    NothingToDo,

    #[msg("insufficient external liquidity")]
    InsufficientExternalLiquidity,

    #[msg("not an emergency: assets/share above the trigger price")]
    NotEmergency,

    #[msg("assets/share below the emergency floor price")]
    AssetsPerShareTooLow,

    #[msg("router was migrated to a new manager")]
    RouterMigrated,

    #[msg("wrong number of connector accounts")]
    WrongConnectorAccountsLen,

    #[msg("connector account does not match the registry entry")]
    WrongConnectorAccount,

    #[msg("error deserializing CommonConnectorState")]
    ErrDeserializingConnectorState,

    #[msg("connector returned no claim amount")]
    MissingConnectorReturnData,

    #[msg("reserve accounting mismatch")]
    ReserveAccountingMismatch,

    #[msg("amount is zero")]
    AmountIsZero,
}
