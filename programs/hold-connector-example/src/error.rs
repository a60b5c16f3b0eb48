use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("amount is zero")]
    AmountIsZero,

    #[msg("not enough liquid underlying in the connector")]
    InsufficientConnectorLiquidity,

    #[msg("redeem destination is not the configured reserve account")]
    WrongReserveAccount,
}
