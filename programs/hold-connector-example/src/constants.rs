use anchor_lang::prelude::*;

#[constant]
pub const ONE_ASSET_PER_SHARE_P32: u64 = shared_lib::TWO_POW_32; // held tokens never re-price
