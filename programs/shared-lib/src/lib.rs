use borsh::{BorshDeserialize, BorshSerialize};

pub const TWO_POW_32: u64 = 0x1_0000_0000; // 32-bit price precision, to store an assets/share price in u64

pub const BASIS_POINTS_100_PERCENT: u16 = 10_000;

/// seed used by connector programs to derive their authority PDA:
/// connector_program + connector_state + CONNECTOR_AUTH_SEED => connector-auth-PDA
/// associated-token-program + underlying_mint + connector-auth-PDA => connector deposit ATA
pub const CONNECTOR_AUTH_SEED: &[u8] = b"connector-auth";

pub fn mul_div(amount: u64, numerator: u64, denominator: u64) -> u64 {
    u64::try_from((amount as u128) * (numerator as u128) / (denominator as u128)).unwrap()
}

// apply basis points to an amount
pub fn apply_bp(amount: u64, bp: u16) -> u64 {
    mul_div(amount, bp as u64, BASIS_POINTS_100_PERCENT as u64)
}

/// convert an underlying amount into a wrapper amount,
/// considering wrapper current price = available-underlying-total / wrapper-supply
/// wrapper_amount = underlying / ( available-underlying-total / wrapper-supply )
/// wrapper_amount = underlying * wrapper-supply / available-underlying-total
/// if you deposit underlying and mint wrapper_amount, the wrapper price does not change
///
/// the denominator is the ROUTER's view of total underlying (reserve + staked
/// - locked profit), never the raw token balance, so external manipulation of
/// the raw balance cannot dilute or enrich depositors
pub fn underlying_to_wrapper_amount(
    underlying_amount: u64,
    wrapper_supply: u64,
    available_underlying_total: u64,
) -> u64 {
    if wrapper_supply == 0 || available_underlying_total == 0 {
        underlying_amount
    } else {
        mul_div(underlying_amount, wrapper_supply, available_underlying_total)
    }
}

/// convert a wrapper amount into an underlying amount,
/// considering wrapper current price = available-underlying-total / wrapper-supply
/// if you remove underlying from the total and burn wrapper_amount, the wrapper price does not change
pub fn wrapper_amount_to_underlying(
    wrapper_amount: u64,
    wrapper_supply: u64,
    available_underlying_total: u64,
) -> u64 {
    mul_div(wrapper_amount, available_underlying_total, wrapper_supply)
}

/// linear unlock of a harvested profit counter:
/// the full `locked_profit` recorded at harvest decays to zero over
/// `unlock_period` seconds, ending at `unlock_period_end`
pub fn current_locked_profit(
    locked_profit: u64,
    unlock_period_end: u64,
    unlock_period: u64,
    now: u64,
) -> u64 {
    if now >= unlock_period_end || unlock_period == 0 {
        0
    } else {
        let remaining_seconds = unlock_period_end - now;
        // a shortened window can not report more locked than what was recorded
        mul_div(locked_profit, remaining_seconds.min(unlock_period), unlock_period)
    }
}

// ---------------------------------------------------------
// packed connector parameters
// the router core stores these as opaque Vec<u8> blobs;
// only these codecs (used at the router edges and by the
// connector programs) know the layout
// ---------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct StakeParams {
    /// hard cap on the total underlying deployed to the connector, 0 = no cap
    pub max_stake_total: u64,
    /// stakes below this amount are skipped (not worth the movement)
    pub min_stake_amount: u64,
}

#[derive(Clone, Debug, Default, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct ClaimParams {
    /// harvests below this amount are not worth the claim's fixed cost
    pub min_claim_amount: u64,
    /// minimum seconds between two harvests
    pub min_claim_interval_seconds: u64,
}

#[derive(Clone, Debug, Default, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct EmergencyParams {
    /// assets/share price below which the connector is considered unsafe
    pub trigger_price_p32: u64,
    /// absolute floor: even the emergency path refuses to execute below this price
    pub floor_price_p32: u64,
    /// underlying amount the emergency path pulls out
    pub redeem_amount: u64,
}

macro_rules! packed_codec {
    ($t:ty) => {
        impl $t {
            pub fn pack(&self) -> Vec<u8> {
                self.try_to_vec().unwrap()
            }
            pub fn unpack(bytes: &[u8]) -> Option<Self> {
                Self::try_from_slice(bytes).ok()
            }
            /// an empty blob means "defaults" (no thresholds configured)
            pub fn unpack_or_default(bytes: &[u8]) -> Option<Self> {
                if bytes.is_empty() {
                    Some(Self::default())
                } else {
                    Self::unpack(bytes)
                }
            }
        }
    };
}
packed_codec!(StakeParams);
packed_codec!(ClaimParams);
packed_codec!(EmergencyParams);

/// pure decision: is a harvest currently worthwhile?
/// side-effect-free so the poke loop can evaluate it speculatively
pub fn is_claim_available(
    params: &ClaimParams,
    last_claim_ts: u64,
    now: u64,
    claimable_rewards: u64,
) -> bool {
    claimable_rewards > 0
        && claimable_rewards >= params.min_claim_amount
        && now.saturating_sub(last_claim_ts) >= params.min_claim_interval_seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u64 = 1_000_000_000;

    #[test]
    fn mul_div_promotes_to_u128() {
        // would overflow u64 if computed without promotion
        assert_eq!(mul_div(u64::MAX / 2, 2, 2), u64::MAX / 2);
        assert_eq!(mul_div(10_000 * ONE, ONE, 2 * ONE), 5_000 * ONE);
    }

    #[test]
    fn wrapper_mint_is_ratio_aware() {
        // balanced wrapper: 1:1
        assert_eq!(underlying_to_wrapper_amount(42 * ONE, 1000 * ONE, 1000 * ONE), 42 * ONE);
        // negatively imbalanced (1200 supply backed by 1000): deposit 100 mints 120
        assert_eq!(underlying_to_wrapper_amount(100 * ONE, 1200 * ONE, 1000 * ONE), 120 * ONE);
        // positively imbalanced (1000 supply backed by 1600): deposit 100 mints 62.5
        assert_eq!(
            underlying_to_wrapper_amount(100 * ONE, 1000 * ONE, 1600 * ONE),
            62 * ONE + ONE / 2
        );
    }

    #[test]
    fn first_deposit_mints_one_to_one() {
        assert_eq!(underlying_to_wrapper_amount(7 * ONE, 0, 0), 7 * ONE);
        // fully-slashed wrapper (supply outstanding, nothing backing it) restarts 1:1
        assert_eq!(underlying_to_wrapper_amount(7 * ONE, 500 * ONE, 0), 7 * ONE);
    }

    #[test]
    fn wrapper_burn_inverts_mint() {
        // burning the wrapper minted for a deposit returns the deposit
        let minted = underlying_to_wrapper_amount(100 * ONE, 1200 * ONE, 1000 * ONE);
        assert_eq!(
            wrapper_amount_to_underlying(minted, 1200 * ONE + minted, 1000 * ONE + 100 * ONE),
            100 * ONE
        );
    }

    #[test]
    fn locked_profit_decays_linearly_to_zero() {
        let period = 6 * 60 * 60;
        let end = 1_000_000 + period;
        // fully locked right after the harvest
        assert_eq!(current_locked_profit(600, end, period, 1_000_000), 600);
        // half way
        assert_eq!(current_locked_profit(600, end, period, 1_000_000 + period / 2), 300);
        // exactly at the end of the window: fully unlocked
        assert_eq!(current_locked_profit(600, end, period, end), 0);
        assert_eq!(current_locked_profit(600, end, period, end + 1), 0);
    }

    #[test]
    fn packed_params_round_trip_through_opaque_blobs() {
        let p = ClaimParams { min_claim_amount: 5 * ONE, min_claim_interval_seconds: 3600 };
        assert_eq!(ClaimParams::unpack(&p.pack()), Some(p.clone()));
        // empty blob means defaults, garbage is rejected
        assert_eq!(ClaimParams::unpack_or_default(&[]), Some(ClaimParams::default()));
        assert_eq!(ClaimParams::unpack(&[1, 2, 3]), None);
    }

    #[test]
    fn claim_availability_thresholds() {
        let p = ClaimParams { min_claim_amount: 10, min_claim_interval_seconds: 100 };
        // nothing claimable: never available
        assert!(!is_claim_available(&p, 0, 1_000, 0));
        // below the minimum amount
        assert!(!is_claim_available(&p, 0, 1_000, 9));
        // interval not elapsed
        assert!(!is_claim_available(&p, 950, 1_000, 50));
        // both thresholds met
        assert!(is_claim_available(&p, 900, 1_000, 50));
        // defaults: any nonzero claimable is available
        assert!(is_claim_available(&ClaimParams::default(), 999, 1_000, 1));
    }
}
