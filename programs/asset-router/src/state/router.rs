use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey::Pubkey;
use shared_lib::{
    apply_bp, current_locked_profit, is_claim_available, underlying_to_wrapper_amount,
    wrapper_amount_to_underlying, ClaimParams, EmergencyParams, BASIS_POINTS_100_PERCENT,
};

use crate::constants::*;
use crate::error::ErrorCode;

#[account]
#[derive(InitSpace)]
pub struct RouterState {
    pub admin: Pubkey,

    pub underlying_mint: Pubkey,
    pub wrapper_mint: Pubkey,

    /// underlying-token account receiving performance fees
    pub fee_receiver: Pubkey,
    /// fixed lamports side-payment per deposit/withdraw, 0 disables.
    /// accumulates on the router-state account, collected by the admin
    pub deposit_fee_lamports: u64,
    /// callers exempt from the side-payment fee
    #[max_len(MAX_FEE_WAIVED)]
    pub fee_waived: Vec<Pubkey>,

    /// fraction of every harvest routed to fee_receiver instead of being reinvested
    pub performance_fee_bp: u16,

    //--- reserve config
    /// desired reserve / total fraction
    pub target_reserve_ratio_bp: u16,
    /// force-rebalance trigger thresholds, lower <= target <= upper
    pub lower_bound_bp: u16,
    pub upper_bound_bp: u16,
    /// reporter pokes must be at least this far apart (per connector)
    pub min_rebalance_interval: u64,
    /// staleness beyond this forces a rebalance regardless of the ratio;
    /// also the slasher poke threshold
    pub max_rebalance_interval: u64,

    //--- tracked mirrors
    /// underlying physically held by the reserve token account
    /// invariant: equals the reserve token account balance between instructions
    pub reserve_amount: u64,
    /// underlying deployed to connectors
    /// invariant: equals the sum of connectors[..].last_read_underlying
    pub total_staked_amount: u64,

    /// ordered connector registry; shares sum to 100% when non-empty.
    /// index-stable within one instruction, index reuse permitted across admin updates
    #[max_len(MAX_CONNECTORS)]
    pub connectors: Vec<ConnectorEntry>,

    /// successor manager once migrated; default() means active
    pub migrated_to: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, InitSpace)]
pub struct ConnectorEntry {
    /// program implementing the connector interface
    pub connector_program: Pubkey,
    /// CommonConnectorState account owned by connector_program
    pub connector_state: Pubkey,
    /// this connector's fraction of all staked funds
    pub share_bp: u16,
    /// CPI the connector's before_poke/after_poke hooks around its operations
    pub call_hooks_around_poke: bool,

    //--- packed params, opaque to the router core
    #[max_len(MAX_PACKED_PARAMS_LEN)]
    pub stake_params: Vec<u8>,
    #[max_len(MAX_PACKED_PARAMS_LEN)]
    pub claim_params: Vec<u8>,
    #[max_len(MAX_PACKED_PARAMS_LEN)]
    pub emergency_params: Vec<u8>,

    //--- packed stake/claim result
    pub last_stake_or_redeem_ts: u64,
    pub last_claim_ts: u64,
    /// last recognized underlying-equivalent held by the connector.
    /// incremented when staking, reduced when redeeming,
    /// moved toward the connector's fresh report on every sync
    pub last_read_underlying: u64,
    /// harvested-but-still-amortizing profit, withheld from pricing
    pub locked_profit: u64,
    pub locked_profit_unlock_end: u64,
}

/// what one connector needs this poke, computed fresh every time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectorAction {
    NoAction,
    NeedsStake(u64),
    NeedsRedeem(u64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorStatus {
    pub action: ConnectorAction,
    pub force_rebalance: bool,
    /// an out-of-range connector whose min interval has not elapsed;
    /// suppressed this poke, reported as IntervalNotReached if nothing else runs
    pub interval_blocked: bool,
    pub claim_available: bool,
}

impl RouterState {
    pub fn check_not_migrated(&self) -> Result<()> {
        require_keys_eq!(self.migrated_to, Pubkey::default(), ErrorCode::RouterMigrated);
        Ok(())
    }

    pub fn is_fee_waived(&self, caller: &Pubkey) -> bool {
        self.fee_waived.contains(caller)
    }

    pub fn underlying_total(&self) -> u64 {
        self.reserve_amount + self.total_staked_amount
    }

    pub fn locked_profit_now(&self, now: u64) -> u64 {
        self.connectors
            .iter()
            .map(|c| {
                current_locked_profit(
                    c.locked_profit,
                    c.locked_profit_unlock_end,
                    LOCKED_PROFIT_UNLOCK_SECONDS,
                    now,
                )
            })
            .sum()
    }

    /// the router's view of spendable total: raw total minus still-locked profit.
    /// ALL wrapper pricing and ALL rebalance targets use this, never the raw total
    pub fn available_underlying_total(&self, now: u64) -> u64 {
        self.underlying_total() - self.locked_profit_now(now)
    }

    pub fn wrapper_amount_for_deposit(&self, amount: u64, wrapper_supply: u64, now: u64) -> u64 {
        underlying_to_wrapper_amount(amount, wrapper_supply, self.available_underlying_total(now))
    }

    pub fn underlying_for_wrapper(&self, wrapper_amount: u64, wrapper_supply: u64, now: u64) -> u64 {
        wrapper_amount_to_underlying(
            wrapper_amount,
            wrapper_supply,
            self.available_underlying_total(now),
        )
    }

    pub fn connector_entry(&self, index: usize) -> Result<&ConnectorEntry> {
        self.connectors.get(index).ok_or(error!(ErrorCode::InvalidConnectorIndex))
    }

    /// per-connector poke decision, pure: reads state, mutates nothing.
    /// call after recognize_connector_report so last_read_underlying is fresh
    pub fn connector_status(
        &self,
        index: usize,
        claimable_rewards: u64,
        now: u64,
        caller_min_interval: u64,
    ) -> Result<ConnectorStatus> {
        let entry = self.connector_entry(index)?;
        let claim_params = ClaimParams::unpack_or_default(&entry.claim_params)
            .ok_or(error!(ErrorCode::MalformedPackedParams))?;
        let claim_available =
            is_claim_available(&claim_params, entry.last_claim_ts, now, claimable_rewards);

        let available = self.available_underlying_total(now);
        let deployable = apply_bp(
            available,
            BASIS_POINTS_100_PERCENT - self.target_reserve_ratio_bp,
        );
        let target_staked = apply_bp(deployable, entry.share_bp);
        let current_staked = entry.last_read_underlying;

        let elapsed = now.saturating_sub(entry.last_stake_or_redeem_ts);
        let force_rebalance = elapsed >= self.max_rebalance_interval;

        // out-of-bounds checks: staking when the reserve is in excess
        // (staked below the upper-bound floor), redeeming on a reserve shortfall
        let stake_floor = apply_bp(
            apply_bp(available, BASIS_POINTS_100_PERCENT - self.upper_bound_bp),
            entry.share_bp,
        );
        let redeem_ceiling = apply_bp(
            apply_bp(available, BASIS_POINTS_100_PERCENT - self.lower_bound_bp),
            entry.share_bp,
        );

        let mut action = if current_staked < stake_floor || (force_rebalance && current_staked < target_staked)
        {
            ConnectorAction::NeedsStake(target_staked - current_staked)
        } else if current_staked > redeem_ceiling || (force_rebalance && current_staked > target_staked)
        {
            ConnectorAction::NeedsRedeem(current_staked - target_staked)
        } else {
            ConnectorAction::NoAction
        };

        // dust diffs are not worth a movement; keeps the poke idempotent
        match action {
            ConnectorAction::NeedsStake(d) | ConnectorAction::NeedsRedeem(d)
                if d < MIN_MOVEMENT_UNITS =>
            {
                action = ConnectorAction::NoAction
            }
            _ => {}
        }

        // interval gating: an out-of-range connector acts only once the caller's
        // threshold elapsed, unless staleness forces it
        let mut interval_blocked = false;
        if action != ConnectorAction::NoAction && !force_rebalance && elapsed < caller_min_interval {
            action = ConnectorAction::NoAction;
            interval_blocked = true;
        }

        Ok(ConnectorStatus { action, force_rebalance, interval_blocked, claim_available })
    }

    /// the poke-level verdict over all per-connector statuses.
    /// both failures are deliberate: keepers must be able to tell
    /// "too early" from "already settled" without spending a rebalance
    pub fn ensure_poke_actionable(
        statuses: &[ConnectorStatus],
        claim_requested: bool,
    ) -> Result<()> {
        let any_action = statuses.iter().any(|s| s.action != ConnectorAction::NoAction);
        let any_claim = claim_requested && statuses.iter().any(|s| s.claim_available);
        if any_action || any_claim {
            return Ok(());
        }
        if statuses.iter().any(|s| s.interval_blocked) {
            return err!(ErrorCode::IntervalNotReached);
        }
        err!(ErrorCode::NothingToDo)
    }

    // ---------------------------------------------------------
    // accounting mutators: every token movement in an instruction
    // goes through exactly one of these, keeping the tracked
    // mirrors true to the on-chain balances
    // ---------------------------------------------------------

    pub fn note_deposit(&mut self, amount: u64) {
        self.reserve_amount += amount;
    }

    pub fn note_withdraw(&mut self, amount: u64) {
        self.reserve_amount -= amount;
    }

    pub fn apply_stake(&mut self, index: usize, amount: u64, now: u64) {
        self.reserve_amount -= amount;
        self.total_staked_amount += amount;
        let entry = &mut self.connectors[index];
        entry.last_read_underlying += amount;
        entry.last_stake_or_redeem_ts = now;
    }

    pub fn apply_redeem(&mut self, index: usize, amount: u64, now: u64) {
        self.reserve_amount += amount;
        self.total_staked_amount -= amount;
        let entry = &mut self.connectors[index];
        entry.last_read_underlying -= amount;
        entry.last_stake_or_redeem_ts = now;
    }

    /// fold a fresh connector report into the recognized totals.
    /// profit is withheld from pricing until it amortizes; a loss consumes
    /// locked profit first so pricing never over-reports
    pub fn recognize_connector_report(
        &mut self,
        index: usize,
        reported_underlying: u64,
        now: u64,
    ) -> (u64, u64) {
        let entry = &mut self.connectors[index];
        let last_read = entry.last_read_underlying;
        let (profit, slashing) = if reported_underlying >= last_read {
            (reported_underlying - last_read, 0)
        } else {
            (0, last_read - reported_underlying)
        };
        if profit == 0 && slashing == 0 {
            return (0, 0);
        }
        let still_locked = current_locked_profit(
            entry.locked_profit,
            entry.locked_profit_unlock_end,
            LOCKED_PROFIT_UNLOCK_SECONDS,
            now,
        );
        entry.last_read_underlying = reported_underlying;
        if profit > 0 {
            entry.locked_profit = still_locked + profit;
            entry.locked_profit_unlock_end = now + LOCKED_PROFIT_UNLOCK_SECONDS;
        } else {
            entry.locked_profit = still_locked.saturating_sub(slashing);
        }
        self.total_staked_amount = self.total_staked_amount + profit - slashing;
        (profit, slashing)
    }

    /// split a harvested amount into performance fee + locked reinvested profit.
    /// returns the fee; the caller transfers it to fee_receiver.
    /// invariant: fee == claimed * performance_fee_bp / 10_000 exactly
    pub fn apply_claim(&mut self, index: usize, claimed: u64, now: u64) -> u64 {
        let fee = apply_bp(claimed, self.performance_fee_bp);
        let reinvested = claimed - fee;
        self.reserve_amount += reinvested;
        let entry = &mut self.connectors[index];
        let still_locked = current_locked_profit(
            entry.locked_profit,
            entry.locked_profit_unlock_end,
            LOCKED_PROFIT_UNLOCK_SECONDS,
            now,
        );
        entry.locked_profit = still_locked + reinvested;
        entry.locked_profit_unlock_end = now + LOCKED_PROFIT_UNLOCK_SECONDS;
        entry.last_claim_ts = now;
        fee
    }
}

/// emergency gate: the connector must be unsafe (price under the trigger)
/// yet still above the absolute floor the emergency params accept
pub fn check_emergency(params: &EmergencyParams, assets_per_share_p32: u64) -> Result<()> {
    require_gt!(params.trigger_price_p32, assets_per_share_p32, ErrorCode::NotEmergency);
    require_gte!(assets_per_share_p32, params.floor_price_p32, ErrorCode::AssetsPerShareTooLow);
    Ok(())
}

/// execution-side clamp for a stake the decision algorithm asked for:
/// respects the connector's packed cap and minimum without re-deciding
pub fn clamp_stake_amount(
    params: &shared_lib::StakeParams,
    current_staked: u64,
    wanted: u64,
) -> u64 {
    let capped = if params.max_stake_total > 0 {
        wanted.min(params.max_stake_total.saturating_sub(current_staked))
    } else {
        wanted
    };
    if capped < params.min_stake_amount {
        0
    } else {
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_lib::StakeParams;

    const ONE: u64 = 1_000_000_000;
    const HOUR: u64 = 60 * 60;
    const NOW: u64 = 1_700_000_000;

    fn entry(share_bp: u16) -> ConnectorEntry {
        ConnectorEntry {
            connector_program: Pubkey::new_unique(),
            connector_state: Pubkey::new_unique(),
            share_bp,
            last_stake_or_redeem_ts: NOW,
            ..Default::default()
        }
    }

    /// 20% target reserve, 2%..30% bounds, 1h min / 2h max intervals
    fn router(reserve: u64, entries: Vec<ConnectorEntry>) -> RouterState {
        let total_staked_amount = entries.iter().map(|e| e.last_read_underlying).sum();
        RouterState {
            admin: Pubkey::new_unique(),
            underlying_mint: Pubkey::new_unique(),
            wrapper_mint: Pubkey::new_unique(),
            fee_receiver: Pubkey::new_unique(),
            deposit_fee_lamports: 0,
            fee_waived: vec![],
            performance_fee_bp: 1_000, // 10%
            target_reserve_ratio_bp: 2_000,
            lower_bound_bp: 200,
            upper_bound_bp: 3_000,
            min_rebalance_interval: HOUR,
            max_rebalance_interval: 2 * HOUR,
            reserve_amount: reserve,
            total_staked_amount,
            connectors: entries,
            migrated_to: Pubkey::default(),
        }
    }

    fn statuses(r: &RouterState, now: u64, min_interval: u64) -> Vec<ConnectorStatus> {
        (0..r.connectors.len()).map(|i| r.connector_status(i, 0, now, min_interval).unwrap()).collect()
    }

    #[test]
    fn fresh_deposit_needs_staking() {
        // 10_000 all in reserve, single 100% connector: target staked = 8_000
        let r = router(10_000 * ONE, vec![entry(10_000)]);
        let s = r.connector_status(0, 0, NOW + HOUR + 1, HOUR).unwrap();
        assert_eq!(s.action, ConnectorAction::NeedsStake(8_000 * ONE));
        assert!(!s.force_rebalance);
    }

    #[test]
    fn poke_is_idempotent_after_rebalancing() {
        let mut r = router(10_000 * ONE, vec![entry(10_000)]);
        let now = NOW + HOUR + 1;
        match r.connector_status(0, 0, now, HOUR).unwrap().action {
            ConnectorAction::NeedsStake(d) => r.apply_stake(0, d, now),
            other => panic!("expected stake, got {:?}", other),
        }
        assert_eq!(r.reserve_amount, 2_000 * ONE);
        assert_eq!(r.total_staked_amount, 8_000 * ONE);
        // immediately after: in range, nothing executable, deliberate failure
        let st = statuses(&r, now, 0);
        assert_eq!(st[0].action, ConnectorAction::NoAction);
        assert_eq!(
            RouterState::ensure_poke_actionable(&st, false),
            err!(ErrorCode::NothingToDo)
        );
    }

    #[test]
    fn withdrawal_shortfall_needs_redeeming() {
        // 8_000 staked of 10_000 total; withdrawing 2_000 leaves reserve 0 of 8_000 total:
        // reserve ratio 0% < 2% lower bound => redeem down to the 20% target
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE;
        let mut r = router(2_000 * ONE, vec![e]);
        r.note_withdraw(2_000 * ONE);
        let s = r.connector_status(0, 0, NOW + HOUR + 1, HOUR).unwrap();
        // target staked = 8_000 * 0.8 = 6_400, so 1_600 comes back
        assert_eq!(s.action, ConnectorAction::NeedsRedeem(1_600 * ONE));
    }

    #[test]
    fn in_range_drift_waits_for_min_interval() {
        // slight excess reserve, out of the upper bound, but min interval not elapsed
        let mut e = entry(10_000);
        e.last_read_underlying = 5_000 * ONE;
        let r = router(5_000 * ONE, vec![e]);
        let s = r.connector_status(0, 0, NOW + 60, HOUR).unwrap();
        assert_eq!(s.action, ConnectorAction::NoAction);
        assert!(s.interval_blocked);
        assert_eq!(
            RouterState::ensure_poke_actionable(&[s], false),
            err!(ErrorCode::IntervalNotReached)
        );
        // same instant, slasher threshold (2h) also not reached
        let s = r.connector_status(0, 0, NOW + 60, 2 * HOUR).unwrap();
        assert!(s.interval_blocked);
        // once min elapsed the same drift acts
        let s = r.connector_status(0, 0, NOW + HOUR, HOUR).unwrap();
        assert_eq!(s.action, ConnectorAction::NeedsStake(3_000 * ONE));
    }

    #[test]
    fn staleness_forces_rebalance_within_bounds() {
        // ratio within bounds (25% reserve), so no bound trigger...
        let mut e = entry(10_000);
        e.last_read_underlying = 7_500 * ONE;
        let r = router(2_500 * ONE, vec![e]);
        let s = r.connector_status(0, 0, NOW + HOUR + 1, HOUR).unwrap();
        assert_eq!(s.action, ConnectorAction::NoAction);
        // ...but past max_rebalance_interval staleness alone acts, to the exact target
        let s = r.connector_status(0, 0, NOW + 2 * HOUR, HOUR).unwrap();
        assert!(s.force_rebalance);
        assert_eq!(s.action, ConnectorAction::NeedsStake(500 * ONE));
    }

    #[test]
    fn dust_diffs_never_act() {
        // one unit under target: not worth a movement, poke stays idempotent
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE - 1;
        let r = router(2_000 * ONE + 1, vec![e]);
        let s = r.connector_status(0, 0, NOW + 3 * HOUR, HOUR).unwrap();
        assert!(s.force_rebalance);
        assert_eq!(s.action, ConnectorAction::NoAction);
    }

    #[test]
    fn shares_split_the_deployable_total() {
        let r = router(10_000 * ONE, vec![entry(7_500), entry(2_500)]);
        let st = statuses(&r, NOW + HOUR + 1, HOUR);
        assert_eq!(st[0].action, ConnectorAction::NeedsStake(6_000 * ONE));
        assert_eq!(st[1].action, ConnectorAction::NeedsStake(2_000 * ONE));
    }

    #[test]
    fn recognized_profit_is_locked_then_amortizes() {
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE;
        let mut r = router(2_000 * ONE, vec![e]);
        // connector reports 600 more than recognized
        let (profit, slashing) = r.recognize_connector_report(0, 8_600 * ONE, NOW);
        assert_eq!((profit, slashing), (600 * ONE, 0));
        assert_eq!(r.underlying_total(), 10_600 * ONE);
        // immediately after the harvest the full profit is withheld from pricing
        assert_eq!(r.available_underlying_total(NOW), 10_000 * ONE);
        // half the window: half unlocked
        assert_eq!(
            r.available_underlying_total(NOW + LOCKED_PROFIT_UNLOCK_SECONDS / 2),
            10_300 * ONE
        );
        // window over: available equals the raw total exactly
        assert_eq!(
            r.available_underlying_total(NOW + LOCKED_PROFIT_UNLOCK_SECONDS),
            10_600 * ONE
        );
    }

    #[test]
    fn slashing_consumes_locked_profit_first() {
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE;
        let mut r = router(2_000 * ONE, vec![e]);
        r.recognize_connector_report(0, 8_600 * ONE, NOW);
        // a 400 loss right after a 600 harvest: raw drops, available is unchanged
        let available_before = r.available_underlying_total(NOW);
        let (profit, slashing) = r.recognize_connector_report(0, 8_200 * ONE, NOW);
        assert_eq!((profit, slashing), (0, 400 * ONE));
        assert_eq!(r.underlying_total(), 10_200 * ONE);
        assert_eq!(r.available_underlying_total(NOW), available_before);
        // a loss beyond the locked buffer reduces the available total
        r.recognize_connector_report(0, 7_500 * ONE, NOW);
        assert_eq!(r.available_underlying_total(NOW), 9_500 * ONE);
    }

    #[test]
    fn claim_splits_fee_exactly_and_locks_the_rest() {
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE;
        let mut r = router(2_000 * ONE, vec![e]);
        let claimed = 250 * ONE;
        let fee = r.apply_claim(0, claimed, NOW);
        // exactly performance_fee_bp of the surplus, no rounding leak
        assert_eq!(fee, apply_bp(claimed, r.performance_fee_bp));
        assert_eq!(fee, 25 * ONE);
        assert_eq!(r.reserve_amount, 2_000 * ONE + claimed - fee);
        // the reinvested remainder starts fully locked
        assert_eq!(r.available_underlying_total(NOW), 10_000 * ONE);
        assert_eq!(
            r.available_underlying_total(NOW + LOCKED_PROFIT_UNLOCK_SECONDS),
            10_225 * ONE
        );
        assert_eq!(r.connectors[0].last_claim_ts, NOW);
    }

    #[test]
    fn conservation_across_an_operation_sequence() {
        let mut r = router(0, vec![entry(10_000)]);
        let mut wrapper_supply = 0u64;

        // deposit 10_000
        let minted = r.wrapper_amount_for_deposit(10_000 * ONE, wrapper_supply, NOW);
        r.note_deposit(10_000 * ONE);
        wrapper_supply += minted;
        assert_eq!(minted, 10_000 * ONE);

        // rebalance
        let now = NOW + HOUR + 1;
        match r.connector_status(0, 0, now, HOUR).unwrap().action {
            ConnectorAction::NeedsStake(d) => r.apply_stake(0, d, now),
            other => panic!("unexpected {:?}", other),
        }
        // nothing created or destroyed by moving funds around
        assert_eq!(r.underlying_total(), 10_000 * ONE);

        // harvest 100, 10% fee
        let fee = r.apply_claim(0, 100 * ONE, now);
        assert_eq!(fee, 10 * ONE);
        assert_eq!(r.underlying_total(), 10_000 * ONE + 90 * ONE);

        // after the unlock window, withdraw everything
        let later = now + LOCKED_PROFIT_UNLOCK_SECONDS;
        let returned = r.underlying_for_wrapper(wrapper_supply, wrapper_supply, later);
        assert_eq!(returned, 10_090 * ONE);
    }

    #[test]
    fn round_trip_returns_the_deposit() {
        let mut r = router(5_000 * ONE, vec![entry(10_000)]);
        let mut wrapper_supply = 5_000 * ONE;
        let minted = r.wrapper_amount_for_deposit(777 * ONE, wrapper_supply, NOW);
        r.note_deposit(777 * ONE);
        wrapper_supply += minted;
        let returned = r.underlying_for_wrapper(minted, wrapper_supply, NOW);
        r.note_withdraw(returned);
        assert_eq!(returned, 777 * ONE);
        assert_eq!(r.reserve_amount, 5_000 * ONE);
    }

    #[test]
    fn pricing_uses_available_not_raw_total() {
        // 1_200 wrapper backed by 1_000 available: deposit 100 mints 120
        let mut e = entry(10_000);
        e.last_read_underlying = 1_000 * ONE;
        let r = router(0, vec![e]);
        assert_eq!(r.wrapper_amount_for_deposit(100 * ONE, 1_200 * ONE, NOW), 120 * ONE);

        // same raw total with 200 still locked prices at 800 available
        let mut e = entry(10_000);
        e.last_read_underlying = 800 * ONE;
        let mut r = router(0, vec![e]);
        r.recognize_connector_report(0, 1_000 * ONE, NOW);
        assert_eq!(r.available_underlying_total(NOW), 800 * ONE);
        assert_eq!(r.wrapper_amount_for_deposit(100 * ONE, 1_200 * ONE, NOW), 150 * ONE);
    }

    #[test]
    fn claim_availability_feeds_the_poke_verdict() {
        let mut e = entry(10_000);
        e.last_read_underlying = 8_000 * ONE;
        e.claim_params =
            ClaimParams { min_claim_amount: 5 * ONE, min_claim_interval_seconds: 0 }.pack();
        let r = router(2_000 * ONE, vec![e]);
        // balanced, but a worthwhile claim is pending
        let s = r.connector_status(0, 10 * ONE, NOW + HOUR, HOUR).unwrap();
        assert_eq!(s.action, ConnectorAction::NoAction);
        assert!(s.claim_available);
        assert!(RouterState::ensure_poke_actionable(&[s], true).is_ok());
        // the caller did not request claiming: the poke has nothing to execute
        assert_eq!(
            RouterState::ensure_poke_actionable(&[s], false),
            err!(ErrorCode::NothingToDo)
        );
        // below the connector's min claim amount
        let s = r.connector_status(0, ONE, NOW + HOUR, HOUR).unwrap();
        assert!(!s.claim_available);
    }

    #[test]
    fn malformed_claim_params_surface_as_an_error() {
        let mut e = entry(10_000);
        e.claim_params = vec![1, 2, 3];
        let r = router(ONE, vec![e]);
        assert_eq!(
            r.connector_status(0, 0, NOW, HOUR),
            Err(ErrorCode::MalformedPackedParams.into())
        );
    }

    #[test]
    fn emergency_gate_has_two_failure_modes() {
        let params = EmergencyParams {
            trigger_price_p32: 9 * shared_lib::TWO_POW_32 / 10,
            floor_price_p32: shared_lib::TWO_POW_32 / 2,
            redeem_amount: 100 * ONE,
        };
        // healthy price: not an emergency
        assert_eq!(
            check_emergency(&params, shared_lib::TWO_POW_32),
            Err(ErrorCode::NotEmergency.into())
        );
        // collapsed below the absolute floor: even the emergency path refuses
        assert_eq!(
            check_emergency(&params, shared_lib::TWO_POW_32 / 4),
            Err(ErrorCode::AssetsPerShareTooLow.into())
        );
        // inside the emergency band: executes
        assert!(check_emergency(&params, 8 * shared_lib::TWO_POW_32 / 10).is_ok());
    }

    #[test]
    fn stake_params_cap_is_honored_by_clamping() {
        // the execution-side clamp helper: cap at max_stake_total
        let p = StakeParams { max_stake_total: 6_000 * ONE, min_stake_amount: 0 };
        let clamped = super::clamp_stake_amount(&p, 5_000 * ONE, 2_000 * ONE);
        assert_eq!(clamped, 1_000 * ONE);
        // below min_stake_amount: skip entirely
        let p = StakeParams { max_stake_total: 0, min_stake_amount: 3_000 * ONE };
        assert_eq!(super::clamp_stake_amount(&p, 5_000 * ONE, 2_000 * ONE), 0);
    }
}
