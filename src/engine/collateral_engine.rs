//! Collateral Engine - the accounting core of the PUSD protocol
//!
//! Handles:
//! - Per-account collateral and debt ledger
//! - Collateral valuation through per-asset price feeds
//! - Health factor checks gating every debt-increasing or
//!   collateral-decreasing operation
//! - Third-party liquidation of undercollateralized positions
//!
//! The engine holds all deposited collateral in a pooled custody balance;
//! the ledger is the sole source of truth for each account's entitlement.
//! Every public operation either applies all of its mutations or reverts
//! with none of them.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::EngineError;
use super::events::*;
use super::feed::PriceFeedContractRef;
use crate::token::{Cep18TokenContractRef, StablecoinTokenContractRef};

/// Common USD base for all valuations (1e18)
pub const USD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Minimum health factor, 1.0 in 1e18 fixed point
pub const MIN_HEALTH_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Denominator for the percent-valued risk parameters
pub const PERCENT: u128 = 100;

/// Maximum accepted price age
pub const MAX_PRICE_AGE: u64 = 3600;

/// Collateral Engine contract
#[odra::module]
pub struct CollateralEngine {
    /// PUSD token address
    synthetic_token: Var<Address>,

    /// Registry: collateral asset -> price feed (immutable after init)
    price_feeds: Mapping<Address, Address>,

    /// Registry: collateral asset -> native unit (10^decimals)
    asset_units: Mapping<Address, U256>,

    /// Registry assets by index, for valuation sweeps
    assets: Mapping<u32, Address>,

    /// Number of registry assets
    asset_count: Var<u32>,

    /// Collateral balances: (account, asset) -> amount
    collateral: Mapping<(Address, Address), U256>,

    /// Minted PUSD debt per account
    debt: Mapping<Address, U256>,

    /// Liquidation threshold percent
    /// Example: 50 means collateral must be worth 200% of debt
    liquidation_threshold: Var<U256>,

    /// Liquidation bonus percent awarded to liquidators
    liquidation_bonus: Var<U256>,

    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl CollateralEngine {
    /// Initialize the engine
    ///
    /// # Arguments
    /// * `synthetic_token` - PUSD token address; ownership of its mint/burn
    ///   gate must be handed to the engine after deployment
    /// * `collateral_assets` - accepted CEP-18 collateral assets
    /// * `price_feeds` - one feed per asset, same order and length
    /// * `liquidation_threshold` - percent in (0, 100]
    /// * `liquidation_bonus` - percent in [0, 100)
    pub fn init(
        &mut self,
        synthetic_token: Address,
        collateral_assets: Vec<Address>,
        price_feeds: Vec<Address>,
        liquidation_threshold: U256,
        liquidation_bonus: U256,
    ) {
        if collateral_assets.len() != price_feeds.len() {
            self.env().revert(EngineError::MismatchedAssetsAndFeeds);
        }
        if liquidation_threshold == U256::zero() || liquidation_threshold > U256::from(PERCENT) {
            self.env().revert(EngineError::InvalidRiskParameters);
        }
        if liquidation_bonus >= U256::from(PERCENT) {
            self.env().revert(EngineError::InvalidRiskParameters);
        }

        self.synthetic_token.set(synthetic_token);
        self.liquidation_threshold.set(liquidation_threshold);
        self.liquidation_bonus.set(liquidation_bonus);
        self.locked.set(false);

        for (i, asset) in collateral_assets.iter().enumerate() {
            if self.price_feeds.get(asset).is_some() {
                self.env().revert(EngineError::DuplicateCollateralAsset);
            }
            self.price_feeds.set(asset, price_feeds[i]);

            let token = Cep18TokenContractRef::new(self.env(), *asset);
            let unit = U256::from(10u64).pow(U256::from(token.decimals()));
            self.asset_units.set(asset, unit);

            self.assets.set(&(i as u32), *asset);
        }
        self.asset_count.set(collateral_assets.len() as u32);
    }

    // ========================================
    // Public Operations
    // ========================================

    /// Deposit collateral into the caller's position
    pub fn deposit_collateral(&mut self, asset: Address, amount: U256) {
        self.lock();
        let caller = self.env().caller();
        self.deposit_internal(caller, asset, amount);
        self.unlock();
    }

    /// Mint PUSD debt against the caller's collateral
    pub fn mint_debt(&mut self, amount: U256) {
        self.lock();
        let caller = self.env().caller();
        self.mint_internal(caller, amount);
        self.unlock();
    }

    /// Deposit collateral and mint PUSD in one operation
    pub fn deposit_and_mint(
        &mut self,
        asset: Address,
        collateral_amount: U256,
        debt_amount: U256,
    ) {
        self.lock();
        let caller = self.env().caller();
        self.deposit_internal(caller, asset, collateral_amount);
        self.mint_internal(caller, debt_amount);
        self.unlock();
    }

    /// Withdraw collateral from the caller's position
    pub fn redeem_collateral(&mut self, asset: Address, amount: U256) {
        self.lock();
        let caller = self.env().caller();
        self.redeem_internal(caller, caller, asset, amount);
        self.assert_solvent(caller);
        self.unlock();
    }

    /// Repay PUSD debt from the caller's own balance
    pub fn burn_debt(&mut self, amount: U256) {
        self.lock();
        let caller = self.env().caller();
        self.burn_internal(caller, caller, amount);
        self.unlock();
    }

    /// Repay PUSD and withdraw collateral in one operation
    pub fn redeem_and_burn(
        &mut self,
        asset: Address,
        redeem_amount: U256,
        burn_amount: U256,
    ) {
        self.lock();
        let caller = self.env().caller();
        self.burn_internal(caller, caller, burn_amount);
        self.redeem_internal(caller, caller, asset, redeem_amount);
        self.assert_solvent(caller);
        self.unlock();
    }

    /// Liquidate an undercollateralized position
    ///
    /// The caller repays `debt_to_cover` of the target's PUSD debt and
    /// receives the equivalent collateral plus the liquidation bonus.
    /// Seizure is limited to the target's holding of `collateral_asset`;
    /// other collateral the target may hold is not touched.
    pub fn liquidate(&mut self, collateral_asset: Address, target: Address, debt_to_cover: U256) {
        self.lock();
        let caller = self.env().caller();

        self.require_positive(debt_to_cover);
        self.assert_asset_allowed(collateral_asset);

        let starting_health = self.health_factor(target);
        if starting_health >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(EngineError::HealthFactorOk);
        }

        let seized = self.asset_amount_from_value(collateral_asset, debt_to_cover);
        let bonus = self.safe_mul(seized, self.liquidation_bonus.get_or_default()) / U256::from(PERCENT);
        let total_seized = seized + bonus;

        self.redeem_internal(target, caller, collateral_asset, total_seized);
        self.burn_internal(target, caller, debt_to_cover);

        let ending_health = self.health_factor(target);
        if ending_health <= starting_health {
            self.env().revert(EngineError::HealthFactorNotImproved);
        }
        self.assert_solvent(caller);

        self.env().emit_event(Liquidated {
            target,
            liquidator: caller,
            collateral_asset,
            debt_covered: debt_to_cover,
            collateral_seized: total_seized,
            timestamp: self.env().get_block_time(),
        });
        self.unlock();
    }

    // ========================================
    // Valuation
    // ========================================

    /// USD value (1e18) of an asset amount
    pub fn asset_value(&self, asset: Address, amount: U256) -> U256 {
        let price = self.price_of(asset);
        let unit = self.unit_of(asset);
        self.safe_mul(amount, price) / unit
    }

    /// Asset amount worth a given USD value (1e18), truncated toward zero
    pub fn asset_amount_from_value(&self, asset: Address, usd_value: U256) -> U256 {
        let price = self.price_of(asset);
        let unit = self.unit_of(asset);
        self.safe_mul(usd_value, unit) / price
    }

    /// Total USD value (1e18) of an account's collateral positions
    pub fn account_collateral_value(&self, account: Address) -> U256 {
        let count = self.asset_count.get_or_default();
        let mut total_value = U256::zero();

        for i in 0..count {
            if let Some(asset) = self.assets.get(&i) {
                let amount = self.collateral.get(&(account, asset)).unwrap_or_default();
                // zero balances never touch the feed
                if amount > U256::zero() {
                    total_value = total_value + self.asset_value(asset, amount);
                }
            }
        }

        total_value
    }

    // ========================================
    // Solvency Guard
    // ========================================

    /// Health factor of an account, 1e18 fixed point
    ///
    /// Health Factor = (Collateral Value * Liquidation Threshold) / Debt
    ///
    /// Returns `U256::MAX` for a zero-debt account.
    pub fn health_factor(&self, account: Address) -> U256 {
        let debt = self.debt_of(account);
        if debt == U256::zero() {
            return U256::MAX;
        }

        let threshold = self.liquidation_threshold.get_or_default();
        let adjusted = self.safe_mul(self.account_collateral_value(account), threshold) / U256::from(PERCENT);

        // saturates instead of overflowing when collateral dwarfs debt
        match adjusted.checked_mul(U256::from(USD_PRECISION)) {
            Some(scaled) => scaled / debt,
            None => U256::MAX,
        }
    }

    fn assert_solvent(&self, account: Address) {
        let health = self.health_factor(account);
        if health < U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(EngineError::HealthFactorBroken);
        }
    }

    // ========================================
    // Queries
    // ========================================

    /// Collateral balance of an account for an asset
    pub fn collateral_of(&self, account: Address, asset: Address) -> U256 {
        self.collateral.get(&(account, asset)).unwrap_or_default()
    }

    /// Outstanding PUSD debt of an account
    pub fn debt_of(&self, account: Address) -> U256 {
        self.debt.get(&account).unwrap_or_default()
    }

    /// Registered collateral assets
    pub fn collateral_assets(&self) -> Vec<Address> {
        let count = self.asset_count.get_or_default();
        let mut assets = Vec::new();
        for i in 0..count {
            if let Some(asset) = self.assets.get(&i) {
                assets.push(asset);
            }
        }
        assets
    }

    /// Price feed backing an asset
    pub fn price_feed_of(&self, asset: Address) -> Address {
        self.feed_of(asset)
    }

    /// PUSD token address
    pub fn synthetic_token(&self) -> Address {
        self.synthetic_token.get_or_revert_with(EngineError::NotInitialized)
    }

    /// Liquidation threshold percent
    pub fn liquidation_threshold(&self) -> U256 {
        self.liquidation_threshold.get_or_default()
    }

    /// Liquidation bonus percent
    pub fn liquidation_bonus(&self) -> U256 {
        self.liquidation_bonus.get_or_default()
    }

    /// Minimum health factor, 1e18 fixed point
    pub fn min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    // ========================================
    // Operation internals
    // ========================================

    fn deposit_internal(&mut self, account: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        self.assert_asset_allowed(asset);

        self.credit_collateral(account, asset, amount);

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer_from(account, Address::from(self.env().self_address()), amount) {
            self.env().revert(EngineError::TransferFailed);
        }
    }

    fn mint_internal(&mut self, account: Address, amount: U256) {
        self.require_positive(amount);

        self.credit_debt(account, amount);
        self.assert_solvent(account);

        let mut token = StablecoinTokenContractRef::new(self.env(), self.synthetic_token());
        if !token.mint(account, amount) {
            self.env().revert(EngineError::MintFailed);
        }
    }

    fn redeem_internal(&mut self, from: Address, to: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        self.assert_asset_allowed(asset);

        self.debit_collateral(from, to, asset, amount);

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer(to, amount) {
            self.env().revert(EngineError::TransferFailed);
        }
    }

    fn burn_internal(&mut self, account: Address, payer: Address, amount: U256) {
        self.require_positive(amount);

        self.debit_debt(account, payer, amount);

        let mut token = StablecoinTokenContractRef::new(self.env(), self.synthetic_token());
        if !token.transfer_from(payer, Address::from(self.env().self_address()), amount) {
            self.env().revert(EngineError::TransferFailed);
        }
        token.burn(amount);
    }

    // ========================================
    // Ledger
    // ========================================
    // The only code that touches the balance mappings. Amounts are strictly
    // positive and debits are checked against the current balance, so no
    // position can go negative.

    fn credit_collateral(&mut self, account: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        let balance = self.collateral.get(&(account, asset)).unwrap_or_default();
        self.collateral.set(&(account, asset), balance + amount);

        self.env().emit_event(CollateralDeposited {
            account,
            asset,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    fn debit_collateral(&mut self, account: Address, recipient: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        let balance = self.collateral.get(&(account, asset)).unwrap_or_default();
        if amount > balance {
            self.env().revert(EngineError::InsufficientCollateral);
        }
        self.collateral.set(&(account, asset), balance - amount);

        self.env().emit_event(CollateralRedeemed {
            from: account,
            to: recipient,
            asset,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    fn credit_debt(&mut self, account: Address, amount: U256) {
        self.require_positive(amount);
        let balance = self.debt.get(&account).unwrap_or_default();
        self.debt.set(&account, balance + amount);

        self.env().emit_event(DebtMinted {
            account,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    fn debit_debt(&mut self, account: Address, payer: Address, amount: U256) {
        self.require_positive(amount);
        let balance = self.debt.get(&account).unwrap_or_default();
        if amount > balance {
            self.env().revert(EngineError::InsufficientDebt);
        }
        self.debt.set(&account, balance - amount);

        self.env().emit_event(DebtBurned {
            account,
            payer,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    // ========================================
    // Internals
    // ========================================

    fn price_of(&self, asset: Address) -> U256 {
        let feed_address = self.feed_of(asset);
        let feed = PriceFeedContractRef::new(self.env(), feed_address);
        let round = feed.latest_round();

        if round.answer == U256::zero() {
            self.env().revert(EngineError::PriceFeedUnavailable);
        }
        let now = self.env().get_block_time();
        if now.saturating_sub(round.updated_at) > MAX_PRICE_AGE {
            self.env().revert(EngineError::StalePrice);
        }

        round.answer
    }

    fn assert_asset_allowed(&self, asset: Address) {
        if self.price_feeds.get(&asset).is_none() {
            self.env().revert(EngineError::AssetNotAllowed);
        }
    }

    fn feed_of(&self, asset: Address) -> Address {
        self.price_feeds.get(&asset)
            .unwrap_or_revert_with(&self.env(), EngineError::AssetNotAllowed)
    }

    fn unit_of(&self, asset: Address) -> U256 {
        self.asset_units.get(&asset)
            .unwrap_or_revert_with(&self.env(), EngineError::AssetNotAllowed)
    }

    fn require_positive(&self, amount: U256) {
        if amount == U256::zero() {
            self.env().revert(EngineError::InvalidAmount);
        }
    }

    /// Safe multiplication with overflow check
    fn safe_mul(&self, a: U256, b: U256) -> U256 {
        a.checked_mul(b).unwrap_or_else(|| {
            self.env().revert(EngineError::MathOverflow);
        })
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(EngineError::Locked);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }
}
